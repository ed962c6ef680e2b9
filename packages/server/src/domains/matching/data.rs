use serde::{Deserialize, Serialize};

use crate::domains::matching::factors::MatchFactors;
use crate::domains::matching::models::{Match, MatchStatus, MatchType};

/// API representation of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchData {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub employer_id: String,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    pub message: Option<String>,
    pub score: f64,
    pub status: MatchStatus,
    pub match_factors: Option<MatchFactors>,

    // Per-side read receipts
    pub viewed_by_employer: bool,
    pub viewed_by_candidate: bool,

    // Timestamps
    pub expires_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Match> for MatchData {
    fn from(record: Match) -> Self {
        Self {
            id: record.id.to_string(),
            job_id: record.job_id.to_string(),
            candidate_id: record.candidate_id.to_string(),
            employer_id: record.employer_id.to_string(),
            match_type: record.match_type,
            message: record.message,
            score: record.score,
            status: record.status,
            match_factors: record.match_factors.map(|json| json.0),
            viewed_by_employer: record.viewed_by_employer,
            viewed_by_candidate: record.viewed_by_candidate,
            expires_at: record.expires_at.map(|at| at.to_rfc3339()),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}
