//! Create match action - scores a job/candidate pair and records the match

use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::info;

use crate::common::{is_unique_violation, ApiError, JobId, UserId};
use crate::domains::auth::Actor;
use crate::domains::jobs::Job;
use crate::domains::matching::effects::{spawn_notices, MatchNotice};
use crate::domains::matching::factors::MatchFactors;
use crate::domains::matching::models::{Match, MatchType, NewMatch};
use crate::domains::matching::similarity;
use crate::domains::users::{User, UserRole};
use crate::kernel::ServerDeps;

const MAX_MESSAGE_LEN: usize = 2000;
const MAX_EXPIRY_HOURS: i64 = 24 * 365;

/// How the score of a new match is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// TF-IDF similarity of the candidate profile and the job description.
    #[default]
    Text,
    /// Weighted structured factors.
    Factors,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchInput {
    pub job_id: JobId,
    /// The candidate being matched.
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    #[serde(default)]
    pub message: Option<String>,
    /// Caller-computed factors. Implies factor scoring.
    #[serde(default)]
    pub match_factors: Option<MatchFactors>,
    #[serde(default)]
    pub scoring: Option<ScoringMethod>,
    #[serde(default)]
    pub expires_in_hours: Option<i64>,
}

impl CreateMatchInput {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(message) = &self.message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                return Err(ApiError::validation(format!(
                    "message must be at most {} characters",
                    MAX_MESSAGE_LEN
                )));
            }
        }
        if let Some(hours) = self.expires_in_hours {
            if !(1..=MAX_EXPIRY_HOURS).contains(&hours) {
                return Err(ApiError::validation(format!(
                    "expiresInHours must be between 1 and {}",
                    MAX_EXPIRY_HOURS
                )));
            }
        }
        Ok(())
    }
}

/// Score and persist a new pending match, then notify the candidate.
///
/// Only the employer who owns the job (or an admin) may create it. A second
/// match for the same job and candidate is a Conflict and leaves the existing
/// row untouched.
pub async fn create_match(
    input: CreateMatchInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Match, ApiError> {
    input.validate()?;
    let pool = &deps.db_pool;

    let job = Job::find_by_id(input.job_id, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    if job.employer_id != actor.user_id && !actor.is_admin() {
        return Err(ApiError::forbidden(
            "Only the employer who posted this job can create matches for it",
        ));
    }
    let candidate = User::find_by_id(input.user_id, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Candidate not found"))?;

    if candidate.role != UserRole::Candidate {
        return Err(ApiError::validation("userId must refer to a candidate"));
    }

    let (score, factors) = match (input.match_factors, input.scoring.unwrap_or_default()) {
        (Some(supplied), _) => {
            let factors = supplied.normalized();
            (factors.score(), Some(factors))
        }
        (None, ScoringMethod::Factors) => {
            let factors = MatchFactors::evaluate(&candidate, &job);
            (factors.score(), Some(factors))
        }
        (None, ScoringMethod::Text) => (
            similarity::text_score(&candidate.profile_text, job.match_text()),
            None,
        ),
    };

    let expiry = input
        .expires_in_hours
        .map(Duration::hours)
        .unwrap_or(deps.match_expiry);

    let new_match = NewMatch::builder()
        .job_id(job.id)
        .candidate_id(candidate.id)
        .employer_id(job.employer_id)
        .match_type(input.match_type)
        .message(input.message)
        .score(score)
        .match_factors(factors)
        .expires_at(Some(Utc::now() + expiry))
        .build();

    let record = match Match::create(new_match, pool).await {
        Ok(record) => record,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::conflict(
                "A match already exists for this job and candidate",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        match_id = %record.id,
        job_id = %record.job_id,
        candidate_id = %record.candidate_id,
        score = record.score,
        "Match created"
    );

    spawn_notices(deps, &record, MatchNotice::Created);
    Ok(record)
}
