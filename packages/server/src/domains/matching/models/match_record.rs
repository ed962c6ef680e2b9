use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use std::fmt;
use typed_builder::TypedBuilder;

use crate::common::{JobId, MatchId, UserId, ValidatedPageArgs};
use crate::domains::matching::factors::MatchFactors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
            MatchStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Employer invites a candidate to apply.
    Invitation,
    /// Produced by an automated recommendation run.
    Recommendation,
    /// Employer pairs a job with a candidate who already applied.
    Application,
}

/// Which side of a match a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchParty {
    Candidate,
    Employer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSort {
    /// Newest first.
    #[default]
    Recent,
    /// Highest score first, newest first among ties.
    Score,
}

impl MatchSort {
    fn order_by(&self) -> &'static str {
        match self {
            MatchSort::Recent => "created_at DESC, id DESC",
            MatchSort::Score => "score DESC, created_at DESC, id DESC",
        }
    }
}

/// List filters. The requester restriction is always applied on top.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub match_type: Option<MatchType>,
    /// Restrict to matches where the requester is on this side.
    pub party: Option<MatchParty>,
    pub sort: MatchSort,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: MatchId,
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub employer_id: UserId,
    pub match_type: MatchType,
    pub message: Option<String>,
    pub score: f64,
    pub status: MatchStatus,
    pub match_factors: Option<Json<MatchFactors>>,
    pub viewed_by_employer: bool,
    pub viewed_by_candidate: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a fresh pending match.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewMatch {
    #[builder(default = MatchId::new())]
    pub id: MatchId,
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub employer_id: UserId,
    pub match_type: MatchType,
    #[builder(default)]
    pub message: Option<String>,
    pub score: f64,
    #[builder(default)]
    pub match_factors: Option<MatchFactors>,
    #[builder(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Match {
    /// The side `user_id` is on, if any.
    pub fn party_of(&self, user_id: UserId) -> Option<MatchParty> {
        if user_id == self.candidate_id {
            Some(MatchParty::Candidate)
        } else if user_id == self.employer_id {
            Some(MatchParty::Employer)
        } else {
            None
        }
    }

    /// The user on the opposite side from `party`.
    pub fn counterpart(&self, party: MatchParty) -> UserId {
        match party {
            MatchParty::Candidate => self.employer_id,
            MatchParty::Employer => self.candidate_id,
        }
    }

    pub fn factors(&self) -> Option<&MatchFactors> {
        self.match_factors.as_ref().map(|json| &json.0)
    }
}

// =============================================================================
// SQL Queries
// =============================================================================

impl Match {
    /// Insert a pending match.
    ///
    /// Uniqueness of (job_id, candidate_id) is enforced by the
    /// `matches_job_candidate_key` index; a duplicate surfaces as a database
    /// unique violation (see `common::is_unique_violation`).
    pub async fn create(new: NewMatch, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO matches (
                id, job_id, candidate_id, employer_id, match_type, message,
                score, status, match_factors, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.job_id)
        .bind(new.candidate_id)
        .bind(new.employer_id)
        .bind(new.match_type)
        .bind(new.message)
        .bind(new.score.clamp(0.0, 100.0))
        .bind(new.match_factors.map(Json))
        .bind(new.expires_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: MatchId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_pair(
        job_id: JobId,
        candidate_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE job_id = $1 AND candidate_id = $2")
            .bind(job_id)
            .bind(candidate_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// One page of the matches `user_id` is a party to, plus the total count.
    pub async fn find_for_user(
        user_id: UserId,
        filter: &MatchFilter,
        page: &ValidatedPageArgs,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        const WHERE: &str = r#"
            WHERE (
                ($2::text IS NULL AND (candidate_id = $1 OR employer_id = $1))
                OR ($2 = 'candidate' AND candidate_id = $1)
                OR ($2 = 'employer' AND employer_id = $1)
            )
              AND ($3::match_status IS NULL OR status = $3)
              AND ($4::match_type IS NULL OR match_type = $4)
        "#;

        let party = filter.party.map(|p| match p {
            MatchParty::Candidate => "candidate",
            MatchParty::Employer => "employer",
        });

        let list_sql = format!(
            "SELECT * FROM matches {} ORDER BY {} LIMIT $5 OFFSET $6",
            WHERE,
            filter.sort.order_by()
        );
        let items = sqlx::query_as::<_, Self>(&list_sql)
            .bind(user_id)
            .bind(party)
            .bind(filter.status)
            .bind(filter.match_type)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM matches {}", WHERE);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(user_id)
            .bind(party)
            .bind(filter.status)
            .bind(filter.match_type)
            .fetch_one(pool)
            .await?;

        Ok((items, total))
    }

    /// Update the mutable fields. `expires_at` may only change while pending
    /// and not yet overdue; returns `None` if the row is gone or that no longer holds.
    pub async fn update_details(
        id: MatchId,
        message: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE matches
            SET message = COALESCE($2, message),
                expires_at = COALESCE($3, expires_at),
                updated_at = NOW()
            WHERE id = $1
              AND (
                  $3::timestamptz IS NULL
                  OR (status = 'pending' AND (expires_at IS NULL OR expires_at > NOW()))
              )
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(message)
        .bind(expires_at)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Move a pending match to `status`, clearing its expiry.
    ///
    /// Guarded on `status = 'pending'` and an unexpired `expires_at`, so of two
    /// concurrent transitions only one returns a row, and an overdue match never does.
    pub async fn transition_from_pending(
        id: MatchId,
        status: MatchStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE matches
            SET status = $2, expires_at = NULL, updated_at = NOW()
            WHERE id = $1
              AND status = 'pending'
              AND (expires_at IS NULL OR expires_at > NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Set the viewed flag for one side. Idempotent.
    pub async fn mark_viewed(id: MatchId, party: MatchParty, pool: &PgPool) -> Result<Option<Self>> {
        let sql = match party {
            MatchParty::Employer => {
                "UPDATE matches SET viewed_by_employer = true, updated_at = NOW() WHERE id = $1 RETURNING *"
            }
            MatchParty::Candidate => {
                "UPDATE matches SET viewed_by_candidate = true, updated_at = NOW() WHERE id = $1 RETURNING *"
            }
        };
        sqlx::query_as::<_, Self>(sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Returns whether a row was deleted.
    pub async fn delete(id: MatchId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Expire every pending match whose `expires_at` is at or before `now`.
    ///
    /// Each row is returned by exactly one call: the status guard is
    /// re-checked under the row lock, so overlapping sweeps cannot both claim it.
    pub async fn expire_due(now: DateTime<Utc>, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE matches
            SET status = 'expired', expires_at = NULL, updated_at = NOW()
            WHERE status = 'pending'
              AND expires_at IS NOT NULL
              AND expires_at <= $1
            RETURNING *
            "#,
        )
        .bind(now)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
