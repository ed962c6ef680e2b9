//! Update match action - edits the mutable fields of a match

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::machines;
use crate::domains::matching::models::{Match, MatchStatus};
use crate::kernel::ServerDeps;

const MAX_MESSAGE_LEN: usize = 2000;

/// Body of `PUT /matches/:id`. Identity, score and status are not editable;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchInput {
    pub message: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpdateMatchInput {
    fn validate(&self, now: DateTime<Utc>) -> Result<(), ApiError> {
        if let Some(message) = &self.message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                return Err(ApiError::validation(format!(
                    "message must be at most {} characters",
                    MAX_MESSAGE_LEN
                )));
            }
        }
        if let Some(expires_at) = self.expires_at {
            if expires_at <= now {
                return Err(ApiError::validation("expiresAt must be in the future"));
            }
        }
        Ok(())
    }
}

pub async fn update_match(
    match_id: MatchId,
    input: UpdateMatchInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Match, ApiError> {
    input.validate(Utc::now())?;

    let (record, _) = super::authorization::load_as_party(match_id, actor, &deps.db_pool).await?;

    if input.expires_at.is_some() {
        expiry_editable(&record)?;
    }

    let updated = Match::update_details(
        match_id,
        input.message.as_deref(),
        input.expires_at,
        &deps.db_pool,
    )
    .await?;

    match updated {
        Some(updated) => {
            info!(match_id = %match_id, user_id = %actor.user_id, "Match updated");
            Ok(updated)
        }
        // Left pending, fell due or vanished after the check above.
        None => match Match::find_by_id(match_id, &deps.db_pool).await? {
            Some(current) => {
                expiry_editable(&current)?;
                Err(ApiError::conflict("Match changed concurrently, try again"))
            }
            None => Err(ApiError::not_found("Match not found")),
        },
    }
}

/// An overdue pending match counts as expired, so its expiry can't be pushed back.
fn expiry_editable(record: &Match) -> Result<(), ApiError> {
    if machines::is_due_for_expiry(record, Utc::now()) {
        return Err(ApiError::conflict("Match has expired"));
    }
    if record.status != MatchStatus::Pending {
        return Err(ApiError::conflict(format!(
            "Cannot change the expiry of a match that is already {}",
            record.status
        )));
    }
    Ok(())
}
