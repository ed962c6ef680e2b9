//! Accept / reject actions - a party answers a pending match

use chrono::Utc;
use tracing::info;

use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::effects::{spawn_notices, MatchNotice};
use crate::domains::matching::machines::{self, MatchAction};
use crate::domains::matching::models::{Match, MatchParty};
use crate::kernel::ServerDeps;

use super::authorization::load_as_party;

pub async fn accept_match(match_id: MatchId, actor: &Actor, deps: &ServerDeps) -> Result<Match, ApiError> {
    respond(match_id, MatchAction::Accept, actor, deps).await
}

pub async fn reject_match(match_id: MatchId, actor: &Actor, deps: &ServerDeps) -> Result<Match, ApiError> {
    respond(match_id, MatchAction::Reject, actor, deps).await
}

/// Apply `action` to a pending match and notify the other party.
///
/// Only `pending` matches can be answered; anything else is a Conflict. A
/// pending match past its expiry is treated as expired even before the sweep
/// has run.
async fn respond(
    match_id: MatchId,
    action: MatchAction,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Match, ApiError> {
    let (record, party) = load_as_party(match_id, actor, &deps.db_pool).await?;

    let now = Utc::now();
    if machines::is_due_for_expiry(&record, now) {
        return Err(ApiError::conflict("Match has expired"));
    }
    let target = machines::transition(&record, action, now).map_err(|e| ApiError::conflict(e.to_string()))?;

    // A concurrent transition may have won since the read, or the expiry passed.
    let Some(updated) = Match::transition_from_pending(match_id, target.status, &deps.db_pool).await? else {
        return Err(match Match::find_by_id(match_id, &deps.db_pool).await? {
            Some(current) if machines::is_due_for_expiry(&current, Utc::now()) => {
                ApiError::conflict("Match has expired")
            }
            Some(current) => ApiError::conflict(format!(
                "Cannot {} a match that is already {}",
                action, current.status
            )),
            None => ApiError::not_found("Match not found"),
        });
    };

    info!(
        match_id = %match_id,
        user_id = %actor.user_id,
        status = %updated.status,
        "Match answered"
    );

    spawn_notices(deps, &updated, notice_for(action, party));
    Ok(updated)
}

fn notice_for(action: MatchAction, by: MatchParty) -> MatchNotice {
    match action {
        MatchAction::Accept => MatchNotice::Accepted { by },
        MatchAction::Reject => MatchNotice::Rejected { by },
        MatchAction::Expire => MatchNotice::Expired,
    }
}
