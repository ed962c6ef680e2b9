use tracing::info;

use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::models::Match;
use crate::kernel::ServerDeps;

use super::authorization::load_as_party;

/// Delete a match. Either party may do so, in any state.
pub async fn delete_match(match_id: MatchId, actor: &Actor, deps: &ServerDeps) -> Result<(), ApiError> {
    load_as_party(match_id, actor, &deps.db_pool).await?;

    if !Match::delete(match_id, &deps.db_pool).await? {
        return Err(ApiError::not_found("Match not found"));
    }

    info!(match_id = %match_id, user_id = %actor.user_id, "Match deleted");
    Ok(())
}
