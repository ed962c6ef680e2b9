use tracing::debug;

use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::models::Match;
use crate::kernel::ServerDeps;

use super::authorization::load_as_party;

/// Set the viewed flag for the actor's side. Repeating it changes nothing.
pub async fn mark_match_viewed(
    match_id: MatchId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Match, ApiError> {
    let (_, party) = load_as_party(match_id, actor, &deps.db_pool).await?;

    let record = Match::mark_viewed(match_id, party, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

    debug!(match_id = %match_id, ?party, "Match marked viewed");
    Ok(record)
}
