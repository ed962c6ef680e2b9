use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::models::Match;
use crate::kernel::ServerDeps;

use super::authorization::load_as_party;

/// Fetch a match the actor is a party to, recording that their side has seen it.
pub async fn get_match(match_id: MatchId, actor: &Actor, deps: &ServerDeps) -> Result<Match, ApiError> {
    let (record, party) = load_as_party(match_id, actor, &deps.db_pool).await?;

    // Deleted between the read and the flag update: report what was read.
    let viewed = Match::mark_viewed(record.id, party, &deps.db_pool).await?;
    Ok(viewed.unwrap_or(record))
}
