//! Party checks shared by the single-match actions

use crate::common::{ApiError, MatchId};
use crate::domains::auth::Actor;
use crate::domains::matching::models::{Match, MatchParty};
use sqlx::PgPool;

/// Load a match and the actor's side of it.
///
/// NotFound when the row is missing, Forbidden when the actor is on neither side.
pub(super) async fn load_as_party(
    match_id: MatchId,
    actor: &Actor,
    pool: &PgPool,
) -> Result<(Match, MatchParty), ApiError> {
    let record = Match::find_by_id(match_id, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Match not found"))?;

    let party = record
        .party_of(actor.user_id)
        .ok_or_else(|| ApiError::forbidden("Not authorized to access this match"))?;

    Ok((record, party))
}
