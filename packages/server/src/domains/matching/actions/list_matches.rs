//! List matches action - the requester's own matches, filtered and paged

use serde::Deserialize;

use crate::common::{ApiError, Page, PageArgs};
use crate::domains::auth::Actor;
use crate::domains::matching::models::{Match, MatchFilter, MatchParty, MatchSort, MatchStatus, MatchType};
use crate::kernel::ServerDeps;

/// Query string of `GET /matches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub status: Option<MatchStatus>,
    #[serde(rename = "type")]
    pub match_type: Option<MatchType>,
    /// Only matches where the requester is on this side.
    pub role: Option<MatchParty>,
    pub sort: Option<MatchSort>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Matches the actor is a party to. Admins get no wider view here.
pub async fn list_matches(
    query: ListMatchesQuery,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Page<Match>, ApiError> {
    let args = PageArgs {
        page: query.page,
        limit: query.limit,
    }
    .validate();

    let filter = MatchFilter {
        status: query.status,
        match_type: query.match_type,
        party: query.role,
        sort: query.sort.unwrap_or_default(),
    };

    let (items, total) = Match::find_for_user(actor.user_id, &filter, &args, &deps.db_pool).await?;
    Ok(Page::new(items, total, &args))
}
