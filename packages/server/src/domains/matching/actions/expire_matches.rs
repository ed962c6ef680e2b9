use chrono::Utc;
use tracing::info;

use crate::common::ApiError;
use crate::domains::matching::effects::{spawn_notices, MatchNotice};
use crate::domains::matching::models::Match;
use crate::kernel::ServerDeps;

/// Expire every overdue pending match and notify both parties of each.
///
/// Returns the matches this call expired. Overlapping sweeps never return the
/// same match twice.
pub async fn expire_due_matches(deps: &ServerDeps) -> Result<Vec<Match>, ApiError> {
    let expired = Match::expire_due(Utc::now(), &deps.db_pool).await?;

    if !expired.is_empty() {
        info!(count = expired.len(), "Expired overdue matches");
    }
    for record in &expired {
        spawn_notices(deps, record, MatchNotice::Expired);
    }

    Ok(expired)
}
