//! Match lifecycle state machine.
//!
//! ```text
//! pending ──accept──▶ accepted
//!    │ ──reject──▶ rejected
//!    └──expire──▶ expired   (only once expires_at has passed)
//! ```
//!
//! Terminal states have no outgoing transitions. These functions work on plain
//! values; persistence applies the same guard in SQL.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use super::models::{Match, MatchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Accept,
    Reject,
    Expire,
}

impl fmt::Display for MatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchAction::Accept => "accept",
            MatchAction::Reject => "reject",
            MatchAction::Expire => "expire",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Cannot {action} a match that is already {from}")]
    Terminal { from: MatchStatus, action: MatchAction },

    #[error("Match is not due to expire")]
    NotDue,
}

impl MatchStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchStatus::Pending)
    }

    /// Target state of `action` from this state.
    pub fn apply(self, action: MatchAction) -> Result<MatchStatus, TransitionError> {
        match (self, action) {
            (MatchStatus::Pending, MatchAction::Accept) => Ok(MatchStatus::Accepted),
            (MatchStatus::Pending, MatchAction::Reject) => Ok(MatchStatus::Rejected),
            (MatchStatus::Pending, MatchAction::Expire) => Ok(MatchStatus::Expired),
            (from, action) => Err(TransitionError::Terminal { from, action }),
        }
    }
}

/// Whether a pending match's expiry has passed at `now`.
pub fn is_due_for_expiry(record: &Match, now: DateTime<Utc>) -> bool {
    record.status == MatchStatus::Pending && record.expires_at.is_some_and(|at| at <= now)
}

/// Snapshot of `record` after `action` at `now`.
///
/// Leaving `pending` always clears `expires_at`.
pub fn transition(
    record: &Match,
    action: MatchAction,
    now: DateTime<Utc>,
) -> Result<Match, TransitionError> {
    let not_yet_due = action == MatchAction::Expire
        && record.status == MatchStatus::Pending
        && !is_due_for_expiry(record, now);
    if not_yet_due {
        return Err(TransitionError::NotDue);
    }

    let status = record.status.apply(action)?;
    Ok(Match {
        status,
        expires_at: None,
        updated_at: now,
        ..record.clone()
    })
}
