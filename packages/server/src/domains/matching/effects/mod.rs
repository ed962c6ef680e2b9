//! Matching side effects - notifications fired after a match changes.

pub mod notify;

pub use notify::{notices_for, spawn_notices, MatchNotice};
