//! Matching domain - pairs candidates with jobs and tracks the match lifecycle.

pub mod actions;
pub mod data;
pub mod effects;
pub mod factors;
pub mod machines;
pub mod models;
pub mod similarity;

pub use data::MatchData;
pub use factors::MatchFactors;
pub use models::{Match, MatchParty, MatchStatus, MatchType};
