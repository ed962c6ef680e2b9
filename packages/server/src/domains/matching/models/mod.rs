pub mod match_record;

pub use match_record::{Match, MatchFilter, MatchParty, MatchSort, MatchStatus, MatchType, NewMatch};
