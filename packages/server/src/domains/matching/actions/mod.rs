//! Matching domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers and the
//! scheduler. Each one authorizes the actor, does the work, fires notifications
//! in the background, and returns domain values or an `ApiError`.

mod authorization;
mod create_match;
mod delete_match;
mod expire_matches;
mod get_match;
mod list_matches;
mod mark_viewed;
mod respond;
mod update_match;

pub use create_match::{create_match, CreateMatchInput, ScoringMethod};
pub use delete_match::delete_match;
pub use expire_matches::expire_due_matches;
pub use get_match::get_match;
pub use list_matches::{list_matches, ListMatchesQuery};
pub use mark_viewed::mark_match_viewed;
pub use respond::{accept_match, reject_match};
pub use update_match::{update_match, UpdateMatchInput};
