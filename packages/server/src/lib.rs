// Job Match Service - API Core
//
// Pairs job postings with candidates, scores the pair (TF-IDF text similarity
// or weighted structured factors) and drives each match through its lifecycle.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
