// Business domains
pub mod auth;
pub mod jobs;
pub mod matching;
pub mod notifications;
pub mod users;
