//! Typed ID definitions for the entities this service touches.

pub use super::id::Id;

/// Marker type for user accounts (candidates, employers, admins).
pub struct User;

/// Marker type for job postings.
pub struct Job;

/// Marker type for job-candidate matches.
pub struct Match;

/// Marker type for notification records.
pub struct Notification;

pub type UserId = Id<User>;
pub type JobId = Id<Job>;
pub type MatchId = Id<Match>;
pub type NotificationId = Id<Notification>;
