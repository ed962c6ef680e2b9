//! Notification fan-out for match lifecycle changes.
//!
//! Delivery runs on a spawned task so the triggering request never waits on it
//! and never fails because of it.

use tracing::debug;

use crate::common::UserId;
use crate::domains::jobs::models::Job;
use crate::domains::matching::models::{Match, MatchParty};
use crate::domains::notifications::{NotificationKind, OutgoingNotification};
use crate::kernel::ServerDeps;

/// What happened to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchNotice {
    Created,
    Accepted { by: MatchParty },
    Rejected { by: MatchParty },
    Expired,
}

/// Notifications owed for `notice`, addressed to the right parties.
pub fn notices_for(record: &Match, notice: MatchNotice, job_title: &str) -> Vec<OutgoingNotification> {
    let outgoing = |recipient_id: UserId, kind: NotificationKind, title: &str, body: String| {
        OutgoingNotification {
            recipient_id,
            match_id: Some(record.id),
            kind,
            title: title.to_string(),
            body,
        }
    };

    match notice {
        MatchNotice::Created => vec![outgoing(
            record.candidate_id,
            NotificationKind::MatchCreated,
            "New job match",
            format!("You have been matched with \"{}\" ({:.0}% match)", job_title, record.score),
        )],
        MatchNotice::Accepted { by } => vec![outgoing(
            record.counterpart(by),
            NotificationKind::MatchAccepted,
            "Match accepted",
            format!("Your match for \"{}\" was accepted", job_title),
        )],
        MatchNotice::Rejected { by } => vec![outgoing(
            record.counterpart(by),
            NotificationKind::MatchRejected,
            "Match declined",
            format!("Your match for \"{}\" was declined", job_title),
        )],
        MatchNotice::Expired => [record.candidate_id, record.employer_id]
            .into_iter()
            .map(|recipient| {
                outgoing(
                    recipient,
                    NotificationKind::MatchExpired,
                    "Match expired",
                    format!("The match for \"{}\" expired without a response", job_title),
                )
            })
            .collect(),
    }
}

/// Deliver the notifications for `notice` in the background.
pub fn spawn_notices(deps: &ServerDeps, record: &Match, notice: MatchNotice) {
    let deps = deps.clone();
    let record = record.clone();
    tokio::spawn(async move {
        let job_title = match Job::find_by_id(record.job_id, &deps.db_pool).await {
            Ok(Some(job)) => job.title,
            Ok(None) => "a job".to_string(),
            Err(e) => {
                debug!(job_id = %record.job_id, error = %e, "Job lookup for notification failed");
                "a job".to_string()
            }
        };

        for notification in notices_for(&record, notice, &job_title) {
            deps.deliver(notification).await;
        }
    });
}
