//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::{DateTime, Utc};
use server_core::common::UserId;
use server_core::domains::jobs::Job;
use server_core::domains::matching::models::{Match, MatchType, NewMatch};
use server_core::domains::users::{User, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

pub async fn create_employer(pool: &PgPool) -> Result<User> {
    User::builder()
        .name("Test Employer")
        .email(unique_email("employer"))
        .role(UserRole::Employer)
        .build()
        .insert(pool)
        .await
}

pub async fn create_admin(pool: &PgPool) -> Result<User> {
    User::builder()
        .name("Test Admin")
        .email(unique_email("admin"))
        .role(UserRole::Admin)
        .build()
        .insert(pool)
        .await
}

/// A candidate whose CV text is `profile_text`.
pub async fn create_candidate(pool: &PgPool, profile_text: &str) -> Result<User> {
    User::builder()
        .name("Test Candidate")
        .email(unique_email("candidate"))
        .role(UserRole::Candidate)
        .profile_text(profile_text)
        .skills(vec!["python".to_string(), "django".to_string()])
        .experience_years(4)
        .education_level("bachelor")
        .location("Berlin")
        .build()
        .insert(pool)
        .await
}

pub async fn create_job(pool: &PgPool, employer_id: UserId, description: &str) -> Result<Job> {
    Job::builder()
        .employer_id(employer_id)
        .title("Backend Engineer")
        .description(description)
        .skills(vec![
            "python".to_string(),
            "django".to_string(),
            "postgresql".to_string(),
        ])
        .experience_years(3)
        .education_level("bachelor")
        .location("Berlin")
        .build()
        .insert(pool)
        .await
}

/// Insert a pending match directly, bypassing scoring.
pub async fn insert_pending_match(
    pool: &PgPool,
    job: &Job,
    candidate_id: UserId,
    expires_at: Option<DateTime<Utc>>,
) -> Result<Match> {
    let new_match = NewMatch::builder()
        .job_id(job.id)
        .candidate_id(candidate_id)
        .employer_id(job.employer_id)
        .match_type(MatchType::Invitation)
        .score(50.0)
        .expires_at(expires_at)
        .build();
    Match::create(new_match, pool).await
}

pub const PYTHON_JOB: &str = "We are hiring a backend engineer with strong Python and Django \
    experience to build REST APIs on PostgreSQL.";

pub const PYTHON_CANDIDATE: &str = "Backend engineer with five years of Python and Django, \
    building REST APIs backed by PostgreSQL.";

pub const PASTRY_CANDIDATE: &str = "Pastry chef specialising in laminated doughs, croissants \
    and wedding cakes for boutique bakeries.";
