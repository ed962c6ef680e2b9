use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidate,
    Employer,
    Admin,
}

/// User model - identity plus the profile fields the matcher reads.
///
/// `profile_text` is the candidate's free-text CV; the structured fields feed
/// the factor scorer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct User {
    #[builder(default = UserId::new())]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[builder(default)]
    pub profile_text: String,
    #[builder(default)]
    pub skills: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub experience_years: Option<i32>,
    #[builder(default, setter(strip_option))]
    pub education_level: Option<String>,
    #[builder(default, setter(strip_option))]
    pub location: Option<String>,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (
                id, name, email, role, profile_text, skills,
                experience_years, education_level, location, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(self.role)
        .bind(&self.profile_text)
        .bind(&self.skills)
        .bind(self.experience_years)
        .bind(&self.education_level)
        .bind(&self.location)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
