use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::{JobId, UserId};

/// Job posting, as far as matching is concerned: who owns it and what it asks for.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Job {
    #[builder(default = JobId::new())]
    pub id: JobId,
    pub employer_id: UserId,
    pub title: String,
    #[builder(default)]
    pub description: String,
    #[builder(default)]
    pub skills: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub experience_years: Option<i32>,
    #[builder(default, setter(strip_option))]
    pub education_level: Option<String>,
    #[builder(default, setter(strip_option))]
    pub location: Option<String>,
    #[builder(default = false)]
    pub is_remote: bool,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub async fn find_by_id(id: JobId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO jobs (
                id, employer_id, title, description, skills, experience_years,
                education_level, location, is_remote, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.employer_id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.skills)
        .bind(self.experience_years)
        .bind(&self.education_level)
        .bind(&self.location)
        .bind(self.is_remote)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Text the similarity engine compares against a candidate's CV.
    pub fn match_text(&self) -> &str {
        &self.description
    }
}
