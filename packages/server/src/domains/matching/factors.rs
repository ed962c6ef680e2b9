//! Structured match factors and the weighted score derived from them.
//!
//! Score = skills·0.40 + experience·0.25 + education·0.20 + location·0.15,
//! where each factor contributes a percentage in [0, 100].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domains::jobs::Job;
use crate::domains::users::User;

pub const SKILLS_WEIGHT: f64 = 0.40;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;
pub const EDUCATION_WEIGHT: f64 = 0.20;
pub const LOCATION_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsFactor {
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    pub percentage: f64,
    #[serde(default = "default_skills_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFactor {
    #[serde(default)]
    pub required_years: Option<i32>,
    #[serde(default)]
    pub candidate_years: Option<i32>,
    pub percentage: f64,
    #[serde(default = "default_experience_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationFactor {
    #[serde(default)]
    pub required: Option<String>,
    #[serde(default)]
    pub candidate: Option<String>,
    pub percentage: f64,
    #[serde(default = "default_education_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFactor {
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub candidate_location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    pub percentage: f64,
    #[serde(default = "default_location_weight")]
    pub weight: f64,
}

fn default_skills_weight() -> f64 {
    SKILLS_WEIGHT
}
fn default_experience_weight() -> f64 {
    EXPERIENCE_WEIGHT
}
fn default_education_weight() -> f64 {
    EDUCATION_WEIGHT
}
fn default_location_weight() -> f64 {
    LOCATION_WEIGHT
}

/// Per-attribute breakdown of how well a candidate fits a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFactors {
    pub skills: SkillsFactor,
    pub experience: ExperienceFactor,
    pub education: EducationFactor,
    pub location: LocationFactor,
}

impl MatchFactors {
    /// Clamp every percentage to [0, 100] and pin the weights to the
    /// canonical values. Client-supplied weights are not honored.
    pub fn normalized(mut self) -> Self {
        self.skills.percentage = clamp_percentage(self.skills.percentage);
        self.experience.percentage = clamp_percentage(self.experience.percentage);
        self.education.percentage = clamp_percentage(self.education.percentage);
        self.location.percentage = clamp_percentage(self.location.percentage);
        self.skills.weight = SKILLS_WEIGHT;
        self.experience.weight = EXPERIENCE_WEIGHT;
        self.education.weight = EDUCATION_WEIGHT;
        self.location.weight = LOCATION_WEIGHT;
        self
    }

    /// Weighted score in [0, 100].
    pub fn score(&self) -> f64 {
        let raw = clamp_percentage(self.skills.percentage) * SKILLS_WEIGHT
            + clamp_percentage(self.experience.percentage) * EXPERIENCE_WEIGHT
            + clamp_percentage(self.education.percentage) * EDUCATION_WEIGHT
            + clamp_percentage(self.location.percentage) * LOCATION_WEIGHT;
        raw.clamp(0.0, 100.0)
    }

    /// Derive factors from the structured fields of a candidate and a job.
    pub fn evaluate(candidate: &User, job: &Job) -> Self {
        Self {
            skills: evaluate_skills(&candidate.skills, &job.skills),
            experience: evaluate_experience(candidate.experience_years, job.experience_years),
            education: evaluate_education(
                candidate.education_level.as_deref(),
                job.education_level.as_deref(),
            ),
            location: evaluate_location(
                candidate.location.as_deref(),
                job.location.as_deref(),
                job.is_remote,
            ),
        }
    }
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn evaluate_skills(candidate: &[String], required: &[String]) -> SkillsFactor {
    let have: HashSet<String> = candidate.iter().map(|s| normalize_skill(s)).collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut seen = HashSet::new();
    for skill in required {
        let key = normalize_skill(skill);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if have.contains(&key) {
            matched.push(skill.trim().to_string());
        } else {
            missing.push(skill.trim().to_string());
        }
    }

    let total = matched.len() + missing.len();
    let percentage = if total == 0 {
        100.0
    } else {
        matched.len() as f64 / total as f64 * 100.0
    };

    SkillsFactor {
        matched,
        missing,
        percentage,
        weight: SKILLS_WEIGHT,
    }
}

fn evaluate_experience(
    candidate_years: Option<i32>,
    required_years: Option<i32>,
) -> ExperienceFactor {
    let percentage = match (required_years, candidate_years) {
        (None, _) => 100.0,
        (Some(required), _) if required <= 0 => 100.0,
        (Some(_), None) => 0.0,
        (Some(required), Some(have)) => {
            (have.max(0) as f64 / required as f64 * 100.0).min(100.0)
        }
    };

    ExperienceFactor {
        required_years,
        candidate_years,
        percentage,
        weight: EXPERIENCE_WEIGHT,
    }
}

/// Ordinal rank of an education level; `None` for unrecognized labels.
pub fn education_rank(level: &str) -> Option<u8> {
    let normalized = level.trim().to_lowercase().replace(['-', ' '], "_");
    match normalized.as_str() {
        "none" => Some(0),
        "high_school" | "highschool" | "secondary" => Some(1),
        "associate" | "associates" | "diploma" => Some(2),
        "bachelor" | "bachelors" | "undergraduate" => Some(3),
        "master" | "masters" | "graduate" => Some(4),
        "phd" | "doctorate" | "doctoral" => Some(5),
        _ => None,
    }
}

fn evaluate_education(candidate: Option<&str>, required: Option<&str>) -> EducationFactor {
    let percentage = match (required, candidate) {
        (None, _) => 100.0,
        (Some(_), None) => 0.0,
        (Some(req), Some(have)) => match (education_rank(req), education_rank(have)) {
            (Some(0), _) => 100.0,
            (Some(req_rank), Some(have_rank)) if have_rank >= req_rank => 100.0,
            (Some(req_rank), Some(have_rank)) => have_rank as f64 / req_rank as f64 * 100.0,
            _ if req.trim().eq_ignore_ascii_case(have.trim()) => 100.0,
            _ => 0.0,
        },
    };

    EducationFactor {
        required: required.map(String::from),
        candidate: candidate.map(String::from),
        percentage,
        weight: EDUCATION_WEIGHT,
    }
}

fn location_parts(location: &str) -> HashSet<String> {
    location
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

fn evaluate_location(candidate: Option<&str>, job: Option<&str>, remote: bool) -> LocationFactor {
    let percentage = match (job, candidate) {
        _ if remote => 100.0,
        (None, _) => 100.0,
        (Some(_), None) => 0.0,
        (Some(job_loc), Some(have)) => {
            let job_parts = location_parts(job_loc);
            let have_parts = location_parts(have);
            if job_parts == have_parts {
                100.0
            } else if !job_parts.is_disjoint(&have_parts) {
                50.0
            } else {
                0.0
            }
        }
    };

    LocationFactor {
        job_location: job.map(String::from),
        candidate_location: candidate.map(String::from),
        remote,
        percentage,
        weight: LOCATION_WEIGHT,
    }
}
