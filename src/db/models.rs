use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

use crate::api::application::models::ApplicationStatus;
use crate::api::job::models::{JobType, MinQualification, YearsOfExperience};

/// Database representation of a job posting
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub industry_id: Option<i32>,
    pub company_id: i32,
    pub job_type: JobType,
    pub min_qualification: Option<MinQualification>,
    pub years_of_exp: Option<YearsOfExperience>,
    pub salary: Option<i32>,
    pub description: String,
    pub posted_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl JobRow {
    /// Canonical path of the posting
    pub fn absolute_url(&self) -> String {
        format!("/job/{}", self.slug)
    }
}

impl fmt::Display for JobRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Database representation of an application
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationRow {
    pub id: i32,
    pub applicant_id: Option<i32>,
    pub job_id: Option<i32>,
    pub applied_on: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

/// Application joined with the display name of its applicant
#[derive(Debug, FromRow, Serialize)]
pub struct ApplicationListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub applicant_name: Option<String>,
}

impl fmt::Display for ApplicationListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.applicant_name.as_deref().unwrap_or_default())
    }
}

/// Account user as seen by the job board
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: i32,
    pub full_name: String,
    pub is_applicant: bool,
    pub is_company: bool,
}

/// Applicant profile of a user
#[derive(Debug, Clone, FromRow)]
pub struct ApplicantRow {
    pub id: i32,
}
