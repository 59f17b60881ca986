use serde::Serialize;

use crate::api::application::models::ApplicationStatus;
use crate::db::models::JobRow;
use super::models::{JobType, MinQualification, YearsOfExperience};

/// Response for a single job write
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub url: String,
    pub job: JobRow,
}

impl JobResponse {
    pub fn new(message: &str, job: JobRow) -> Self {
        Self {
            message: message.to_string(),
            url: job.absolute_url(),
            job,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Allowed values of every choice field, for building forms
#[derive(Serialize, Debug)]
pub struct ChoicesResponse {
    pub job_type: Vec<Choice>,
    pub min_qualification: Vec<Choice>,
    pub years_of_exp: Vec<Choice>,
    pub application_status: Vec<Choice>,
}

impl ChoicesResponse {
    pub fn build() -> Self {
        Self {
            job_type: JobType::ALL
                .iter()
                .map(|c| Choice { value: c.as_str(), label: c.label() })
                .collect(),
            min_qualification: MinQualification::ALL
                .iter()
                .map(|c| Choice { value: c.as_str(), label: c.label() })
                .collect(),
            years_of_exp: YearsOfExperience::ALL
                .iter()
                .map(|c| Choice { value: c.as_str(), label: c.label() })
                .collect(),
            application_status: ApplicationStatus::ALL
                .iter()
                .map(|c| Choice { value: c.as_str(), label: c.label() })
                .collect(),
        }
    }
}
