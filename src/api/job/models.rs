use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employment type of a posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum JobType {
    Fulltime,
    Parttime,
}

impl JobType {
    pub const ALL: [JobType; 2] = [JobType::Fulltime, JobType::Parttime];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Fulltime => "fulltime",
            JobType::Parttime => "parttime",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobType::Fulltime => "Full-Time",
            JobType::Parttime => "Part-Time",
        }
    }
}

/// Minimum qualification required by a posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum MinQualification {
    Ssce,
    Bsc,
    Msc,
    Phd,
}

impl MinQualification {
    pub const ALL: [MinQualification; 4] = [
        MinQualification::Ssce,
        MinQualification::Bsc,
        MinQualification::Msc,
        MinQualification::Phd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MinQualification::Ssce => "ssce",
            MinQualification::Bsc => "bsc",
            MinQualification::Msc => "msc",
            MinQualification::Phd => "phd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MinQualification::Ssce => "SSCE",
            MinQualification::Bsc => "BSc",
            MinQualification::Msc => "MSc",
            MinQualification::Phd => "PhD",
        }
    }
}

/// Experience band. Stored values contain digits and spaces, so every
/// variant carries an explicit name.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum YearsOfExperience {
    #[serde(rename = "entry")]
    #[sqlx(rename = "entry")]
    Entry,
    #[serde(rename = "1-2")]
    #[sqlx(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    #[sqlx(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-10")]
    #[sqlx(rename = "6-10")]
    SixToTen,
    #[serde(rename = "above 10")]
    #[sqlx(rename = "above 10")]
    AboveTen,
}

impl YearsOfExperience {
    pub const ALL: [YearsOfExperience; 5] = [
        YearsOfExperience::Entry,
        YearsOfExperience::OneToTwo,
        YearsOfExperience::ThreeToFive,
        YearsOfExperience::SixToTen,
        YearsOfExperience::AboveTen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            YearsOfExperience::Entry => "entry",
            YearsOfExperience::OneToTwo => "1-2",
            YearsOfExperience::ThreeToFive => "3-5",
            YearsOfExperience::SixToTen => "6-10",
            YearsOfExperience::AboveTen => "above 10",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YearsOfExperience::Entry => "Entry Level",
            YearsOfExperience::OneToTwo => "1-2 years",
            YearsOfExperience::ThreeToFive => "3-5 years",
            YearsOfExperience::SixToTen => "6-10 years",
            YearsOfExperience::AboveTen => "Above 10 years",
        }
    }
}

/// Job payload for creating or re-saving a posting.
///
/// The slug and both timestamps are never accepted from the client; they are
/// derived by the repository on every write.
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct Job {
    #[validate(length(
        min = 1,
        max = 60,
        message = "Title must be between 1 and 60 characters"
    ))]
    pub title: String,
    pub industry_id: Option<i32>,
    pub company_id: i32,
    pub job_type: JobType,
    pub min_qualification: Option<MinQualification>,
    pub years_of_exp: Option<YearsOfExperience>,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub salary: Option<i32>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Optional filters for listing jobs
#[derive(Deserialize, Debug, Default)]
pub struct JobFilter {
    pub industry: Option<i32>,
    pub company: Option<i32>,
    pub job_type: Option<JobType>,
}
