use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review state of an application
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// Multipart body of an application submission
#[derive(MultipartForm)]
pub struct ApplicationUpload {
    #[multipart(limit = "5MB")]
    pub resume: TempFile,
    pub cover_letter: Option<Text<String>>,
}

/// Text fields of a submission, validated before anything is stored.
///
/// The 100 character cap on the cover letter is kept as modeled even though
/// it is far shorter than a typical letter. The letter is trimmed the way
/// form text inputs are, and a blank letter is stored as no letter.
#[derive(Debug, Validate)]
pub struct Application {
    #[validate(length(max = 100, message = "Cover letter must be at most 100 characters"))]
    pub cover_letter: Option<String>,
}

impl From<&ApplicationUpload> for Application {
    fn from(upload: &ApplicationUpload) -> Self {
        Self {
            cover_letter: upload
                .cover_letter
                .as_ref()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        }
    }
}

/// Status change request
#[derive(Deserialize, Debug, Validate)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// Outcome of checking whether a user may apply to a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyCheck {
    /// The user has no applicant role
    NotEligible,
    /// An application for this job and applicant already exists
    AlreadyApplied,
    /// The user may apply
    Open,
}

impl ApplyCheck {
    pub fn from_existing(exists: bool) -> Self {
        if exists {
            ApplyCheck::AlreadyApplied
        } else {
            ApplyCheck::Open
        }
    }

    pub fn applied(self) -> bool {
        matches!(self, ApplyCheck::AlreadyApplied)
    }

    pub fn message(self) -> &'static str {
        match self {
            ApplyCheck::NotEligible => "You are not eligible to apply for this job",
            ApplyCheck::AlreadyApplied => "You have previously applied for this job",
            ApplyCheck::Open => "Thanks for your Application",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }

    #[test]
    fn status_round_trips_through_json_names() {
        for status in ApplicationStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
    }

    #[test]
    fn cover_letter_cap_is_100_characters() {
        let ok = Application { cover_letter: Some("a".repeat(100)) };
        assert!(ok.validate().is_ok());

        let too_long = Application { cover_letter: Some("a".repeat(101)) };
        assert!(too_long
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("cover_letter"));
    }

    #[test]
    fn missing_cover_letter_is_valid() {
        assert!(Application { cover_letter: None }.validate().is_ok());
    }

    #[test]
    fn not_eligible_is_never_applied() {
        assert!(!ApplyCheck::NotEligible.applied());
        assert_eq!(
            ApplyCheck::NotEligible.message(),
            "You are not eligible to apply for this job"
        );
    }

    #[test]
    fn existing_application_means_applied() {
        let check = ApplyCheck::from_existing(true);
        assert!(check.applied());
        assert_eq!(check.message(), "You have previously applied for this job");
    }

    #[test]
    fn no_application_means_thanks() {
        let check = ApplyCheck::from_existing(false);
        assert!(!check.applied());
        assert_eq!(check.message(), "Thanks for your Application");
    }

    fn upload(cover_letter: Option<&str>) -> ApplicationUpload {
        ApplicationUpload {
            resume: TempFile {
                file: tempfile::NamedTempFile::new().unwrap(),
                content_type: None,
                file_name: Some("cv.pdf".to_string()),
                size: 0,
            },
            cover_letter: cover_letter.map(|text| Text(text.to_string())),
        }
    }

    #[test]
    fn cover_letter_is_trimmed_before_the_cap_applies() {
        let padded = format!("  {}  ", "a".repeat(100));
        let application = Application::from(&upload(Some(&padded)));
        assert_eq!(application.cover_letter.as_deref(), Some("a".repeat(100).as_str()));
        assert!(application.validate().is_ok());
    }

    #[test]
    fn blank_cover_letter_becomes_none() {
        assert_eq!(Application::from(&upload(Some("   "))).cover_letter, None);
        assert_eq!(Application::from(&upload(None)).cover_letter, None);
    }
}
