use serde::Serialize;

use crate::db::models::ApplicationRow;
use super::models::ApplyCheck;

/// Answer to "has this user already applied to this job"
#[derive(Serialize, Debug, PartialEq)]
pub struct HasAppliedResponse {
    pub applied: bool,
    pub message: String,
}

impl From<ApplyCheck> for HasAppliedResponse {
    fn from(check: ApplyCheck) -> Self {
        Self {
            applied: check.applied(),
            message: check.message().to_string(),
        }
    }
}

/// Response for a single application write
#[derive(Serialize, Debug)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: ApplicationRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_mirrors_check() {
        assert_eq!(
            HasAppliedResponse::from(ApplyCheck::NotEligible),
            HasAppliedResponse {
                applied: false,
                message: "You are not eligible to apply for this job".to_string(),
            }
        );
        assert!(HasAppliedResponse::from(ApplyCheck::AlreadyApplied).applied);
    }
}
