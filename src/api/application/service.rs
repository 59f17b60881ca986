use sqlx::{Pool, Postgres};
use tracing::{info, warn};
use validator::Validate;

use crate::api::error::ServiceError;
use crate::api::validation::field_messages;
use crate::db::account_repository::AccountRepository;
use crate::db::application_repository::{ApplicationRepository, NewApplication};
use crate::db::job_repository::JobRepository;
use crate::db::models::{ApplicantRow, ApplicationListing, ApplicationRow, JobRow, UserRow};
use crate::storage::ResumeStorage;
use super::dto::{ApplicationResponse, HasAppliedResponse};
use super::models::{Application, ApplicationStatus, ApplicationUpload, ApplyCheck};

/// Application service containing business logic
pub struct ApplicationService {
    pool: Pool<Postgres>,
    storage: ResumeStorage,
}

impl ApplicationService {
    pub fn new(pool: Pool<Postgres>, storage: ResumeStorage) -> Self {
        Self { pool, storage }
    }

    async fn job(&self, job_id: i32) -> Result<JobRow, ServiceError> {
        JobRepository::get_by_id(&self.pool, job_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", job_id))
    }

    /// Whether `user` has already applied to `job`.
    ///
    /// Users without the applicant role are not eligible and nothing is
    /// queried. An applicant user must own an applicant profile.
    pub async fn has_applied(&self, user: &UserRow, job: &JobRow) -> Result<ApplyCheck, ServiceError> {
        Ok(self.check_with_profile(user, job).await?.0)
    }

    async fn check_with_profile(
        &self,
        user: &UserRow,
        job: &JobRow,
    ) -> Result<(ApplyCheck, Option<ApplicantRow>), ServiceError> {
        if !user.is_applicant {
            return Ok((ApplyCheck::NotEligible, None));
        }

        let applicant = AccountRepository::applicant_for_user(&self.pool, user.id)
            .await?
            .ok_or(ServiceError::MissingApplicantProfile(user.id))?;

        let exists = ApplicationRepository::exists(&self.pool, job.id, applicant.id).await?;
        Ok((ApplyCheck::from_existing(exists), Some(applicant)))
    }

    pub async fn check_job(&self, user: &UserRow, job_id: i32) -> Result<HasAppliedResponse, ServiceError> {
        let job = self.job(job_id).await?;
        let check = self.has_applied(user, &job).await?;
        Ok(HasAppliedResponse::from(check))
    }

    /// Submit an application for `job_id`.
    ///
    /// Refuses ineligible users and duplicate submissions, validates the text
    /// fields, stores the resume under the user's folder and records the row.
    pub async fn apply(
        &self,
        user: &UserRow,
        job_id: i32,
        upload: ApplicationUpload,
    ) -> Result<ApplicationResponse, ServiceError> {
        let job = self.job(job_id).await?;

        let (check, applicant) = self.check_with_profile(user, &job).await?;
        let applicant = match (check, applicant) {
            (ApplyCheck::Open, Some(applicant)) => applicant,
            (ApplyCheck::AlreadyApplied, _) => {
                warn!("Service: User {} already applied for job {}", user.id, job.id);
                return Err(ServiceError::Conflict(check.message()));
            }
            _ => {
                warn!("Service: User {} is not eligible to apply for job {}", user.id, job.id);
                return Err(ServiceError::Forbidden(ApplyCheck::NotEligible.message()));
            }
        };

        let application = Application::from(&upload);
        application
            .validate()
            .map_err(|e| ServiceError::ValidationError(field_messages(&e)))?;

        let original_name = upload.resume.file_name.as_deref().unwrap_or_default();
        let resume = self
            .storage
            .save(user.id, original_name, upload.resume.file.path())
            .await?;

        let created = ApplicationRepository::create(
            &self.pool,
            &NewApplication {
                applicant_id: applicant.id,
                job_id: job.id,
                resume: Some(&resume),
                cover_letter: application.cover_letter.as_deref(),
            },
        )
        .await;

        let row = match created {
            Ok(row) => row,
            Err(e) => {
                // Don't leave an orphaned upload behind a failed insert
                if let Err(cleanup) = self.storage.remove(&resume).await {
                    warn!("Service: Failed to remove resume {}: {}", resume, cleanup);
                }
                return Err(e.into());
            }
        };

        info!(
            "Service: Application {} created for job {} by user {}",
            row.id, job.id, user.id
        );
        Ok(ApplicationResponse {
            message: check.message().to_string(),
            application: row,
        })
    }

    pub async fn list_for_job(&self, job_id: i32) -> Result<Vec<ApplicationListing>, ServiceError> {
        let job = self.job(job_id).await?;
        Ok(ApplicationRepository::list_for_job(&self.pool, job.id).await?)
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: ApplicationStatus,
    ) -> Result<ApplicationRow, ServiceError> {
        let row = ApplicationRepository::update_status(&self.pool, id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", id))?;

        info!("Service: Application {} moved to {}", id, status.as_str());
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let row = ApplicationRepository::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", id))?;

        ApplicationRepository::delete(&self.pool, id).await?;
        if let Some(resume) = row.resume {
            // The row is already deleted; cleanup failures are only logged
            if let Err(e) = self.storage.remove(&resume).await {
                warn!("Service: Failed to remove resume {} of application {}: {}", resume, id, e);
            }
        }

        info!("Service: Application {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::application_repository::tests::seed_applicant;
    use crate::db::job_repository::tests as jobs;
    use actix_multipart::form::{tempfile::TempFile, text::Text};
    use actix_web::{http::StatusCode, ResponseError};
    use std::io::Write;

    fn upload(file_name: &str, cover_letter: Option<&str>) -> ApplicationUpload {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 resume").unwrap();
        ApplicationUpload {
            resume: TempFile {
                file,
                content_type: None,
                file_name: Some(file_name.to_string()),
                size: 15,
            },
            cover_letter: cover_letter.map(|text| Text(text.to_string())),
        }
    }

    fn user(id: i32, is_applicant: bool) -> UserRow {
        UserRow {
            id,
            full_name: "Ada Obi".to_string(),
            is_applicant,
            is_company: !is_applicant,
        }
    }

    #[actix_web::test]
    async fn non_applicant_is_not_eligible_without_querying() {
        // A lazy pool never connects, so any query would fail the test
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let service = ApplicationService::new(pool, ResumeStorage::new("media"));
        let now = chrono::Utc::now();
        let job = JobRow {
            id: 1,
            title: "Cook".to_string(),
            slug: "cook".to_string(),
            industry_id: None,
            company_id: 1,
            job_type: crate::api::job::models::JobType::Fulltime,
            min_qualification: None,
            years_of_exp: None,
            salary: None,
            description: String::new(),
            posted_on: now,
            updated_on: now,
        };

        let check = service.has_applied(&user(1, false), &job).await.unwrap();
        assert_eq!(check, ApplyCheck::NotEligible);
        assert!(!check.applied());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn has_applied_reflects_existing_application(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Nurse", company, None)).await.unwrap();
        let (user_id, applicant_id) = seed_applicant(&pool, "ada@mail.test").await;
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new("media"));

        let before = service.has_applied(&user(user_id, true), &job).await.unwrap();
        assert_eq!(before, ApplyCheck::Open);
        assert_eq!(before.message(), "Thanks for your Application");

        ApplicationRepository::create(
            &pool,
            &NewApplication { applicant_id, job_id: job.id, resume: None, cover_letter: None },
        )
        .await
        .unwrap();

        let after = service.has_applied(&user(user_id, true), &job).await.unwrap();
        assert_eq!(after, ApplyCheck::AlreadyApplied);
        assert!(after.applied());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn applicant_flag_without_profile_is_an_error(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Porter", company, None)).await.unwrap();
        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO users (email, is_applicant) VALUES ('ghost@mail.test', TRUE) RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        let service = ApplicationService::new(pool, ResumeStorage::new("media"));

        let result = service.has_applied(&user(user_id, true), &job).await;
        assert!(matches!(result, Err(ServiceError::MissingApplicantProfile(id)) if id == user_id));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn apply_stores_resume_and_thanks_the_applicant(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Pilot", company, None)).await.unwrap();
        let (user_id, applicant_id) = seed_applicant(&pool, "ada@mail.test").await;
        let media = tempfile::tempdir().unwrap();
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new(media.path()));

        let response = service
            .apply(&user(user_id, true), job.id, upload("My CV.pdf", Some("  I fly well  ")))
            .await
            .unwrap();

        assert_eq!(response.message, "Thanks for your Application");
        let row = response.application;
        assert_eq!(row.status, ApplicationStatus::Applied);
        assert_eq!(row.applicant_id, Some(applicant_id));
        assert_eq!(row.job_id, Some(job.id));
        assert_eq!(row.cover_letter.as_deref(), Some("I fly well"));

        let expected = format!("documents/user_{}/My_CV.pdf", user_id);
        assert_eq!(row.resume.as_deref(), Some(expected.as_str()));
        assert!(media.path().join(&expected).exists());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn second_application_conflicts(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Pilot", company, None)).await.unwrap();
        let (user_id, _) = seed_applicant(&pool, "ada@mail.test").await;
        let media = tempfile::tempdir().unwrap();
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new(media.path()));

        service
            .apply(&user(user_id, true), job.id, upload("cv.pdf", None))
            .await
            .unwrap();
        let err = service
            .apply(&user(user_id, true), job.id, upload("cv.pdf", None))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict("You have previously applied for this job")));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApplicationRepository::list_for_job(&pool, job.id).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn company_user_may_not_apply(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Pilot", company, None)).await.unwrap();
        let media = tempfile::tempdir().unwrap();
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new(media.path()));

        let err = service
            .apply(&user(company, false), job.id, upload("cv.pdf", None))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden("You are not eligible to apply for this job")));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(ApplicationRepository::list_for_job(&pool, job.id).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn overlong_cover_letter_is_rejected_before_storing(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Pilot", company, None)).await.unwrap();
        let (user_id, _) = seed_applicant(&pool, "ada@mail.test").await;
        let media = tempfile::tempdir().unwrap();
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new(media.path()));

        let letter = "x".repeat(101);
        let err = service
            .apply(&user(user_id, true), job.id, upload("cv.pdf", Some(&letter)))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            ServiceError::ValidationError(fields) => {
                assert!(fields["cover_letter"]["errors"].is_array())
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(ApplicationRepository::list_for_job(&pool, job.id).await.unwrap().is_empty());
        assert!(!media.path().join("documents").exists());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_succeeds_when_resume_cleanup_fails(pool: Pool<Postgres>) {
        let company = jobs::seed_company(&pool, "hr@acme.test").await;
        let job = JobRepository::create(&pool, &jobs::job("Pilot", company, None)).await.unwrap();
        let (_, applicant_id) = seed_applicant(&pool, "ada@mail.test").await;
        let media = tempfile::tempdir().unwrap();
        // A directory in place of the file makes removal fail with something other than NotFound
        let resume = "documents/user_1/cv.pdf";
        std::fs::create_dir_all(media.path().join(resume)).unwrap();
        let row = ApplicationRepository::create(
            &pool,
            &NewApplication { applicant_id, job_id: job.id, resume: Some(resume), cover_letter: None },
        )
        .await
        .unwrap();
        let service = ApplicationService::new(pool.clone(), ResumeStorage::new(media.path()));

        service.delete(row.id).await.unwrap();
        assert!(ApplicationRepository::get_by_id(&pool, row.id).await.unwrap().is_none());
    }
}
