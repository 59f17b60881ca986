use chrono::Utc;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::application::models::ApplicationStatus;
use crate::db::models::{ApplicationListing, ApplicationRow};

const APPLICATION_COLUMNS: &str =
    "id, applicant_id, job_id, applied_on, status, resume, cover_letter";

/// Fields of a new application row
pub struct NewApplication<'a> {
    pub applicant_id: i32,
    pub job_id: i32,
    pub resume: Option<&'a str>,
    pub cover_letter: Option<&'a str>,
}

/// Repository for Application database operations
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Insert an application in the `applied` state
    pub async fn create(
        pool: &Pool<Postgres>,
        application: &NewApplication<'_>,
    ) -> Result<ApplicationRow, sqlx::Error> {
        debug!(
            "Creating application: job_id={}, applicant_id={}",
            application.job_id, application.applicant_id
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO applications (applicant_id, job_id, applied_on, status, resume, cover_letter)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.applicant_id)
        .bind(application.job_id)
        .bind(Utc::now())
        .bind(ApplicationStatus::default())
        .bind(application.resume)
        .bind(application.cover_letter)
        .fetch_one(pool)
        .await?;

        debug!("Application created with id={}", row.id);
        Ok(row)
    }

    /// Whether the applicant already has an application for the job
    pub async fn exists(
        pool: &Pool<Postgres>,
        job_id: i32,
        applicant_id: i32,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND applicant_id = $2)",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(
        pool: &Pool<Postgres>,
        id: i32,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Applications for a job, oldest first, with the applicant's full name
    pub async fn list_for_job(
        pool: &Pool<Postgres>,
        job_id: i32,
    ) -> Result<Vec<ApplicationListing>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationListing>(
            r#"
            SELECT a.id, a.applicant_id, a.job_id, a.applied_on, a.status, a.resume, a.cover_letter,
                   u.full_name AS applicant_name
            FROM applications a
            LEFT JOIN applicants p ON p.id = a.applicant_id
            LEFT JOIN users u ON u.id = p.user_id
            WHERE a.job_id = $1
            ORDER BY a.applied_on, a.id
            "#,
        )
        .bind(job_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update_status(
        pool: &Pool<Postgres>,
        id: i32,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        debug!("Updating application {} status to {}", id, status.as_str());

        sqlx::query_as::<_, ApplicationRow>(&format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &Pool<Postgres>, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
