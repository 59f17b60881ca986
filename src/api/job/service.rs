use sqlx::{Pool, Postgres};
use tracing::{info, warn};

use crate::api::error::ServiceError;
use crate::db::job_repository::JobRepository;
use crate::db::models::JobRow;
use super::dto::{ChoicesResponse, JobResponse};
use super::models::{Job, JobFilter};

/// Job service containing business logic
pub struct JobService {
    pool: Pool<Postgres>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a single job. The payload is validated by the extractor.
    pub async fn create_job(&self, job: &Job) -> Result<JobResponse, ServiceError> {
        info!("Service: Creating job with title={}", job.title);

        let job_row = JobRepository::create(&self.pool, job).await?;

        info!("Service: Job created successfully with id={}", job_row.id);
        Ok(JobResponse::new("Job created successfully", job_row))
    }

    /// Re-save a job from a full payload; slug and `updated_on` are refreshed
    pub async fn update_job(&self, id: i32, job: &Job) -> Result<JobResponse, ServiceError> {
        info!("Service: Updating job {}", id);

        let job_row = JobRepository::update(&self.pool, id, job)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", id))?;

        Ok(JobResponse::new("Job updated successfully", job_row))
    }

    pub async fn get_job(&self, id: i32) -> Result<JobRow, ServiceError> {
        JobRepository::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", id))
    }

    pub async fn get_job_by_slug(&self, slug: &str) -> Result<JobRow, ServiceError> {
        JobRepository::get_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| ServiceError::not_found("Job", slug))
    }

    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRow>, ServiceError> {
        Ok(JobRepository::list(&self.pool, filter).await?)
    }

    pub async fn delete_job(&self, id: i32) -> Result<(), ServiceError> {
        if JobRepository::delete(&self.pool, id).await? {
            info!("Service: Job {} deleted", id);
            Ok(())
        } else {
            warn!("Service: Delete requested for missing job {}", id);
            Err(ServiceError::not_found("Job", id))
        }
    }

    /// Value/label pairs of every choice field
    pub fn choices(&self) -> ChoicesResponse {
        ChoicesResponse::build()
    }
}
