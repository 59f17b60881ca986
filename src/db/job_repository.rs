use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::{Job, JobFilter};
use crate::db::models::JobRow;
use crate::slug::slugify;

const JOB_COLUMNS: &str = "id, title, slug, industry_id, company_id, job_type, min_qualification, \
     years_of_exp, salary, description, posted_on, updated_on";

/// Repository for Job database operations
///
/// Every write goes through `create` or `update`, and both derive the slug
/// from the title being written, so a stored slug always matches its title.
pub struct JobRepository;

impl JobRepository {
    /// Insert a new job, stamping `posted_on` and `updated_on` with the same instant
    pub async fn create(pool: &Pool<Postgres>, job: &Job) -> Result<JobRow, sqlx::Error> {
        let slug = slugify(&job.title);
        let now = Utc::now();
        debug!("Creating job: title={}, slug={}", job.title, slug);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (title, slug, industry_id, company_id, job_type, min_qualification,
                              years_of_exp, salary, description, posted_on, updated_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(&slug)
        .bind(job.industry_id)
        .bind(job.company_id)
        .bind(job.job_type)
        .bind(job.min_qualification)
        .bind(job.years_of_exp)
        .bind(job.salary)
        .bind(&job.description)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    /// Re-save an existing job. `posted_on` is left untouched.
    pub async fn update(
        pool: &Pool<Postgres>,
        id: i32,
        job: &Job,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        let slug = slugify(&job.title);
        debug!("Updating job {}: title={}, slug={}", id, job.title, slug);

        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET title = $2, slug = $3, industry_id = $4, company_id = $5, job_type = $6,
                min_qualification = $7, years_of_exp = $8, salary = $9, description = $10,
                updated_on = $11
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&job.title)
        .bind(&slug)
        .bind(job.industry_id)
        .bind(job.company_id)
        .bind(job.job_type)
        .bind(job.min_qualification)
        .bind(job.years_of_exp)
        .bind(job.salary)
        .bind(&job.description)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }

    pub async fn get_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Slugs are not unique; the oldest job wins when several share one
    pub async fn get_by_slug(
        pool: &Pool<Postgres>,
        slug: &str,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE slug = $1 ORDER BY id LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    /// List jobs newest first, narrowed by whichever filters are set
    pub async fn list(pool: &Pool<Postgres>, filter: &JobFilter) -> Result<Vec<JobRow>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE TRUE"));

        if let Some(industry) = filter.industry {
            query.push(" AND industry_id = ").push_bind(industry);
        }
        if let Some(company) = filter.company {
            query.push(" AND company_id = ").push_bind(company);
        }
        if let Some(job_type) = filter.job_type {
            query.push(" AND job_type = ").push_bind(job_type);
        }
        query.push(" ORDER BY posted_on DESC, id DESC");

        let rows = query.build_query_as::<JobRow>().fetch_all(pool).await?;
        debug!("Listed {} jobs", rows.len());
        Ok(rows)
    }

    /// Delete a job; its applications go with it
    pub async fn delete(pool: &Pool<Postgres>, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
