use actix_web::{
    delete, get, post, put,
    web::{Data, Path, Query, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use crate::api::application::handlers::job_application_config;
use crate::api::error::ServiceError;
use super::{Job, JobFilter, JobService};

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    filter: Query<JobFilter>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(&filter).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<Job>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/choices")]
async fn job_choices(service: Data<JobService>) -> HttpResponse {
    HttpResponse::Ok().json(service.choices())
}

#[get("/{id}")]
async fn get_job(service: Data<JobService>, id: Path<i32>) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[put("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<i32>,
    job: Json<Job>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.update_job(id.into_inner(), &job).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
async fn delete_job(service: Data<JobService>, id: Path<i32>) -> Result<HttpResponse, ServiceError> {
    service.delete_job(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Canonical location of a posting
#[get("/job/{slug}")]
async fn job_by_slug(
    service: Data<JobService>,
    slug: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(job))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(job_by_slug).service(
        scope("jobs")
            .service(list_jobs)
            .service(create_job)
            .service(job_choices)
            .service(get_job)
            .service(update_job)
            .service(delete_job)
            .configure(job_application_config),
    );
}
