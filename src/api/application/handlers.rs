use actix_multipart::form::MultipartForm;
use actix_web::{
    delete, get, patch, post,
    web::{Data, Path, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use crate::api::error::ServiceError;
use crate::api::identity::CurrentUser;
use super::models::{ApplicationUpload, StatusUpdate};
use super::ApplicationService;

#[get("/{id}/has-applied")]
async fn has_applied(
    service: Data<ApplicationService>,
    user: CurrentUser,
    job_id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.check_job(&user, job_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{id}/applications")]
async fn list_applications(
    service: Data<ApplicationService>,
    job_id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let applications = service.list_for_job(job_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[post("/{id}/applications")]
async fn apply(
    service: Data<ApplicationService>,
    user: CurrentUser,
    job_id: Path<i32>,
    MultipartForm(upload): MultipartForm<ApplicationUpload>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.apply(&user, job_id.into_inner(), upload).await?;
    Ok(HttpResponse::Created().json(response))
}

#[patch("/{id}/status")]
async fn update_status(
    service: Data<ApplicationService>,
    id: Path<i32>,
    body: Json<StatusUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let row = service.update_status(id.into_inner(), body.status).await?;
    Ok(HttpResponse::Ok().json(row))
}

#[delete("/{id}")]
async fn delete_application(
    service: Data<ApplicationService>,
    id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Routes nested under a job; registered inside the `jobs` scope
pub fn job_application_config(config: &mut ServiceConfig) {
    config
        .service(has_applied)
        .service(list_applications)
        .service(apply);
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(
        scope("applications")
            .service(update_status)
            .service(delete_application),
    );
}
