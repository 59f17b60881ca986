use actix_multipart::form::MultipartFormConfig;
use actix_web::{error::JsonPayloadError, http::StatusCode, web, HttpResponse, ResponseError};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

/// Per-field messages in the shape `{"field": {"errors": [...]}}`
pub fn field_messages(validation_errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();

    for (field, errors) in validation_errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }

    serde_json::Value::Object(fields)
}

fn error_response(status: StatusCode, error: &str, fields: serde_json::Value) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        "",
        HttpResponse::build(status).json(ErrorResponse {
            error: error.to_string(),
            fields,
        }),
    )
    .into()
}

fn bad_request(error: &str, fields: serde_json::Value) -> actix_web::Error {
    error_response(StatusCode::BAD_REQUEST, error, fields)
}

/// Client-facing message for a JSON body serde could not deserialize
fn deserialize_message(err_string: &str) -> &'static str {
    if err_string.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload"
    } else if err_string.contains("unknown variant") {
        "Invalid enum value. Check allowed values for this field"
    } else if err_string.contains("missing field") {
        "A required field is missing"
    } else {
        "Invalid JSON format"
    }
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            bad_request("Validation failed", field_messages(&validation_errors))
        }
        actix_web_validator::Error::JsonPayloadError(JsonPayloadError::Deserialize(de_err)) => {
            bad_request(
                "Request validation failed",
                serde_json::json!({"message": deserialize_message(&de_err.to_string())}),
            )
        }
        actix_web_validator::Error::Deserialize(de_err) => bad_request(
            "Request validation failed",
            serde_json::json!({"message": deserialize_message(&de_err.to_string())}),
        ),
        other => bad_request(
            "Validation failed",
            serde_json::json!({"message": other.to_string()}),
        ),
    })
}

/// Query string errors, e.g. `?industry=abc`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        bad_request(
            "Invalid query parameters",
            serde_json::json!({"message": err.to_string()}),
        )
    })
}

/// Path segment errors, e.g. `/jobs/abc`
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        bad_request(
            "Invalid path parameter",
            serde_json::json!({"message": err.to_string()}),
        )
    })
}

/// Multipart form errors keep their status (400 or 413) but use the common body
pub fn multipart_config(total_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(total_limit)
        .error_handler(|err, _req| {
            error_response(
                err.status_code(),
                "Invalid form submission",
                serde_json::json!({"message": err.to_string()}),
            )
        })
}
