use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use supplychain_core::RegistryError;

pub fn registry_error_to_response(err: RegistryError) -> axum::response::Response {
    let status = match &err {
        RegistryError::NoManager(_) => StatusCode::CONFLICT,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Unauthorized(_) => StatusCode::FORBIDDEN,
        RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.code(), err.message())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
