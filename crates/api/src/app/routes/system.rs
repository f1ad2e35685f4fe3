use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::context::CallerContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(caller: CallerContext) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": caller.principal_id().to_string(),
    }))
}
