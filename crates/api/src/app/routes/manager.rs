use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new().route("/", get(get_manager).put(set_manager))
}

pub async fn get_manager(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|reg| Ok(reg.get_manager())) {
        Ok(manager) => (StatusCode::OK, Json(dto::ManagerResponse { manager })).into_response(),
        Err(e) => errors::registry_error_to_response(e),
    }
}

pub async fn set_manager(
    Extension(services): Extension<Arc<AppServices>>,
    caller: CallerContext,
    Json(body): Json<dto::SetManagerRequest>,
) -> axum::response::Response {
    match services.write(|reg| reg.set_manager(caller.principal_id(), body.manager)) {
        Ok(()) => (StatusCode::OK, Json(dto::AckResponse::ok())).into_response(),
        Err(e) => errors::registry_error_to_response(e),
    }
}
