use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use supplychain_core::{ProductId, RegistryResult};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/count", get(total_products))
        .route("/:id", get(get_product))
        .route("/:id/logs", get(get_product_logs))
        .route("/:id/status", get(get_product_status).post(update_status))
        .route("/:id/owner", get(get_product_owner))
        .route("/:id/name", post(update_name))
        .route("/:id/transfer", post(transfer_ownership))
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

fn respond<T: serde::Serialize>(status: StatusCode, result: RegistryResult<T>) -> axum::response::Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::registry_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    caller: CallerContext,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let result = services
        .write(|reg| reg.create_product(caller.principal_id(), body.name, body.status))
        .map(|id| dto::CreatedResponse { id });
    respond(StatusCode::CREATED, result)
}

pub async fn transfer_ownership(
    Extension(services): Extension<Arc<AppServices>>,
    caller: CallerContext,
    Path(id): Path<String>,
    Json(body): Json<dto::TransferOwnershipRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .write(|reg| reg.transfer_ownership(caller.principal_id(), id, body.new_owner))
        .map(|()| dto::AckResponse::ok());
    respond(StatusCode::OK, result)
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    caller: CallerContext,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .write(|reg| reg.update_status(caller.principal_id(), id, body.status))
        .map(|()| dto::AckResponse::ok());
    respond(StatusCode::OK, result)
}

pub async fn update_name(
    Extension(services): Extension<Arc<AppServices>>,
    caller: CallerContext,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateNameRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .write(|reg| reg.update_name(caller.principal_id(), id, body.name))
        .map(|()| dto::AckResponse::ok());
    respond(StatusCode::OK, result)
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let result = services
        .read(|reg| reg.get_all_products())
        .map(|items| serde_json::json!({ "items": items }));
    respond(StatusCode::OK, result)
}

pub async fn total_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let result = services
        .read(|reg| reg.total_products())
        .map(|total| serde_json::json!({ "total": total }));
    respond(StatusCode::OK, result)
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.read(|reg| reg.get_product(id)))
}

pub async fn get_product_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .read(|reg| reg.get_product_logs(id))
        .map(|logs| serde_json::json!({ "logs": logs }));
    respond(StatusCode::OK, result)
}

pub async fn get_product_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .read(|reg| reg.get_product_status(id))
        .map(|status| serde_json::json!({ "status": status }));
    respond(StatusCode::OK, result)
}

pub async fn get_product_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let result = services
        .read(|reg| reg.get_product_owner(id))
        .map(|owner| serde_json::json!({ "owner": owner }));
    respond(StatusCode::OK, result)
}
