use axum::{routing::get, Router};

pub mod manager;
pub mod products;
pub mod system;

/// Router for all registry endpoints.
///
/// Queries are public; mutating handlers require a [`crate::context::CallerContext`].
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/manager", manager::router())
        .nest("/products", products::router())
}
