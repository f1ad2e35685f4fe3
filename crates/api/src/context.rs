use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use supplychain_auth::PrincipalId;

use crate::app::errors;

/// Authenticated caller for a request.
///
/// Inserted by the auth middleware when a valid bearer token is present.
/// Handlers that mutate state take this as an extractor; it rejects with
/// `401` when the request carried no token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    principal_id: PrincipalId,
}

impl CallerContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerContext>()
            .copied()
            .ok_or_else(|| {
                errors::json_error(
                    StatusCode::UNAUTHORIZED,
                    "unauthenticated",
                    "a bearer token is required for this operation",
                )
            })
    }
}
