//! Request/response bodies.

use serde::{Deserialize, Serialize};

use supplychain_auth::PrincipalId;
use supplychain_core::ProductId;

#[derive(Debug, Clone, Deserialize)]
pub struct SetManagerRequest {
    pub manager: PrincipalId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManagerResponse {
    pub manager: Option<PrincipalId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: ProductId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferOwnershipRequest {
    pub new_owner: PrincipalId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
