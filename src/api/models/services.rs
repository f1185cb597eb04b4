//! API request/response models for bookable services.

use crate::db::models::services::ServiceDBResponse;
use crate::types::ServiceId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_active: bool,
}

impl From<ServiceDBResponse> for ServiceResponse {
    fn from(db: ServiceDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            price: db.price,
            is_active: db.is_active,
        }
    }
}
