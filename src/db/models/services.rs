//! Database models for services.

use crate::api::models::services::{ServiceCreate, ServiceUpdate};
use crate::types::ServiceId;
use sqlx::FromRow;

/// Database request for creating a new service
#[derive(Debug, Clone)]
pub struct ServiceCreateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl From<ServiceCreate> for ServiceCreateDBRequest {
    fn from(api: ServiceCreate) -> Self {
        Self {
            name: api.name,
            description: api.description,
            price: api.price,
        }
    }
}

/// Database request for partially updating a service
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

impl From<ServiceUpdate> for ServiceUpdateDBRequest {
    fn from(api: ServiceUpdate) -> Self {
        Self {
            name: api.name,
            description: api.description,
            price: api.price,
            is_active: api.is_active,
        }
    }
}

/// Database response for a service
#[derive(Debug, Clone, FromRow)]
pub struct ServiceDBResponse {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_active: bool,
}

/// List filter. `active_only` hides deactivated services from guests while
/// the admin listing sees everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceFilter {
    pub active_only: bool,
}
