//! HTTP surface: request/response models and the handlers behind each route.

pub mod handlers;
pub mod models;
