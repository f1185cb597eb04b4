//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod invoices;
pub mod reservations;
pub mod services;
