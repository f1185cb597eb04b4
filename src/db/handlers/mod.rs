//! Repositories, one per table, plus the dashboard aggregates.

pub mod complaints;
pub mod invoices;
pub mod repository;
pub mod reservations;
pub mod services;
pub mod stats;
pub mod users;

pub use complaints::Complaints;
pub use invoices::Invoices;
pub use repository::Repository;
pub use reservations::Reservations;
pub use services::Services;
pub use users::Users;
