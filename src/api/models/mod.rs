pub mod admin;
pub mod complaints;
pub mod invoices;
pub mod reservations;
pub mod services;
pub mod users;
