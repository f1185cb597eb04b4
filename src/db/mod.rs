//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx over a single-file
//! SQLite store. It follows the Repository pattern to provide clean
//! abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries & mutations)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Connection discipline
//!
//! Repositories never own a pool. Each wraps a `&mut SqliteConnection`, so the
//! caller decides whether operations run on a plain pooled connection or
//! inside a transaction, and the handle is released on every exit path when it
//! drops:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Users::new(&mut tx);
//! let user = repo.create(&create_request).await?;
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! The schema lives in `migrations/` and is applied idempotently with
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
pub mod pool;
