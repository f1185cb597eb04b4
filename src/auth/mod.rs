//! Authentication and authorization.
//!
//! Browser-based authentication using secure HTTP-only cookies:
//! - Users log in via `/login` with email/password
//! - A signed JWT is stored in an HTTP-only cookie
//! - Every request re-verifies the token; nothing is stored server-side
//!
//! Authorization is two-tiered: admins get the aggregate views and status
//! overrides, everyone else operates on rows they own. Handlers enforce
//! ownership; the [`current_user::RequireAdmin`] extractor enforces the
//! admin tier.
//!
//! # Modules
//!
//! - [`current_user`]: Extractors for getting the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`session`]: JWT session token creation and verification

pub mod current_user;
pub mod password;
pub mod session;
