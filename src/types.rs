//! Common type definitions.
//!
//! Entity identifiers are the store's `INTEGER PRIMARY KEY` rowids, aliased
//! per entity for readability at API boundaries:
//!
//! - [`UserId`]: user account identifier
//! - [`ServiceId`]: bookable service identifier
//! - [`ReservationId`]: reservation identifier
//! - [`ComplaintId`]: complaint identifier
//! - [`InvoiceId`]: invoice identifier

// Type aliases for IDs
pub type UserId = i64;
pub type ServiceId = i64;
pub type ReservationId = i64;
pub type ComplaintId = i64;
pub type InvoiceId = i64;
