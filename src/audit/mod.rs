//! Audit trail
//!
//! Every create, update and delete performed by the services is appended to
//! `audit.log` as one JSON line. Bulk instance generation is recorded as a
//! single `Generate` entry carrying the instance count.

mod diff;
mod entry;
mod logger;

pub use diff::changed_fields;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
