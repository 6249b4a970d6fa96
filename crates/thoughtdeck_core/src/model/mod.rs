//! Domain records for the capture stream and document list.
//!
//! # Responsibility
//! - Define the two persisted record types: `Card` and `Document`.
//! - Fix identity and creation-time semantics at construction.
//!
//! # Invariants
//! - Every record is identified by a stable UUID set once at creation.
//! - Record equality is identity-based (`id` only); content and dates do
//!   not participate.

pub mod card;
pub mod document;
