//! Note store orchestration layer.
//!
//! # Responsibility
//! - Own the in-memory card and document collections.
//! - Persist every observed mutation through the collection gateway.
//!
//! # Invariants
//! - The store is the sole mutator of both collections.
//! - Queries return cloned snapshots, never live references.

pub mod note_store;
