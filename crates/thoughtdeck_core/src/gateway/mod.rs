//! Persistence gateway abstractions and SQLite implementation.
//!
//! # Responsibility
//! - Define the whole-collection save/load contract the store persists
//!   through.
//! - Isolate JSON encoding and key-value storage details from the store.
//!
//! # Invariants
//! - Saves overwrite the full collection blob or leave it untouched.
//! - Loads never fail: absent or unreadable blobs degrade to defaults.
//! - A loaded document collection always contains a task document.

pub mod collection_gateway;
