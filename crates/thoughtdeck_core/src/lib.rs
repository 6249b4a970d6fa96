//! Core data model for ThoughtDeck.
//! This crate is the single source of truth for note-capture invariants.

pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod store;

pub use gateway::collection_gateway::{
    CollectionGateway, GatewayError, GatewayResult, SqliteCollectionGateway,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{Card, CardId};
pub use model::document::{Document, DocumentId, TASK_DOCUMENT_NAME};
pub use store::note_store::{MutationOutcome, NoteStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
