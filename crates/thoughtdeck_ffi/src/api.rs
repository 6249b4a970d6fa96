//! FFI use-case API for the UI-facing store contract.
//!
//! # Responsibility
//! - Expose the store operations (add/assign/unassign/move/delete plus
//!   snapshot queries) as stable, synchronous functions.
//! - Keep error semantics simple: reference misses and invalid ids map to
//!   `false` or empty values, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Query results are JSON snapshots of plain record data.
//! - All mutations funnel through one process-global store, preserving
//!   the single-writer contract.

use std::sync::{Mutex, OnceLock};
use thoughtdeck_core::db::open_db;
use thoughtdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    MutationOutcome, NoteStore, SqliteCollectionGateway,
};
use uuid::Uuid;

static STORE: OnceLock<Mutex<NoteStore<SqliteCollectionGateway>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(&level, &log_dir) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

/// Opens the store database and loads both collections into the
/// process-global store.
///
/// # FFI contract
/// - Sync call; performs local file I/O.
/// - Idempotent: repeated calls after a successful init are no-ops.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String) -> String {
    if STORE.get().is_some() {
        return String::new();
    }
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return format!("failed to open store database: {err}"),
    };
    let store = NoteStore::initialize(SqliteCollectionGateway::new(conn));
    // A concurrent initializer may have won the race; its store is kept.
    let _ = STORE.set(Mutex::new(store));
    String::new()
}

/// Creates a card in the capture stream.
///
/// # FFI contract
/// - Returns the new card id as a UUID string, or empty string when the
///   store is not initialized.
#[flutter_rust_bridge::frb(sync)]
pub fn add_card(content: String) -> String {
    with_store(String::new(), |store| store.add_card(content).to_string())
}

/// Creates a regular document.
///
/// # FFI contract
/// - Returns the new document id as a UUID string, or empty string when
///   the store is not initialized.
#[flutter_rust_bridge::frb(sync)]
pub fn add_document(name: String) -> String {
    with_store(String::new(), |store| store.add_document(name).to_string())
}

/// Assigns a card to a document.
///
/// # FFI contract
/// - Returns `true` when applied; `false` on reference miss, malformed
///   id, or uninitialized store.
#[flutter_rust_bridge::frb(sync)]
pub fn assign_card(card_id: String, document_id: String) -> bool {
    let (Some(card_id), Some(document_id)) = (parse_id(&card_id), parse_id(&document_id)) else {
        return false;
    };
    with_store(false, |store| {
        store.assign_card(card_id, document_id) == MutationOutcome::Applied
    })
}

/// Returns a card to the capture stream.
///
/// # FFI contract
/// - Returns `true` when applied; `false` otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn unassign_card(card_id: String) -> bool {
    let Some(card_id) = parse_id(&card_id) else {
        return false;
    };
    with_store(false, |store| {
        store.unassign_card(card_id) == MutationOutcome::Applied
    })
}

/// Merges a card's content into a document and deletes the card.
///
/// `position` is a character offset for regular documents; pass `None`
/// to append. Task documents always append a bulleted line.
///
/// # FFI contract
/// - Returns `true` when applied; `false` otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn move_card_to_document(card_id: String, document_id: String, position: Option<u32>) -> bool {
    let (Some(card_id), Some(document_id)) = (parse_id(&card_id), parse_id(&document_id)) else {
        return false;
    };
    with_store(false, |store| {
        store.move_card_content_to_document(card_id, document_id, position.map(|p| p as usize))
            == MutationOutcome::Applied
    })
}

/// Deletes a document after unassigning its cards.
///
/// The UI is responsible for never offering the task document here.
///
/// # FFI contract
/// - Returns `true` when applied; `false` otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_document(document_id: String) -> bool {
    let Some(document_id) = parse_id(&document_id) else {
        return false;
    };
    with_store(false, |store| {
        store.delete_document(document_id) == MutationOutcome::Applied
    })
}

/// Overwrites a document body wholesale, as the editor does.
///
/// # FFI contract
/// - Returns `true` when applied; `false` otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn update_document_content(document_id: String, content: String) -> bool {
    let Some(document_id) = parse_id(&document_id) else {
        return false;
    };
    with_store(false, |store| {
        store.update_document_content(document_id, content) == MutationOutcome::Applied
    })
}

/// Returns the capture-stream cards as a JSON array snapshot.
///
/// # FFI contract
/// - Returns `"[]"` when the store is not initialized.
#[flutter_rust_bridge::frb(sync)]
pub fn unassigned_cards_json() -> String {
    with_store("[]".to_string(), |store| to_json(&store.unassigned_cards()))
}

/// Returns the cards assigned to one document as a JSON array snapshot.
///
/// # FFI contract
/// - Returns `"[]"` on malformed id or uninitialized store.
#[flutter_rust_bridge::frb(sync)]
pub fn cards_for_document_json(document_id: String) -> String {
    let Some(document_id) = parse_id(&document_id) else {
        return "[]".to_string();
    };
    with_store("[]".to_string(), |store| {
        to_json(&store.cards_for_document(document_id))
    })
}

/// Returns all documents as a JSON array snapshot, insertion order.
///
/// # FFI contract
/// - Returns `"[]"` when the store is not initialized.
#[flutter_rust_bridge::frb(sync)]
pub fn documents_json() -> String {
    with_store("[]".to_string(), |store| to_json(&store.documents()))
}

/// Returns the task document id as a UUID string.
///
/// # FFI contract
/// - Returns empty string when the store is not initialized. After a
///   successful `init_store` a task document always exists.
#[flutter_rust_bridge::frb(sync)]
pub fn task_document_id() -> String {
    with_store(String::new(), |store| {
        store
            .task_document()
            .map(|document| document.id.to_string())
            .unwrap_or_default()
    })
}

fn with_store<T>(
    fallback: T,
    operation: impl FnOnce(&mut NoteStore<SqliteCollectionGateway>) -> T,
) -> T {
    let Some(store) = STORE.get() else {
        log::debug!("event=ffi_call module=ffi status=noop error_code=store_uninitialized");
        return fallback;
    };
    match store.lock() {
        Ok(mut guard) => operation(&mut guard),
        // A poisoned lock means a panic mid-mutation; degrade instead of
        // propagating the panic across the boundary.
        Err(_) => {
            log::error!("event=ffi_call module=ffi status=error error_code=store_lock_poisoned");
            fallback
        }
    }
}

fn parse_id(value: &str) -> Option<Uuid> {
    match Uuid::parse_str(value.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            log::debug!("event=ffi_call module=ffi status=noop error_code=invalid_id");
            None
        }
    }
}

fn to_json<T: serde::Serialize>(records: &T) -> String {
    serde_json::to_string(records).unwrap_or_else(|err| {
        log::error!("event=ffi_snapshot module=ffi status=error error={err}");
        "[]".to_string()
    })
}
