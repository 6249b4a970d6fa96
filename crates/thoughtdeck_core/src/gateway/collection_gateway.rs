//! Collection gateway contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Serialize the card and document collections to JSON blobs under
//!   fixed storage keys.
//! - Supply default seed data when a blob is absent or unreadable.
//!
//! # Invariants
//! - `save_*` either replaces the whole stored blob or returns an error
//!   leaving the prior stored value untouched.
//! - `load_*` is infallible at the call site: failures are logged and
//!   degrade to the same defaults as an absent blob.
//! - `load_documents` appends a synthesized task document whenever the
//!   decoded collection carries none.

use crate::db::DbError;
use crate::model::card::Card;
use crate::model::document::Document;
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Storage keys carried over from the original persisted layout, so
// existing data keeps loading.
const CARDS_KEY: &str = "saved_cards";
const DOCUMENTS_KEY: &str = "saved_documents";

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by gateway save operations.
///
/// Load paths never surface these; they degrade to defaults internally.
#[derive(Debug)]
pub enum GatewayError {
    /// Collection could not be serialized. Stored value is untouched.
    Encode(serde_json::Error),
    /// Underlying SQLite write failure.
    Db(DbError),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence interface the store saves and loads
/// through.
///
/// Implementations must keep the two collections independently keyed so a
/// failed card save never clobbers documents, and vice versa.
pub trait CollectionGateway {
    fn save_cards(&self, cards: &[Card]) -> GatewayResult<()>;
    fn save_documents(&self, documents: &[Document]) -> GatewayResult<()>;
    fn load_cards(&self) -> Vec<Card>;
    fn load_documents(&self) -> Vec<Document>;
}

/// SQLite-backed collection gateway.
///
/// Owns a migrated connection (see `db::open_db`) and stores each
/// collection as one JSON array blob in the `collections` table.
pub struct SqliteCollectionGateway {
    conn: Connection,
}

impl SqliteCollectionGateway {
    /// Wraps a migrated connection obtained from `db::open_db` or
    /// `db::open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn write_blob(&self, key: &str, json: &str) -> GatewayResult<()> {
        self.conn.execute(
            "INSERT INTO collections (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, json],
        )?;
        Ok(())
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()
    }
}

impl CollectionGateway for SqliteCollectionGateway {
    fn save_cards(&self, cards: &[Card]) -> GatewayResult<()> {
        let json = serde_json::to_string(cards).map_err(GatewayError::Encode)?;
        self.write_blob(CARDS_KEY, &json)
    }

    fn save_documents(&self, documents: &[Document]) -> GatewayResult<()> {
        let json = serde_json::to_string(documents).map_err(GatewayError::Encode)?;
        self.write_blob(DOCUMENTS_KEY, &json)
    }

    fn load_cards(&self) -> Vec<Card> {
        match self.read_blob(CARDS_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(cards) => cards,
                Err(err) => {
                    error!(
                        "event=load_cards module=gateway status=error error_code=decode_failed error={err}"
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                error!(
                    "event=load_cards module=gateway status=error error_code=db_read_failed error={err}"
                );
                Vec::new()
            }
        }
    }

    fn load_documents(&self) -> Vec<Document> {
        match self.read_blob(DOCUMENTS_KEY) {
            Ok(None) => default_documents(),
            Ok(Some(json)) => match serde_json::from_str::<Vec<Document>>(&json) {
                Ok(mut documents) => {
                    if !documents.iter().any(|document| document.is_task_document) {
                        documents.push(Document::task_default());
                    }
                    documents
                }
                Err(err) => {
                    error!(
                        "event=load_documents module=gateway status=error error_code=decode_failed error={err}"
                    );
                    default_documents()
                }
            },
            Err(err) => {
                error!(
                    "event=load_documents module=gateway status=error error_code=db_read_failed error={err}"
                );
                default_documents()
            }
        }
    }
}

fn default_documents() -> Vec<Document> {
    vec![Document::task_default()]
}
