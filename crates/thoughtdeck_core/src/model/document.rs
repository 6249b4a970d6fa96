//! Document domain model.
//!
//! # Responsibility
//! - Define the named text container cards are merged into.
//! - Distinguish the singular task document from regular documents.
//!
//! # Invariants
//! - `id` is stable and never reused for another document.
//! - `is_task_document` is fixed at creation and never flipped.
//! - At least one task document must exist after any load or store
//!   initialization (synthesized when missing, see gateway and store).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every document.
pub type DocumentId = Uuid;

/// Display name of the synthesized default task document.
pub const TASK_DOCUMENT_NAME: &str = "Tasks";

/// A named text body, either free-form or the distinguished task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable global ID used for card assignment and persistence.
    pub id: DocumentId,
    /// Display label chosen at creation.
    pub name: String,
    /// Free-form body. Card moves append or insert into it; the editor
    /// overwrites it wholesale.
    #[serde(default)]
    pub content: String,
    /// Marks the task list. Moves into a task document format content as
    /// bulleted lines instead of free-text insertion.
    #[serde(rename = "isTaskDocument", default)]
    pub is_task_document: bool,
    /// Set at creation. Serialized as RFC 3339 with fractional seconds.
    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
}

impl Document {
    /// Creates a regular document with a generated stable ID and empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a regular document with a caller-provided stable ID.
    pub fn with_id(id: DocumentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: String::new(),
            is_task_document: false,
            creation_date: Utc::now(),
        }
    }

    /// Creates the synthesized default task document.
    ///
    /// Used by the gateway load path and store initialization whenever the
    /// persisted collection carries no task document.
    pub fn task_default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: TASK_DOCUMENT_NAME.to_string(),
            content: String::new(),
            is_task_document: true,
            creation_date: Utc::now(),
        }
    }
}

// Identity equality, matching `Card`.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}
