//! Card domain model.
//!
//! # Responsibility
//! - Define the captured-thought record shown in the unsorted stream.
//! - Provide lifecycle helpers for document assignment.
//!
//! # Invariants
//! - `id` is stable and never reused for another card.
//! - `creation_date` is set once at construction and never mutated.
//! - `document_id = None` means the card sits in the capture stream.

use crate::model::document::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every card.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CardId = Uuid;

/// A short captured thought, optionally assigned to a document.
///
/// Cards are value snapshots: the store hands out clones on query and
/// accepts mutations only through id-keyed commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Stable global ID used for drag-and-drop resolution and persistence.
    pub id: CardId,
    /// Free-form text, replaced wholesale rather than partially edited.
    pub content: String,
    /// Set at creation. Serialized as RFC 3339 with fractional seconds so
    /// ordering and equality survive a reload.
    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
    /// Back-reference to the owning document; `None` = unassigned.
    #[serde(rename = "documentID", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
}

impl Card {
    /// Creates an unassigned card with a generated stable ID.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    /// Creates a card with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: CardId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            creation_date: Utc::now(),
            document_id: None,
        }
    }

    /// Returns whether this card still sits in the capture stream.
    pub fn is_unassigned(&self) -> bool {
        self.document_id.is_none()
    }
}

// Identity equality: two cards are the same card iff their IDs match,
// regardless of content or creation date.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}
