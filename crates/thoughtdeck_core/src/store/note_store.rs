//! Note store: the mutable source of truth for cards and documents.
//!
//! # Responsibility
//! - Provide the synchronous command/query surface the UI layer calls.
//! - Trigger whole-collection persistence after every mutation.
//!
//! # Invariants
//! - At least one task document exists after `initialize`.
//! - Insertion order of both collections is preserved for display.
//! - Reference misses are silent no-ops: both collections stay
//!   structurally unchanged and no error crosses the store boundary.
//! - Persistence failures are logged and swallowed; in-memory state is
//!   never rolled back or corrupted by a failed save.

use crate::gateway::collection_gateway::CollectionGateway;
use crate::model::card::{Card, CardId};
use crate::model::document::{Document, DocumentId};
use log::{debug, error, info};

/// Status of an id-keyed store command.
///
/// `ReferenceMiss` replaces the silent no-op of the store contract with an
/// observable value, so callers can surface telemetry without the store
/// ever raising an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The command found its target(s) and mutated the collections.
    Applied,
    /// A referenced card or document id was absent; nothing changed.
    ReferenceMiss,
}

/// In-memory store over the two record collections, persisting through a
/// gateway on every mutation.
///
/// All operations are synchronous and complete before returning. The
/// store expects a single-writer calling discipline (one UI thread); it
/// holds no interior locking of its own.
pub struct NoteStore<G: CollectionGateway> {
    gateway: G,
    cards: Vec<Card>,
    documents: Vec<Document>,
}

impl<G: CollectionGateway> NoteStore<G> {
    /// Loads both collections from the gateway and enforces the
    /// task-document invariant.
    ///
    /// # Contract
    /// - If the loaded documents carry no task document, a default one
    ///   named "Tasks" is appended and the collection is persisted.
    pub fn initialize(gateway: G) -> Self {
        let cards = gateway.load_cards();
        let documents = gateway.load_documents();
        let mut store = Self {
            gateway,
            cards,
            documents,
        };

        // The gateway load path already synthesizes a task document, but a
        // custom gateway may not; the invariant is enforced here as well.
        if !store
            .documents
            .iter()
            .any(|document| document.is_task_document)
        {
            store.documents.push(Document::task_default());
            store.persist_documents();
        }

        info!(
            "event=store_init module=store status=ok cards={} documents={}",
            store.cards.len(),
            store.documents.len()
        );
        store
    }

    /// Returns all cards in insertion order.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.clone()
    }

    /// Returns the cards sitting in the capture stream, insertion order.
    pub fn unassigned_cards(&self) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.is_unassigned())
            .cloned()
            .collect()
    }

    /// Returns the cards assigned to the given document, insertion order.
    pub fn cards_for_document(&self, document_id: DocumentId) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.document_id == Some(document_id))
            .cloned()
            .collect()
    }

    /// Returns all documents in insertion order.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.clone()
    }

    /// Returns one document by id.
    pub fn document(&self, document_id: DocumentId) -> Option<Document> {
        self.documents
            .iter()
            .find(|document| document.id == document_id)
            .cloned()
    }

    /// Returns the first task document.
    pub fn task_document(&self) -> Option<Document> {
        self.documents
            .iter()
            .find(|document| document.is_task_document)
            .cloned()
    }

    /// Appends a fresh unassigned card and persists the card collection.
    ///
    /// # Contract
    /// - Content emptiness is the caller's responsibility; the store does
    ///   not validate it.
    /// - Returns the generated stable card ID.
    pub fn add_card(&mut self, content: impl Into<String>) -> CardId {
        let card = Card::new(content);
        let id = card.id;
        self.cards.push(card);
        self.persist_cards();
        id
    }

    /// Appends a fresh regular document and persists the document
    /// collection.
    ///
    /// Returns the generated stable document ID.
    pub fn add_document(&mut self, name: impl Into<String>) -> DocumentId {
        let document = Document::new(name);
        let id = document.id;
        self.documents.push(document);
        self.persist_documents();
        id
    }

    /// Assigns a card to a document by setting its back-reference.
    ///
    /// The document id is not resolved: assignment tolerates transient
    /// dangling references by design.
    pub fn assign_card(&mut self, card_id: CardId, document_id: DocumentId) -> MutationOutcome {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == card_id) else {
            debug!(
                "event=assign_card module=store status=noop error_code=reference_miss card_id={card_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };
        card.document_id = Some(document_id);
        self.persist_cards();
        MutationOutcome::Applied
    }

    /// Returns a card to the capture stream.
    pub fn unassign_card(&mut self, card_id: CardId) -> MutationOutcome {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == card_id) else {
            debug!(
                "event=unassign_card module=store status=noop error_code=reference_miss card_id={card_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };
        card.document_id = None;
        self.persist_cards();
        MutationOutcome::Applied
    }

    /// Merges a card's content into a document body and deletes the card.
    ///
    /// # Contract
    /// - Task document: content is appended as a bulleted line; `position`
    ///   is ignored.
    /// - Regular document with `position`: content is inserted at that
    ///   character offset, clamped to the end of the body.
    /// - Regular document without `position`: content replaces an empty
    ///   body, or is appended after a blank line otherwise.
    /// - The card is removed from the collection afterwards (deletion,
    ///   not unassignment). Assignment state is irrelevant to
    ///   eligibility.
    /// - If either id is absent, nothing changes.
    pub fn move_card_content_to_document(
        &mut self,
        card_id: CardId,
        document_id: DocumentId,
        position: Option<usize>,
    ) -> MutationOutcome {
        let Some(document_index) = self
            .documents
            .iter()
            .position(|document| document.id == document_id)
        else {
            debug!(
                "event=move_card module=store status=noop error_code=reference_miss document_id={document_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };
        let Some(card_index) = self.cards.iter().position(|card| card.id == card_id) else {
            debug!(
                "event=move_card module=store status=noop error_code=reference_miss card_id={card_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };

        let card = self.cards.remove(card_index);
        let document = &mut self.documents[document_index];

        if document.is_task_document {
            if document.content.is_empty() {
                document.content = format!("• {}", card.content);
            } else {
                document.content.push_str("\n• ");
                document.content.push_str(&card.content);
            }
        } else if let Some(position) = position {
            insert_at_char_offset(&mut document.content, &card.content, position);
        } else if document.content.is_empty() {
            document.content = card.content;
        } else {
            document.content.push_str("\n\n");
            document.content.push_str(&card.content);
        }

        self.persist_documents();
        self.persist_cards();
        MutationOutcome::Applied
    }

    /// Deletes a document after returning all its cards to the capture
    /// stream.
    ///
    /// Refusing to delete the task document is the caller's
    /// responsibility; the store applies the same cascade to it.
    pub fn delete_document(&mut self, document_id: DocumentId) -> MutationOutcome {
        let Some(index) = self
            .documents
            .iter()
            .position(|document| document.id == document_id)
        else {
            debug!(
                "event=delete_document module=store status=noop error_code=reference_miss document_id={document_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };

        let mut unassigned = 0usize;
        for card in self
            .cards
            .iter_mut()
            .filter(|card| card.document_id == Some(document_id))
        {
            card.document_id = None;
            unassigned += 1;
        }

        self.documents.remove(index);
        self.persist_documents();
        if unassigned > 0 {
            self.persist_cards();
        }

        info!(
            "event=delete_document module=store status=ok document_id={document_id} unassigned_cards={unassigned}"
        );
        MutationOutcome::Applied
    }

    /// Replaces a document body wholesale, as the editor does.
    pub fn update_document_content(
        &mut self,
        document_id: DocumentId,
        content: impl Into<String>,
    ) -> MutationOutcome {
        let Some(document) = self
            .documents
            .iter_mut()
            .find(|document| document.id == document_id)
        else {
            debug!(
                "event=update_document module=store status=noop error_code=reference_miss document_id={document_id}"
            );
            return MutationOutcome::ReferenceMiss;
        };
        document.content = content.into();
        self.persist_documents();
        MutationOutcome::Applied
    }

    fn persist_cards(&self) {
        if let Err(err) = self.gateway.save_cards(&self.cards) {
            error!("event=save_cards module=store status=error error={err}");
        }
    }

    fn persist_documents(&self) {
        if let Err(err) = self.gateway.save_documents(&self.documents) {
            error!("event=save_documents module=store status=error error={err}");
        }
    }
}

/// Inserts `insert` into `text` at a character (not byte) offset, clamped
/// to the end of `text`.
fn insert_at_char_offset(text: &mut String, insert: &str, position: usize) {
    let byte_offset = text
        .char_indices()
        .nth(position)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    text.insert_str(byte_offset, insert);
}
