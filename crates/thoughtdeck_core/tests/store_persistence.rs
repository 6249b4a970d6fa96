//! Persistence side-effect tests through an injected fake gateway: which
//! operation saves which collection, and how often.

use std::cell::RefCell;
use std::rc::Rc;
use thoughtdeck_core::{
    Card, CollectionGateway, Document, GatewayError, GatewayResult, MutationOutcome, NoteStore,
};
use uuid::Uuid;

#[derive(Default)]
struct SaveLog {
    card_saves: Vec<Vec<Card>>,
    document_saves: Vec<Vec<Document>>,
}

struct RecordingGateway {
    log: Rc<RefCell<SaveLog>>,
    seed_cards: Vec<Card>,
    seed_documents: Vec<Document>,
}

impl RecordingGateway {
    fn seeded() -> (Self, Rc<RefCell<SaveLog>>) {
        let log = Rc::new(RefCell::new(SaveLog::default()));
        let gateway = Self {
            log: Rc::clone(&log),
            seed_cards: Vec::new(),
            // Seed a task document so initialization performs no save.
            seed_documents: vec![Document::task_default()],
        };
        (gateway, log)
    }
}

impl CollectionGateway for RecordingGateway {
    fn save_cards(&self, cards: &[Card]) -> GatewayResult<()> {
        self.log.borrow_mut().card_saves.push(cards.to_vec());
        Ok(())
    }

    fn save_documents(&self, documents: &[Document]) -> GatewayResult<()> {
        self.log.borrow_mut().document_saves.push(documents.to_vec());
        Ok(())
    }

    fn load_cards(&self) -> Vec<Card> {
        self.seed_cards.clone()
    }

    fn load_documents(&self) -> Vec<Document> {
        self.seed_documents.clone()
    }
}

#[test]
fn initialization_with_a_task_document_present_saves_nothing() {
    let (gateway, log) = RecordingGateway::seeded();
    let _store = NoteStore::initialize(gateway);

    assert!(log.borrow().card_saves.is_empty());
    assert!(log.borrow().document_saves.is_empty());
}

#[test]
fn add_card_saves_the_card_collection_once() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);

    store.add_card("hello");

    let log = log.borrow();
    assert_eq!(log.card_saves.len(), 1);
    assert_eq!(log.card_saves[0].len(), 1);
    assert!(log.document_saves.is_empty());
}

#[test]
fn add_document_saves_the_document_collection_once() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);

    store.add_document("Journal");

    let log = log.borrow();
    assert!(log.card_saves.is_empty());
    assert_eq!(log.document_saves.len(), 1);
    assert_eq!(log.document_saves[0].len(), 2);
}

#[test]
fn assign_and_unassign_save_only_cards() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);
    let card = store.add_card("hello");
    let doc = store.add_document("Journal");

    store.assign_card(card, doc);
    store.unassign_card(card);

    let log = log.borrow();
    // add_card + assign + unassign.
    assert_eq!(log.card_saves.len(), 3);
    // add_document only.
    assert_eq!(log.document_saves.len(), 1);
}

#[test]
fn move_saves_both_collections_with_the_merged_state() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);
    let card = store.add_card("Buy milk");
    let tasks = store.task_document().unwrap().id;

    store.move_card_content_to_document(card, tasks, None);

    let log = log.borrow();
    assert_eq!(log.card_saves.len(), 2);
    assert_eq!(log.document_saves.len(), 1);

    // The persisted snapshots reflect the post-move state.
    let last_cards = log.card_saves.last().unwrap();
    assert!(last_cards.is_empty());
    let last_documents = log.document_saves.last().unwrap();
    assert_eq!(last_documents[0].content, "• Buy milk");
}

#[test]
fn delete_document_without_assigned_cards_saves_only_documents() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);
    let doc = store.add_document("Empty");

    let saves_before = log.borrow().card_saves.len();
    store.delete_document(doc);

    let log = log.borrow();
    assert_eq!(log.card_saves.len(), saves_before);
    assert_eq!(log.document_saves.len(), 2);
}

#[test]
fn delete_document_with_assigned_cards_saves_both_collections() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);
    let doc = store.add_document("Full");
    let card = store.add_card("attached");
    store.assign_card(card, doc);

    let card_saves_before = log.borrow().card_saves.len();
    store.delete_document(doc);

    let log = log.borrow();
    assert_eq!(log.card_saves.len(), card_saves_before + 1);
    let last_cards = log.card_saves.last().unwrap();
    assert_eq!(last_cards.len(), 1);
    assert!(last_cards[0].is_unassigned());
}

#[test]
fn reference_misses_trigger_no_saves() {
    let (gateway, log) = RecordingGateway::seeded();
    let mut store = NoteStore::initialize(gateway);

    let ghost_card = Uuid::new_v4();
    let ghost_doc = Uuid::new_v4();
    assert_eq!(
        store.assign_card(ghost_card, ghost_doc),
        MutationOutcome::ReferenceMiss
    );
    assert_eq!(store.unassign_card(ghost_card), MutationOutcome::ReferenceMiss);
    assert_eq!(
        store.move_card_content_to_document(ghost_card, ghost_doc, None),
        MutationOutcome::ReferenceMiss
    );
    assert_eq!(store.delete_document(ghost_doc), MutationOutcome::ReferenceMiss);

    assert!(log.borrow().card_saves.is_empty());
    assert!(log.borrow().document_saves.is_empty());
}

/// Gateway whose saves always fail, to prove failed persistence never
/// corrupts or rolls back in-memory state.
struct FailingGateway;

fn encode_failure() -> GatewayError {
    GatewayError::Encode(serde_json::from_str::<()>("not json").unwrap_err())
}

impl CollectionGateway for FailingGateway {
    fn save_cards(&self, _cards: &[Card]) -> GatewayResult<()> {
        Err(encode_failure())
    }

    fn save_documents(&self, _documents: &[Document]) -> GatewayResult<()> {
        Err(encode_failure())
    }

    fn load_cards(&self) -> Vec<Card> {
        Vec::new()
    }

    fn load_documents(&self) -> Vec<Document> {
        vec![Document::task_default()]
    }
}

#[test]
fn failed_saves_are_swallowed_and_memory_state_is_kept() {
    let mut store = NoteStore::initialize(FailingGateway);

    let card = store.add_card("still here");
    let doc = store.add_document("Journal");
    store.assign_card(card, doc);

    assert_eq!(store.cards().len(), 1);
    assert_eq!(store.cards_for_document(doc).len(), 1);
    assert_eq!(store.documents().len(), 2);
}
