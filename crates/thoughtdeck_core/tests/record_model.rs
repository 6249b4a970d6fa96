use chrono::{DateTime, Utc};
use thoughtdeck_core::{Card, Document, TASK_DOCUMENT_NAME};
use uuid::Uuid;

#[test]
fn card_new_sets_defaults() {
    let card = Card::new("buy milk");

    assert!(!card.id.is_nil());
    assert_eq!(card.content, "buy milk");
    assert_eq!(card.document_id, None);
    assert!(card.is_unassigned());
}

#[test]
fn card_equality_is_identity_based() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut first = Card::with_id(id, "original");
    let second = Card::with_id(id, "rewritten");
    let third = Card::new("original");

    // Same id, different content and creation date: still the same card.
    first.document_id = Some(Uuid::new_v4());
    assert_eq!(first, second);

    // Same content, different id: different cards.
    assert_ne!(first, third);
}

#[test]
fn document_new_sets_defaults() {
    let document = Document::new("Ideas");

    assert!(!document.id.is_nil());
    assert_eq!(document.name, "Ideas");
    assert_eq!(document.content, "");
    assert!(!document.is_task_document);
}

#[test]
fn task_default_is_an_empty_tasks_document() {
    let document = Document::task_default();

    assert_eq!(document.name, TASK_DOCUMENT_NAME);
    assert_eq!(document.content, "");
    assert!(document.is_task_document);
}

#[test]
fn document_equality_is_identity_based() {
    let id = Uuid::new_v4();
    let mut first = Document::with_id(id, "Notes");
    let second = Document::with_id(id, "Renamed");

    first.content = "some body".to_string();
    assert_eq!(first, second);
    assert_ne!(first, Document::new("Notes"));
}

#[test]
fn card_serialization_uses_expected_wire_fields() {
    let card_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let document_id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let mut card = Card::with_id(card_id, "call mom");
    card.document_id = Some(document_id);

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["id"], card_id.to_string());
    assert_eq!(json["content"], "call mom");
    assert_eq!(json["documentID"], document_id.to_string());
    assert!(json["creationDate"].is_string());

    let decoded: Card = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.id, card.id);
    assert_eq!(decoded.content, card.content);
    assert_eq!(decoded.creation_date, card.creation_date);
    assert_eq!(decoded.document_id, card.document_id);
}

#[test]
fn unassigned_card_omits_document_reference_on_the_wire() {
    let card = Card::new("loose thought");

    let json = serde_json::to_value(&card).unwrap();
    assert!(json.get("documentID").is_none());

    let decoded: Card = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.document_id, None);
}

#[test]
fn document_serialization_uses_expected_wire_fields() {
    let document_id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let mut document = Document::with_id(document_id, "Journal");
    document.content = "first entry".to_string();

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["id"], document_id.to_string());
    assert_eq!(json["name"], "Journal");
    assert_eq!(json["content"], "first entry");
    assert_eq!(json["isTaskDocument"], false);
    assert!(json["creationDate"].is_string());

    let decoded: Document = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.id, document.id);
    assert_eq!(decoded.name, document.name);
    assert_eq!(decoded.content, document.content);
    assert_eq!(decoded.is_task_document, document.is_task_document);
    assert_eq!(decoded.creation_date, document.creation_date);
}

#[test]
fn creation_date_round_trips_with_fractional_seconds() {
    let timestamp: DateTime<Utc> = "2026-08-27T09:15:42.123456789Z".parse().unwrap();
    let mut card = Card::new("precise");
    card.creation_date = timestamp;

    let json = serde_json::to_string(&card).unwrap();
    let decoded: Card = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.creation_date, timestamp);
}
