use modelkit_model::ModelIndex;
use pretty_assertions::assert_eq;

#[test]
fn empty_index_has_no_name_or_fields() {
    let idx = ModelIndex::empty();
    assert!(idx.is_empty());
    assert_eq!(idx.index_name(), None);
    assert!(idx.index_field_names().is_empty());
    assert_eq!(idx, ModelIndex::default());
}

#[test]
fn named_index_keeps_field_order() {
    let idx = ModelIndex::new("byOwner", &["ownerId", "createdAt"]);
    assert!(!idx.is_empty());
    assert_eq!(idx.index_name(), Some("byOwner"));
    assert_eq!(idx.index_field_names(), ["ownerId", "createdAt"]);
}

#[test]
fn named_index_without_fields_is_not_empty() {
    let idx = ModelIndex::new("byNothing", &[]);
    assert!(!idx.is_empty());
    assert!(idx.index_field_names().is_empty());
}

#[test]
fn index_json_roundtrip() {
    let idx = ModelIndex::new("byTitle", &["title"]);
    let json = serde_json::to_string(&idx).unwrap();
    let back: ModelIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(back, idx);
}
