use modelkit_model::{
    FieldDescriptor, FieldValue, MismatchError, ModelInstance, ModelRecord, ModelSchema,
    NumberMode, SchemaError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

fn make_post_schema() -> ModelSchema {
    ModelSchema::builder()
        .name("Post")
        .field(FieldDescriptor::string("id").primary_key())
        .field(FieldDescriptor::string("title").with_target_name("Title"))
        .field(
            FieldDescriptor::string("ownerId")
                .with_target_name("owner_id")
                .belongs_to("Owner"),
        )
        .build()
        .unwrap()
}

fn mismatch(result: Result<BTreeMap<String, FieldValue>, SchemaError>) -> MismatchError {
    match result {
        Err(SchemaError::SchemaMismatch(e)) => e,
        other => panic!("expected a schema mismatch, got {other:?}"),
    }
}

// ── Extraction ───────────────────────────────────────────────────

#[test]
fn values_are_keyed_by_target_name() {
    let post = ModelRecord::new("Post")
        .with("id", "42")
        .with("title", "Hello")
        .with("ownerId", "7");

    let values = make_post_schema().map_field_names_to_values(&post).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("id".to_string(), FieldValue::from("42"));
    expected.insert("Title".to_string(), FieldValue::from("Hello"));
    expected.insert("owner_id".to_string(), FieldValue::from("7"));
    assert_eq!(values, expected);
}

#[test]
fn null_values_are_kept() {
    let post = ModelRecord::new("Post")
        .with("id", "42")
        .with("title", Option::<String>::None)
        .with("ownerId", "7");

    let values = make_post_schema().map_field_names_to_values(&post).unwrap();
    assert_eq!(values.get("Title"), Some(&FieldValue::Null));
}

#[test]
fn extra_instance_values_are_ignored() {
    let post = ModelRecord::new("Post")
        .with("id", "42")
        .with("title", "Hello")
        .with("ownerId", "7")
        .with("draft", true);

    let values = make_post_schema().map_field_names_to_values(&post).unwrap();
    assert_eq!(values.len(), 3);
    assert!(!values.contains_key("draft"));
}

#[test]
fn empty_schema_yields_empty_map() {
    let schema = ModelSchema::builder().name("Empty").build().unwrap();
    let values = schema
        .map_field_names_to_values(&ModelRecord::new("Empty"))
        .unwrap();
    assert!(values.is_empty());
}

// ── Mismatches ───────────────────────────────────────────────────

#[test]
fn wrong_model_is_a_mismatch() {
    let comment = ModelRecord::new("Comment").with("id", "1");
    let err = mismatch(make_post_schema().map_field_names_to_values(&comment));
    assert_eq!(
        err,
        MismatchError::WrongModel {
            expected: "Post".into(),
            found: "Comment".into(),
        }
    );
}

#[test]
fn missing_field_is_a_mismatch() {
    let post = ModelRecord::new("Post").with("id", "42").with("title", "Hello");
    let err = mismatch(make_post_schema().map_field_names_to_values(&post));
    assert_eq!(
        err,
        MismatchError::MissingField {
            model: "Post".into(),
            field: "ownerId".into(),
        }
    );
}

#[test]
fn mismatch_display() {
    let err = make_post_schema()
        .map_field_names_to_values(&ModelRecord::new("Comment"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "schema mismatch: expected an instance of `Post`, got `Comment`"
    );
}

// ── Custom instances ─────────────────────────────────────────────

struct Post {
    id: String,
    title: String,
    owner_id: Option<String>,
}

impl ModelInstance for Post {
    fn model_name(&self) -> &str {
        "Post"
    }

    fn field_value(&self, field_name: &str) -> Option<FieldValue> {
        match field_name {
            "id" => Some(self.id.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "ownerId" => Some(self.owner_id.clone().into()),
            _ => None,
        }
    }
}

#[test]
fn typed_instance_extracts() {
    let post = Post {
        id: "42".into(),
        title: "Hello".into(),
        owner_id: None,
    };
    let values = make_post_schema().map_field_names_to_values(&post).unwrap();
    assert_eq!(values["owner_id"], FieldValue::Null);
    assert_eq!(values["Title"], FieldValue::from("Hello"));
}

#[test]
fn dyn_instance_extracts() {
    let record = ModelRecord::new("Post")
        .with("id", "1")
        .with("title", "t")
        .with("ownerId", "o");
    let instance: &dyn ModelInstance = &record;
    assert!(make_post_schema().map_field_names_to_values(instance).is_ok());
}

// ── ModelRecord ──────────────────────────────────────────────────

#[test]
fn record_from_json_object() {
    let record = ModelRecord::from_json(
        "Post",
        &json!({"id": "42", "rating": 4.0, "draft": false}),
        NumberMode::Narrow,
    )
    .unwrap();
    assert_eq!(record.get_str("id"), Some("42"));
    assert_eq!(record.get("rating"), Some(&FieldValue::Int(4)));
    assert_eq!(record.get_number("rating"), Some(4.0));
    assert_eq!(record.get_bool("draft"), Some(false));
    assert_eq!(record.get_str("missing"), None);
}

#[test]
fn record_from_json_rejects_arrays() {
    let result = ModelRecord::from_json("Post", &json!(["id"]), NumberMode::Exact);
    assert!(result.is_err());
}

#[test]
fn record_from_json_feeds_extraction() {
    let record = ModelRecord::from_json(
        "Post",
        &json!({"id": "42", "title": "Hello", "ownerId": "7"}),
        NumberMode::Exact,
    )
    .unwrap();
    let values = make_post_schema().map_field_names_to_values(&record).unwrap();
    assert_eq!(values["owner_id"], FieldValue::from("7"));
}
