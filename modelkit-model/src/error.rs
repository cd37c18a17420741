//! Error types for schema construction and value extraction.

use thiserror::Error;

use crate::description::BoxError;

/// Errors raised by the schema engine.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The model description handed to the builder was malformed.
    #[error("error constructing model schema: {0}")]
    ConstructionFailure(#[from] ConstructionError),

    /// A model instance disagrees with the schema it was checked against.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] MismatchError),
}

/// Why a schema could not be built.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("model name is empty")]
    EmptyModelName,

    #[error("model `{0}` has a field with an empty name")]
    EmptyFieldName(String),

    #[error("field keyed as `{key}` is named `{name}`")]
    KeyMismatch { key: String, name: String },

    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    #[error("fields `{first}` and `{second}` share target name `{target_name}`")]
    DuplicateTargetName {
        target_name: String,
        first: String,
        second: String,
    },

    #[error("multiple primary keys: {}", .0.join(", "))]
    MultiplePrimaryKeys(Vec<String>),

    #[error("field `{0}` is both a foreign key and a connection")]
    AmbiguousRelation(String),

    #[error("index `{index}` references unknown field `{field}`")]
    UnknownIndexField { index: String, field: String },

    #[error("malformed model description: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model introspection failed")]
    Introspection(#[source] BoxError),
}

/// How an instance failed to line up with a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MismatchError {
    #[error("expected an instance of `{expected}`, got `{found}`")]
    WrongModel { expected: String, found: String },

    #[error("field `{field}` is not present on `{model}`")]
    MissingField { model: String, field: String },
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConstructionFailure(ConstructionError::Malformed(e))
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
