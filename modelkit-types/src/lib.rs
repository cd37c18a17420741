//! Core value types for modelkit.
//!
//! This crate defines the plugin-agnostic values that flow between the model
//! introspector, the schema engine and its consumers:
//! - [`FieldValue`] — a native, untyped model attribute value
//! - [`NumberMode`] — how JSON numbers are mapped onto native values
//!
//! Nothing here knows about schemas; that lives in `modelkit-model`.

mod value;

pub use value::{FieldValue, NumberMode};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in value conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(String),
}
