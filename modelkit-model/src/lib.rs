//! Model schema derivation for modelkit.
//!
//! Turns the description of a data model into an immutable, canonically
//! ordered [`ModelSchema`] that query generation, serialization and storage
//! layout all read from:
//! - [`FieldDescriptor`] — normalized metadata for one model attribute
//! - [`ModelIndex`] — the model's secondary index declaration
//! - [`ModelSchema`] — the field map, its canonical order and key lookups
//! - [`ModelDescription`] — the serialized form produced by a [`ModelIntrospector`]
//! - [`ModelInstance`] — value extraction from a concrete model instance
//!
//! The engine never inspects live objects or performs I/O (apart from
//! reading an optional config file); it operates purely on descriptions.

mod config;
mod description;
mod error;
mod field;
mod index;
mod instance;
mod schema;

pub use config::{PrimaryKeyPolicy, SchemaConfig};
pub use description::{
    BoxError, FieldDescription, IndexDeclaration, ModelDescription, ModelIntrospector,
};
pub use error::{ConstructionError, MismatchError, SchemaError, SchemaResult};
pub use field::{FieldDescriptor, FieldRelation, FieldType, ModelConnection, RelationshipKind};
pub use index::ModelIndex;
pub use instance::{ModelInstance, ModelRecord};
pub use schema::{ModelSchema, ModelSchemaBuilder};

pub use modelkit_types::{FieldValue, NumberMode};
