//! The serialized model description handed over by a model introspector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConstructionError, SchemaResult};
use crate::field::{FieldDescriptor, FieldRelation, FieldType, ModelConnection};
use crate::index::ModelIndex;

/// Boxed error returned by introspectors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Source of model descriptions (annotation scanning, code generation,
/// schema files, ...). The schema engine only ever sees the result.
pub trait ModelIntrospector {
    fn describe(&self) -> Result<ModelDescription, BoxError>;
}

/// Everything the schema builder needs to know about one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_model_name: Option<String>,
    /// Keyed by local field name.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexDeclaration>,
}

impl ModelDescription {
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Secondary index as declared on the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl IndexDeclaration {
    pub(crate) fn into_index(self) -> ModelIndex {
        ModelIndex::from_parts(self.name, self.fields)
    }
}

/// One field as declared by the introspector. Relationship markers are
/// flat here and resolved into a [`FieldRelation`] at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Defaults to the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub is_enum: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    /// Model this field is a foreign key onto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ModelConnection>,
}

impl FieldDescription {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            target_name: None,
            field_type,
            target_type: None,
            is_required: false,
            is_array: field_type == FieldType::Collection,
            is_enum: field_type == FieldType::Enum,
            is_primary_key: false,
            belongs_to: None,
            connection: None,
        }
    }

    /// Resolves the description of the field `name` into a descriptor.
    pub fn into_descriptor(self, name: &str) -> Result<FieldDescriptor, ConstructionError> {
        let relation = match (self.belongs_to, self.connection) {
            (Some(_), Some(_)) => return Err(ConstructionError::AmbiguousRelation(name.into())),
            (Some(target_model), None) => FieldRelation::ForeignKey { target_model },
            (None, Some(connection)) => FieldRelation::Connection(connection),
            (None, None) => FieldRelation::None,
        };

        Ok(FieldDescriptor {
            name: name.into(),
            target_name: self.target_name.unwrap_or_else(|| name.into()),
            field_type: self.field_type,
            target_type: self.target_type,
            is_required: self.is_required,
            is_array: self.is_array || self.field_type == FieldType::Collection,
            is_enum: self.is_enum || self.field_type == FieldType::Enum,
            is_primary_key: self.is_primary_key,
            relation,
        })
    }
}

impl From<&FieldDescriptor> for FieldDescription {
    fn from(field: &FieldDescriptor) -> Self {
        let (belongs_to, connection) = match &field.relation {
            FieldRelation::None => (None, None),
            FieldRelation::ForeignKey { target_model } => (Some(target_model.clone()), None),
            FieldRelation::Connection(c) => (None, Some(c.clone())),
        };

        Self {
            target_name: (field.target_name != field.name).then(|| field.target_name.clone()),
            field_type: field.field_type,
            target_type: field.target_type.clone(),
            is_required: field.is_required,
            is_array: field.is_array,
            is_enum: field.is_enum,
            is_primary_key: field.is_primary_key,
            belongs_to,
            connection,
        }
    }
}

impl IndexDeclaration {
    /// `None` for an empty index.
    pub(crate) fn of(index: &ModelIndex) -> Option<Self> {
        (!index.is_empty()).then(|| Self {
            name: index.index_name().map(str::to_string),
            fields: index.index_field_names().to_vec(),
        })
    }
}
