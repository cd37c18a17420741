//! Immutable model schema and its canonical field order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

use crate::config::{PrimaryKeyPolicy, SchemaConfig};
use crate::description::{IndexDeclaration, ModelDescription, ModelIntrospector};
use crate::error::{ConstructionError, MismatchError, SchemaError, SchemaResult};
use crate::field::{FieldDescriptor, ModelConnection};
use crate::index::ModelIndex;
use crate::instance::ModelInstance;
use modelkit_types::FieldValue;

/// Metadata of one model type with its fields in canonical order.
///
/// Built once and never mutated. Every consumer that generates queries or
/// serializes instances walks [`sorted_fields`](Self::sorted_fields), so two
/// schemas built from the same fields always agree on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedSchema", into = "SerializedSchema")]
pub struct ModelSchema {
    name: String,
    target_model_name: String,
    sorted_fields: Vec<FieldDescriptor>,
    /// Field name → position in `sorted_fields`.
    positions: BTreeMap<String, usize>,
    model_index: ModelIndex,
    primary_key: Option<usize>,
    foreign_keys: Vec<usize>,
    connections: Vec<usize>,
    /// Config the schema was built under; reused when deserializing.
    config: SchemaConfig,
}

/// Canonical comparator: the primary key sorts last, connected fields come
/// before plain ones, ties break on ascending name.
fn canonical_order(a: &FieldDescriptor, b: &FieldDescriptor) -> Ordering {
    a.is_primary_key
        .cmp(&b.is_primary_key)
        .then_with(|| b.is_connected().cmp(&a.is_connected()))
        .then_with(|| a.name.cmp(&b.name))
}

impl ModelSchema {
    pub fn builder() -> ModelSchemaBuilder {
        ModelSchemaBuilder::default()
    }

    /// Builds a schema from an introspector's description.
    pub fn from_description(
        description: ModelDescription,
        config: &SchemaConfig,
    ) -> SchemaResult<Self> {
        let ModelDescription {
            name,
            target_model_name,
            fields,
            index,
        } = description;

        let mut builder = Self::builder().name(&name).config(config.clone());
        if let Some(target) = target_model_name {
            builder = builder.target_model_name(&target);
        }
        if let Some(index) = index {
            builder = builder.model_index(index.into_index());
        }
        for (key, field) in fields {
            let descriptor = field.into_descriptor(&key)?;
            builder = builder.keyed_field(key, descriptor);
        }
        builder.build()
    }

    /// Parses a JSON model description and builds its schema.
    pub fn from_json(json: &str, config: &SchemaConfig) -> SchemaResult<Self> {
        Self::from_description(ModelDescription::from_json(json)?, config)
    }

    /// Asks `introspector` for a description and builds its schema.
    /// Introspection failures surface as a construction failure.
    pub fn from_introspector<I: ModelIntrospector + ?Sized>(
        introspector: &I,
        config: &SchemaConfig,
    ) -> SchemaResult<Self> {
        let description = introspector
            .describe()
            .map_err(ConstructionError::Introspection)?;
        Self::from_description(description, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// External model name; equals [`name`](Self::name) unless one was given.
    pub fn target_model_name(&self) -> &str {
        &self.target_model_name
    }

    /// Looks up a field by its local name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.positions.get(name).map(|&i| &self.sorted_fields[i])
    }

    /// All fields keyed by local name, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> + '_ {
        self.positions
            .iter()
            .map(|(name, &i)| (name.as_str(), &self.sorted_fields[i]))
    }

    /// All fields in canonical order.
    pub fn sorted_fields(&self) -> &[FieldDescriptor] {
        &self.sorted_fields
    }

    /// Field names in canonical order.
    pub fn field_names(&self) -> Vec<&str> {
        self.sorted_fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn model_index(&self) -> &ModelIndex {
        &self.model_index
    }

    pub fn len(&self) -> usize {
        self.sorted_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_fields.is_empty()
    }

    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.primary_key.map(|i| &self.sorted_fields[i])
    }

    /// Direct foreign-key fields, in canonical order.
    pub fn foreign_keys(&self) -> Vec<&FieldDescriptor> {
        self.foreign_keys
            .iter()
            .map(|&i| &self.sorted_fields[i])
            .collect()
    }

    /// Connected fields paired with their connection, in canonical order.
    pub fn connections(&self) -> Vec<(&FieldDescriptor, &ModelConnection)> {
        self.connections
            .iter()
            .filter_map(|&i| {
                let field = &self.sorted_fields[i];
                field.connection().map(|c| (field, c))
            })
            .collect()
    }

    /// Maps every schema field's target name to its value on `instance`.
    ///
    /// Values are passed through as the instance reports them.
    pub fn map_field_names_to_values<I: ModelInstance + ?Sized>(
        &self,
        instance: &I,
    ) -> SchemaResult<BTreeMap<String, FieldValue>> {
        if instance.model_name() != self.name {
            return Err(MismatchError::WrongModel {
                expected: self.name.clone(),
                found: instance.model_name().to_string(),
            }
            .into());
        }

        let mut values = BTreeMap::new();
        for field in &self.sorted_fields {
            let value = instance
                .field_value(&field.name)
                .ok_or_else(|| MismatchError::MissingField {
                    model: self.name.clone(),
                    field: field.name.clone(),
                })?;
            values.insert(field.target_name.clone(), value);
        }
        Ok(values)
    }
}

impl TryFrom<ModelDescription> for ModelSchema {
    type Error = SchemaError;

    fn try_from(description: ModelDescription) -> SchemaResult<Self> {
        Self::from_description(description, &SchemaConfig::default())
    }
}

/// Wire form of a [`ModelSchema`]: its description plus the config it was
/// built under, so relaxed builds read back the same way.
#[derive(Serialize, Deserialize)]
struct SerializedSchema {
    #[serde(flatten)]
    description: ModelDescription,
    #[serde(default)]
    config: SchemaConfig,
}

impl TryFrom<SerializedSchema> for ModelSchema {
    type Error = SchemaError;

    fn try_from(serialized: SerializedSchema) -> SchemaResult<Self> {
        Self::from_description(serialized.description, &serialized.config)
    }
}

impl From<ModelSchema> for SerializedSchema {
    fn from(schema: ModelSchema) -> Self {
        let config = schema.config.clone();
        Self {
            description: schema.into(),
            config,
        }
    }
}

impl From<ModelSchema> for ModelDescription {
    fn from(schema: ModelSchema) -> Self {
        let target_model_name =
            (schema.target_model_name != schema.name).then(|| schema.target_model_name.clone());
        let index = IndexDeclaration::of(&schema.model_index);
        let fields = schema
            .sorted_fields
            .iter()
            .map(|f| (f.name.clone(), f.into()))
            .collect();

        Self {
            name: schema.name,
            target_model_name,
            fields,
            index,
        }
    }
}

/// Collects the parts of a [`ModelSchema`] and validates them in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ModelSchemaBuilder {
    name: String,
    target_model_name: Option<String>,
    /// Map key alongside the descriptor it points at.
    fields: Vec<(String, FieldDescriptor)>,
    model_index: ModelIndex,
    config: SchemaConfig,
}

impl ModelSchemaBuilder {
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    /// Empty names are treated as absent.
    #[must_use]
    pub fn target_model_name(mut self, target_model_name: &str) -> Self {
        self.target_model_name = Some(target_model_name).filter(|t| !t.is_empty()).map(Into::into);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push((field.name.clone(), field));
        self
    }

    #[must_use]
    pub fn fields(self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        fields.into_iter().fold(self, Self::field)
    }

    /// Adds a name → descriptor map. Every key must match its descriptor's name.
    #[must_use]
    pub fn fields_map(mut self, fields: HashMap<String, FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    fn keyed_field(mut self, key: String, field: FieldDescriptor) -> Self {
        self.fields.push((key, field));
        self
    }

    #[must_use]
    pub fn model_index(mut self, model_index: ModelIndex) -> Self {
        self.model_index = model_index;
        self
    }

    #[must_use]
    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> SchemaResult<ModelSchema> {
        let Self {
            name,
            target_model_name,
            fields,
            model_index,
            config,
        } = self;

        if name.is_empty() {
            return Err(ConstructionError::EmptyModelName.into());
        }

        let mut seen = HashSet::with_capacity(fields.len());
        let mut sorted_fields = Vec::with_capacity(fields.len());
        for (key, field) in fields {
            if field.name.is_empty() {
                return Err(ConstructionError::EmptyFieldName(name).into());
            }
            if key != field.name {
                return Err(ConstructionError::KeyMismatch {
                    key,
                    name: field.name,
                }
                .into());
            }
            if !seen.insert(key) {
                return Err(ConstructionError::DuplicateField(field.name).into());
            }
            sorted_fields.push(field);
        }
        sorted_fields.sort_by(canonical_order);

        check_primary_keys(&name, &sorted_fields, config.primary_keys)?;
        if config.reject_duplicate_target_names {
            check_target_names(&sorted_fields)?;
        }
        check_index(&name, &model_index, &seen, config.validate_index_fields)?;

        let positions = sorted_fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        let primary_key = sorted_fields.iter().position(|f| f.is_primary_key);
        let foreign_keys = sorted_fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_foreign_key())
            .map(|(i, _)| i)
            .collect();
        let connections = sorted_fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_connected())
            .map(|(i, _)| i)
            .collect();

        debug!("Built schema for {} with {} fields", name, sorted_fields.len());

        Ok(ModelSchema {
            target_model_name: target_model_name.unwrap_or_else(|| name.clone()),
            name,
            sorted_fields,
            positions,
            model_index,
            primary_key,
            foreign_keys,
            connections,
            config,
        })
    }
}

fn check_primary_keys(
    model: &str,
    sorted_fields: &[FieldDescriptor],
    policy: PrimaryKeyPolicy,
) -> Result<(), ConstructionError> {
    let keys: Vec<String> = sorted_fields
        .iter()
        .filter(|f| f.is_primary_key)
        .map(|f| f.name.clone())
        .collect();
    if keys.len() <= 1 {
        return Ok(());
    }

    match policy {
        PrimaryKeyPolicy::Reject => Err(ConstructionError::MultiplePrimaryKeys(keys)),
        PrimaryKeyPolicy::Warn => {
            warn!(
                "Model {} declares {} primary keys ({}); using {}",
                model,
                keys.len(),
                keys.join(", "),
                keys[0]
            );
            Ok(())
        }
    }
}

fn check_target_names(sorted_fields: &[FieldDescriptor]) -> Result<(), ConstructionError> {
    let mut owners: HashMap<&str, &str> = HashMap::with_capacity(sorted_fields.len());
    for field in sorted_fields {
        if let Some(first) = owners.insert(&field.target_name, &field.name) {
            return Err(ConstructionError::DuplicateTargetName {
                target_name: field.target_name.clone(),
                first: first.to_string(),
                second: field.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_index(
    model: &str,
    index: &ModelIndex,
    field_names: &HashSet<String>,
    strict: bool,
) -> Result<(), ConstructionError> {
    let index_name = index.index_name().unwrap_or_default();
    for field in index.index_field_names() {
        if field_names.contains(field) {
            continue;
        }
        if strict {
            return Err(ConstructionError::UnknownIndexField {
                index: index_name.to_string(),
                field: field.clone(),
            });
        }
        warn!(
            "Index {:?} on model {} references unknown field {}",
            index_name, model, field
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(name: &str) -> FieldDescriptor {
        FieldDescriptor::string(name)
    }

    fn connected(name: &str) -> FieldDescriptor {
        FieldDescriptor::collection(name).connected(ModelConnection::has_many("Comment", "postId"))
    }

    #[test]
    fn primary_key_is_greatest() {
        let id = plain("id").primary_key();
        assert_eq!(canonical_order(&id, &plain("zzz")), Ordering::Greater);
        assert_eq!(canonical_order(&connected("aaa"), &id), Ordering::Less);
    }

    #[test]
    fn connected_before_plain() {
        assert_eq!(canonical_order(&connected("z"), &plain("a")), Ordering::Less);
        assert_eq!(canonical_order(&plain("a"), &connected("z")), Ordering::Greater);
    }

    #[test]
    fn ties_break_on_name() {
        assert_eq!(canonical_order(&plain("a"), &plain("b")), Ordering::Less);
        assert_eq!(canonical_order(&plain("b"), &plain("b")), Ordering::Equal);
    }

    #[test]
    fn two_primary_keys_still_compare_by_name() {
        let a = plain("a").primary_key();
        let b = plain("b").primary_key();
        assert_eq!(canonical_order(&a, &b), Ordering::Less);
        assert_eq!(canonical_order(&b, &a), Ordering::Greater);
    }
}
