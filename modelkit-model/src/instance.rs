use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use modelkit_types::{FieldValue, NumberMode};

/// A concrete model instance whose values the schema can read by field name.
///
/// Implemented by generated model types, or use [`ModelRecord`] for a plain
/// bag of values.
pub trait ModelInstance {
    /// Name of the model this instance belongs to.
    fn model_name(&self) -> &str;

    /// Value of the field with local name `field_name`, or `None` if the
    /// instance has no such attribute. A present-but-empty attribute is
    /// `Some(FieldValue::Null)`.
    fn field_value(&self, field_name: &str) -> Option<FieldValue>;
}

/// A model instance held as a name → value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_name: String,
    pub values: BTreeMap<String, FieldValue>,
}

impl ModelRecord {
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.into(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, field_name: &str, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field_name.into(), value.into());
        self
    }

    /// Reads a record from a JSON object keyed by local field name.
    pub fn from_json(
        model_name: &str,
        data: &serde_json::Value,
        mode: NumberMode,
    ) -> modelkit_types::Result<Self> {
        Ok(Self {
            model_name: model_name.into(),
            values: FieldValue::map_from_json(data, mode)?,
        })
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldValue> {
        self.values.get(field_name)
    }

    pub fn get_str(&self, field_name: &str) -> Option<&str> {
        self.get(field_name).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, field_name: &str) -> Option<bool> {
        self.get(field_name).and_then(FieldValue::as_bool)
    }

    pub fn get_number(&self, field_name: &str) -> Option<f64> {
        self.get(field_name).and_then(FieldValue::as_f64)
    }
}

impl ModelInstance for ModelRecord {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn field_value(&self, field_name: &str) -> Option<FieldValue> {
        self.values.get(field_name).cloned()
    }
}
