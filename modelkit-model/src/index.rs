use serde::{Deserialize, Serialize};

/// Secondary index declaration of a model.
///
/// Field names are carried as declared; whether they exist on the model is
/// only checked when `SchemaConfig::validate_index_fields` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIndex {
    index_name: Option<String>,
    index_field_names: Vec<String>,
}

impl ModelIndex {
    /// An index with no name and no fields.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(index_name: &str, index_field_names: &[&str]) -> Self {
        Self {
            index_name: Some(index_name.into()),
            index_field_names: index_field_names.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    pub(crate) const fn from_parts(
        index_name: Option<String>,
        index_field_names: Vec<String>,
    ) -> Self {
        Self {
            index_name,
            index_field_names,
        }
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn index_field_names(&self) -> &[String] {
        &self.index_field_names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_name.is_none() && self.index_field_names.is_empty()
    }
}
