use serde::{Deserialize, Serialize};

/// Normalized metadata for one model attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Local identifier, unique within a schema.
    pub name: String,
    /// External (serialized) name. Keys the value-extraction output.
    pub target_name: String,
    pub field_type: FieldType,
    /// External type tag (e.g., the GraphQL scalar), when one was declared.
    pub target_type: Option<String>,
    pub is_required: bool,
    pub is_array: bool,
    pub is_enum: bool,
    pub is_primary_key: bool,
    pub relation: FieldRelation,
}

impl FieldDescriptor {
    /// Creates a plain, optional field whose target name equals its name.
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            target_name: name.into(),
            field_type,
            target_type: None,
            is_required: false,
            is_array: field_type == FieldType::Collection,
            is_enum: field_type == FieldType::Enum,
            is_primary_key: false,
            relation: FieldRelation::None,
        }
    }

    /// Shorthand for a string field.
    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Shorthand for an enum field.
    pub fn enumeration(name: &str) -> Self {
        Self::new(name, FieldType::Enum)
    }

    /// Shorthand for a field referencing another model.
    pub fn model(name: &str) -> Self {
        Self::new(name, FieldType::Model)
    }

    /// Shorthand for a collection field.
    pub fn collection(name: &str) -> Self {
        Self::new(name, FieldType::Collection)
    }

    #[must_use]
    pub fn with_target_name(mut self, target_name: &str) -> Self {
        self.target_name = target_name.into();
        self
    }

    #[must_use]
    pub fn with_target_type(mut self, target_type: &str) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Marks the field as the model's primary key (implies required).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_required = true;
        self
    }

    /// Makes the field a direct foreign key onto `target_model`.
    #[must_use]
    pub fn belongs_to(mut self, target_model: &str) -> Self {
        self.relation = FieldRelation::ForeignKey {
            target_model: target_model.into(),
        };
        self
    }

    /// Makes the field a virtual relationship resolved through `connection`.
    #[must_use]
    pub fn connected(mut self, connection: ModelConnection) -> Self {
        self.relation = FieldRelation::Connection(connection);
        self
    }

    /// True iff the field is a direct belongs-to column.
    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        matches!(self.relation, FieldRelation::ForeignKey { .. })
    }

    /// True iff the field is resolved through a connection rather than a column.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self.relation, FieldRelation::Connection(_))
    }

    /// The model a foreign key points at.
    pub fn belongs_to_model(&self) -> Option<&str> {
        match &self.relation {
            FieldRelation::ForeignKey { target_model } => Some(target_model),
            _ => None,
        }
    }

    pub fn connection(&self) -> Option<&ModelConnection> {
        match &self.relation {
            FieldRelation::Connection(c) => Some(c),
            _ => None,
        }
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Enum,
    Model,
    Collection,
}

/// How a field relates to another model.
///
/// A field is either a plain column, a direct foreign key, or a connection
/// resolved through another model; never two of these at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldRelation {
    #[default]
    None,
    ForeignKey { target_model: String },
    Connection(ModelConnection),
}

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    BelongsTo,
    HasOne,
    HasMany,
}

/// A named connection to another model, resolved through its key fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// Fields on this model that participate in the connection.
    #[serde(default)]
    pub fields: Vec<String>,
    pub relationship: RelationshipKind,
    /// Name of the connected model.
    pub connection_target: String,
}

impl ModelConnection {
    /// Creates a connection of `relationship` kind onto `connection_target`.
    pub fn new(relationship: RelationshipKind, connection_target: &str) -> Self {
        Self {
            name: None,
            key_field: None,
            sort_field: None,
            limit: None,
            key_name: None,
            fields: Vec::new(),
            relationship,
            connection_target: connection_target.into(),
        }
    }

    /// Shorthand for a has-many connection keyed by `key_field` on the target.
    pub fn has_many(connection_target: &str, key_field: &str) -> Self {
        Self {
            key_field: Some(key_field.into()),
            ..Self::new(RelationshipKind::HasMany, connection_target)
        }
    }

    /// Shorthand for a has-one connection.
    pub fn has_one(connection_target: &str) -> Self {
        Self::new(RelationshipKind::HasOne, connection_target)
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_sort_field(mut self, sort_field: &str) -> Self {
        self.sort_field = Some(sort_field.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_key_name(mut self, key_name: &str) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }
}
