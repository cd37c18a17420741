//! Schema builder configuration, optionally read from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// What to do when more than one field is marked as primary key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyPolicy {
    /// Fail the build.
    #[default]
    Reject,
    /// Log a warning and order the primary keys among themselves by name.
    Warn,
}

/// Knobs for [`ModelSchema`](crate::ModelSchema) construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub primary_keys: PrimaryKeyPolicy,
    /// Fail when the index names a field the model does not have.
    #[serde(default)]
    pub validate_index_fields: bool,
    /// Fail when two fields serialize under the same target name.
    #[serde(default = "default_reject_duplicate_target_names")]
    pub reject_duplicate_target_names: bool,
}

fn default_reject_duplicate_target_names() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            primary_keys: PrimaryKeyPolicy::Reject,
            validate_index_fields: false,
            reject_duplicate_target_names: default_reject_duplicate_target_names(),
        }
    }
}

impl SchemaConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads config from `path`. A missing or unparsable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No schema config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded schema config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse schema config {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read schema config {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
