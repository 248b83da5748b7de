//! Schema registry errors.

use thiserror::Error;

/// Errors raised while building or querying a schema registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A record the codec needs was never registered.
    #[error("Schema missing for record '{name}'")]
    SchemaMissing {
        /// The record name that was looked up.
        name: String,
    },

    /// An enum the codec needs was never registered.
    #[error("Schema missing for enum '{name}'")]
    EnumMissing {
        /// The enum name that was looked up.
        name: String,
    },

    /// No operation with this id is registered.
    #[error("Unknown operation '{id}'")]
    OperationMissing {
        /// The operation id that was looked up.
        id: String,
    },

    /// A record was used as a polymorphic base but carries no variant table.
    #[error("Record '{name}' is not a polymorphic base")]
    NotPolymorphic {
        /// The record name.
        name: String,
    },

    /// The registry definition is inconsistent.
    #[error("Invalid schema registry ({} problem(s)): {}", problems.len(), problems.join("; "))]
    Invalid {
        /// Every problem found, in discovery order.
        problems: Vec<String>,
    },
}

impl SchemaError {
    /// Creates a missing record error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::SchemaMissing { name: name.into() }
    }

    /// Returns `true` if this error reports a missing descriptor.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::SchemaMissing { .. } | Self::EnumMissing { .. } | Self::OperationMissing { .. }
        )
    }
}
