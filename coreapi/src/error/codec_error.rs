//! Structural encode and decode errors.

use coreapi_define::SchemaError;
use thiserror::Error;

use crate::path::FieldPath;

/// Fatal codec failures.
///
/// Missing mandatory fields and unknown enum values are not errors here; the
/// codec defers them to the validator so decoding stays forward compatible.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The body is not syntactically valid JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// A value disagrees with the kind the schema declares for it.
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Where the mismatch occurred.
        path: FieldPath,
        /// The declared kind.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// A timestamp is not strict RFC3339.
    #[error("Invalid timestamp at {path}: '{value}' ({source})")]
    TimestampParse {
        /// Where the timestamp occurred.
        path: FieldPath,
        /// The rejected text.
        value: String,
        /// Parser error.
        source: chrono::ParseError,
    },

    /// A polymorphic base value has no variant tag to emit.
    #[error("Cannot encode '{record}' at {path}: no variant tag to emit")]
    MissingVariantTag {
        /// Where the value occurred.
        path: FieldPath,
        /// The record type.
        record: String,
    },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A descriptor the codec needs is missing.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CodecError {
    pub(crate) fn mismatch(path: &FieldPath, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            path: path.clone(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Wire path of the failure, when the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::TimestampParse { path, .. }
            | Self::MissingVariantTag { path, .. } => Some(path),
            _ => None,
        }
    }
}
