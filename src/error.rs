//! Structured error types for binding operations.

use crate::schema::ScalarKind;
use crate::sources::Origin;
use thiserror::Error;

/// Errors returned by a bind call. No partial result is produced on error.
#[derive(Debug, Error)]
pub enum BindError {
    /// A field (or sequence element) has a type the binder cannot parse.
    #[error("field `{field}` has unsupported type `{type_name}`")]
    UnsupportedType { field: String, type_name: String },

    /// A source supplied a string that does not parse as the field's kind.
    #[error("cannot parse {origin} value `{value}` for field `{field}` as {kind}: {reason}")]
    Parse {
        field: String,
        value: String,
        origin: Origin,
        kind: ScalarKind,
        reason: String,
    },

    /// Two fields derive the same flag or environment key.
    #[error("fields `{first}` and `{second}` both bind to `{key}`")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    /// A field derives an empty key, or a flag key clap reserves.
    #[error("field `{field}` derives the reserved flag key `{key}`")]
    ReservedKey { key: String, field: String },

    /// The command line could not be parsed (unknown flag, help request, ...).
    #[error("invalid command line: {0}")]
    Flags(#[from] clap::Error),

    /// A field accessor returned different slot kinds for two instances.
    #[error("field `{field}` changed type between instances")]
    SlotMismatch { field: String },
}

impl BindError {
    pub(crate) fn unsupported(field: &str, type_name: &str) -> Self {
        Self::UnsupportedType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    /// Name of the field the error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { field, .. }
            | Self::Parse { field, .. }
            | Self::ReservedKey { field, .. }
            | Self::SlotMismatch { field } => Some(field),
            Self::DuplicateKey { second, .. } => Some(second),
            Self::Flags(_) => None,
        }
    }
}

/// Result type for bind operations.
pub type BindResult<T> = std::result::Result<T, BindError>;
