//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
///
/// Every variant is fatal for the file being generated: a partially
/// written output document must be discarded by the caller. There is no
/// retry or best-effort policy.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A type descriptor references an index not present in the schema.
    #[error("unresolved {kind} reference: index {index} not in schema")]
    UnresolvedTypeReference {
        /// Index that failed to resolve.
        index: usize,
        /// Expected kind of the referenced declaration.
        kind: &'static str,
    },

    /// A default value was requested for a kind with no default-rendering
    /// rule.
    #[error("no default value rule for {kind} field '{field}'")]
    InvalidDefaultForType {
        /// Base kind of the offending field.
        kind: &'static str,
        /// Field name.
        field: String,
    },

    /// Two distinct module paths derived the same import alias.
    #[error("import alias '{alias}' maps to both '{existing}' and '{conflicting}'")]
    ImportConflict {
        /// Derived alias.
        alias: String,
        /// Path the alias is already registered for.
        existing: String,
        /// Path that attempted to reuse the alias.
        conflicting: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// IO error while writing output documents.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
