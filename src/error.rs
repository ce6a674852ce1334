//! Engine error types.

use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// Only invalid caller parameters are errors; every other condition
/// (including zero-total hours during attribution) yields a complete result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A parameter is outside its valid range. Raised before any simulation runs.
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        /// Parameter name (e.g. `"days"`).
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidParameter { field, .. } => field,
        }
    }
}
