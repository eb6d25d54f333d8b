//! Error types for component execution.

use bf_core::CoreError;
use thiserror::Error;

/// Errors that abort a model run.
///
/// Domain anomalies (population collapse, harvest clamp) are defined
/// behavior encoded in the output state, not errors.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("Degenerate parameter: {what}")]
    DegenerateParameter { what: &'static str },

    #[error("State error: {0}")]
    State(CoreError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<CoreError> for ComponentError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MissingParameter { name } => ComponentError::MissingParameter { name },
            other => ComponentError::State(other),
        }
    }
}
