//! Error types for model runs.

use bf_components::ComponentError;
use bf_core::CoreError;
use thiserror::Error;

/// Errors aborting a model run.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    #[error("Component '{component}' failed: {source}")]
    Component {
        component: String,
        source: ComponentError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ModelResult<T> = Result<T, ModelError>;
