//! Model pipeline driver and preset fishery definitions.
//!
//! A [`Model`] combines an ordered component pipeline, a parameter override
//! map and one [`bf_core::State`] into a runnable fishery definition. The
//! presets reproduce the two reference fisheries (rock lobster and generic
//! fin-fish) in quota- or effort-controlled form.

pub mod error;
pub mod model;
pub mod presets;

pub use error::{ModelError, ModelResult};
pub use model::Model;
pub use presets::{fish_model, lobster_model, ControlPolicy};
