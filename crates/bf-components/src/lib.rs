//! Model components for the bluefin fishery pipeline.
//!
//! Each component is a deterministic function of the shared [`bf_core::State`]
//! and a resolved parameter set. Components hold only their parameter
//! templates, never run state, so a pipeline can be shared across cloned
//! models without synchronization.

pub mod common;
pub mod economics;
pub mod effort;
pub mod error;
pub mod growth;
pub mod quota;
pub mod traits;

pub use economics::Economics;
pub use effort::EffortCatch;
pub use error::{ComponentError, ComponentResult};
pub use growth::LogisticGrowth;
pub use quota::QuotaCatch;
pub use traits::Component;
