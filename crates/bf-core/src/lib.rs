//! bf-core: stable foundation for bluefin.
//!
//! Contains:
//! - numeric (Real + float helpers)
//! - parameter (bounded, unit-tagged parameter descriptors + resolved sets)
//! - state (equal-length time series container with attribute metadata)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod parameter;
pub mod state;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use parameter::{ParamSet, Parameter};
pub use state::{AttributeMeta, State};
