//! Background run scheduling for bluefin models.
//!
//! The [`RunScheduler`] owns two persistent workers, one for dynamic
//! (trajectory) runs and one for static (equilibrium sweep) runs. Submission
//! is latest-wins and never blocks the caller; an in-flight run superseded
//! by a newer request is discarded at the next step or sample boundary
//! without delivering a result. Exactly one result callback fires per
//! accepted, non-superseded request.

pub mod scheduler;
mod worker;

pub use scheduler::{RunMode, RunModeKind, RunResult, RunScheduler, StaticOptions};
