//! Core trait for pipeline components.

use std::collections::BTreeMap;

use bf_core::{ParamSet, Parameter, State};

use crate::error::ComponentResult;

/// One stage of the model pipeline.
///
/// Components are deterministic functions of state and parameters and hold
/// no mutable run state, so a pipeline is safely shareable between cloned
/// models running on different threads.
pub trait Component: Send + Sync {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    /// Parameter templates this component requires, keyed by parameter name.
    ///
    /// The model merges these across the pipeline to build its control
    /// surface; override values are applied on top at run time.
    fn parameters(&self) -> BTreeMap<String, Parameter>;

    /// Advance the current time step.
    ///
    /// Reads and writes only the *current* (and for abundance proxies the
    /// *previous*) entries of the state's series. `equilibrium` selects the
    /// steady-state formulation used by static sweeps.
    fn execute(&self, state: &mut State, params: &ParamSet, equilibrium: bool)
        -> ComponentResult<()>;
}
