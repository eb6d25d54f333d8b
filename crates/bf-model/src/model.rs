//! The model: an ordered component pipeline over one shared state.

use std::collections::BTreeMap;
use std::sync::Arc;

use bf_components::Component;
use bf_core::{ParamSet, Parameter, Real, State};
use tracing::debug;

use crate::error::{ModelError, ModelResult};

/// A complete, runnable model definition.
///
/// Components are shared (`Arc`) because they are stateless with respect to
/// the run: cloning a model for background execution deep-copies the state
/// and the override map but reuses the pipeline.
#[derive(Clone)]
pub struct Model {
    components: Vec<Arc<dyn Component>>,
    parameters: BTreeMap<String, Real>,
    state: State,
}

impl Model {
    pub fn new(components: Vec<Arc<dyn Component>>, initial_state: State) -> Self {
        Self {
            components,
            parameters: BTreeMap::new(),
            state: initial_state,
        }
    }

    /// Parameter templates required by the pipeline, in pipeline merge
    /// order, with any override values applied.
    ///
    /// This is the control surface: one entry per distinct parameter name.
    pub fn get_parameters(&self) -> BTreeMap<String, Parameter> {
        let mut merged = BTreeMap::new();
        for component in &self.components {
            merged.extend(component.parameters());
        }
        for (name, value) in &self.parameters {
            if let Some(parameter) = merged.get_mut(name) {
                parameter.value = *value;
            }
        }
        merged
    }

    /// Replace the override map for this and subsequent steps.
    pub fn set_parameters(&mut self, parameters: BTreeMap<String, Real>) {
        self.parameters = parameters;
    }

    /// Override a single parameter value.
    pub fn set_parameter(&mut self, name: &str, value: Real) {
        self.parameters.insert(name.to_string(), value);
    }

    /// Distinct parameter categories, for grouping the control surface.
    pub fn parameter_categories(&self) -> Vec<String> {
        let mut categories = Vec::new();
        for parameter in self.get_parameters().values() {
            if !categories.contains(&parameter.category) {
                categories.push(parameter.category.clone());
            }
        }
        categories
    }

    /// Template values overlaid with the override map.
    pub fn resolved_parameters(&self) -> ParamSet {
        let mut values: BTreeMap<String, Real> = self
            .get_parameters()
            .into_iter()
            .map(|(name, parameter)| (name, parameter.value))
            .collect();
        for (name, value) in &self.parameters {
            values.insert(name.clone(), *value);
        }
        ParamSet::new(values)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Truncate the state back to its initial time step.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Advance the model `steps` time steps.
    ///
    /// Each step extends every series by one and then runs the pipeline in
    /// order. `equilibrium` selects the components' steady-state
    /// formulations (used by static sweeps).
    pub fn run(&mut self, steps: usize, equilibrium: bool) -> ModelResult<()> {
        let params = self.resolved_parameters();
        debug!(steps, equilibrium, "running model pipeline");
        for _ in 0..steps {
            self.state.extend();
            for component in &self.components {
                component
                    .execute(&mut self.state, &params, equilibrium)
                    .map_err(|source| ModelError::Component {
                        component: component.name().to_string(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}
