//! Effort-controlled harvest.

use std::collections::BTreeMap;

use bf_core::{ParamSet, Parameter, State};

use crate::common::{apply_harvest, cpue};
use crate::error::ComponentResult;
use crate::traits::Component;

/// Fixed-effort control: the catch follows from effort times CPUE.
#[derive(Debug, Clone)]
pub struct EffortCatch {
    pub catch_rate: Parameter,
    pub effort: Parameter,
}

impl Default for EffortCatch {
    fn default() -> Self {
        Self {
            catch_rate: Parameter::new(
                "Max catch rate",
                "The biomass caught per unit of effort",
                "Fleet dynamics",
            ),
            effort: Parameter::new("Effort", "Fishing effort", "Management Controls"),
        }
    }
}

impl EffortCatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for EffortCatch {
    fn name(&self) -> &str {
        "effort_catch"
    }

    fn parameters(&self) -> BTreeMap<String, Parameter> {
        BTreeMap::from([
            ("catch_rate".to_string(), self.catch_rate.clone()),
            ("effort".to_string(), self.effort.clone()),
        ])
    }

    fn execute(
        &self,
        state: &mut State,
        params: &ParamSet,
        _equilibrium: bool,
    ) -> ComponentResult<()> {
        let capacity = params.require("K")?;
        let catch_rate = params.require("catch_rate")?;
        let effort = params.require("effort")?;

        let previous_biomass = state.previous("biomass")?;
        let pre_catch_biomass = state.get("biomass")?;

        let cpue = cpue(previous_biomass, capacity, catch_rate);
        let (biomass, caught) = apply_harvest(pre_catch_biomass, effort * cpue);

        state.set("cpue", cpue)?;
        state.set("catch", caught)?;
        state.set("biomass", biomass)?;
        state.set("effort", effort)?;
        Ok(())
    }
}
