//! Quota (total-allowable-catch) harvest control.

use std::collections::BTreeMap;

use bf_core::{ParamSet, Parameter, State};

use crate::common::{apply_harvest, cpue};
use crate::error::ComponentResult;
use crate::traits::Component;

/// Fixed-catch control: a total allowable catch is removed each step.
///
/// CPUE is derived from the previous step's biomass fraction times the catch
/// rate, and effort is back-calculated from the realized catch.
#[derive(Debug, Clone)]
pub struct QuotaCatch {
    pub catch_rate: Parameter,
    pub quota: Parameter,
}

impl Default for QuotaCatch {
    fn default() -> Self {
        Self {
            catch_rate: Parameter::new(
                "Max catch rate",
                "The biomass caught per unit of effort",
                "Fleet dynamics",
            ),
            quota: Parameter::new("TAC", "Total allowable catch", "Management Controls"),
        }
    }
}

impl QuotaCatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for QuotaCatch {
    fn name(&self) -> &str {
        "quota_catch"
    }

    fn parameters(&self) -> BTreeMap<String, Parameter> {
        BTreeMap::from([
            ("catch_rate".to_string(), self.catch_rate.clone()),
            ("catch".to_string(), self.quota.clone()),
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
        let quota = params.require("catch")?;

        let previous_biomass = state.previous("biomass")?;
        let pre_catch_biomass = state.get("biomass")?;

        let cpue = cpue(previous_biomass, capacity, catch_rate);
        let (biomass, caught) = apply_harvest(pre_catch_biomass, quota);

        state.set("cpue", cpue)?;
        state.set("biomass", biomass)?;
        state.set("catch", caught)?;
        let effort = if cpue > 0.0 { caught / cpue } else { 0.0 };
        state.set("effort", effort)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::AttributeMeta;

    fn fishery_state(biomass: f64) -> State {
        let mut state = State::new([
            ("biomass", AttributeMeta::new("Biomass", "t")),
            ("catch", AttributeMeta::new("Catch", "t")),
            ("cpue", AttributeMeta::new("CPUE", "kg/potlift")),
            ("effort", AttributeMeta::new("Effort", "potlifts")),
        ]);
        state.seed("biomass", biomass).unwrap();
        state.extend();
        state
    }

    fn params(k: f64, catch_rate: f64, quota: f64) -> ParamSet {
        let mut set = ParamSet::default();
        set.insert("K", k);
        set.insert("catch_rate", catch_rate);
        set.insert("catch", quota);
        set
    }

    #[test]
    fn quota_removed_and_effort_derived() {
        let quota = QuotaCatch::new();
        let mut state = fishery_state(5_000_000.0);
        quota
            .execute(&mut state, &params(7e6, 1.0, 1_500_000.0), false)
            .unwrap();

        let cpue = 5_000_000.0 / 7e6;
        assert_eq!(state.get("biomass").unwrap(), 3_500_000.0);
        assert_eq!(state.get("catch").unwrap(), 1_500_000.0);
        assert!((state.get("cpue").unwrap() - cpue).abs() < 1e-12);
        assert!((state.get("effort").unwrap() - 1_500_000.0 / cpue).abs() < 1e-6);
    }

    #[test]
    fn over_quota_clamps_biomass_and_reports_feasible_catch() {
        let quota = QuotaCatch::new();
        let mut state = fishery_state(1_000_000.0);
        quota
            .execute(&mut state, &params(7e6, 1.0, 4_000_000.0), false)
            .unwrap();

        assert_eq!(state.get("biomass").unwrap(), 0.0);
        assert_eq!(state.get("catch").unwrap(), 1_000_000.0);
    }

    #[test]
    fn zero_cpue_means_zero_effort() {
        let quota = QuotaCatch::new();
        let mut state = fishery_state(0.0);
        quota
            .execute(&mut state, &params(7e6, 1.0, 1_000.0), false)
            .unwrap();

        assert_eq!(state.get("cpue").unwrap(), 0.0);
        assert_eq!(state.get("effort").unwrap(), 0.0);
    }
}
