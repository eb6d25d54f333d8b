//! Logistic population growth dynamics.

use std::collections::BTreeMap;

use bf_core::{ParamSet, Parameter, State};

use crate::error::{ComponentError, ComponentResult};
use crate::traits::Component;

/// Discrete logistic growth of the stock biomass.
///
/// In a dynamic step the current biomass grows by `b·r·(1 − b/K)` before any
/// harvest is taken. In an equilibrium step the component instead solves for
/// the steady-state biomass consistent with the active catch control: the
/// quota formulation when a `catch` parameter is present, the effort
/// formulation otherwise.
#[derive(Debug, Clone)]
pub struct LogisticGrowth {
    pub r: Parameter,
    pub k: Parameter,
}

impl Default for LogisticGrowth {
    fn default() -> Self {
        Self {
            r: Parameter::new(
                "Population growth rate",
                "The maximum growth rate of the population",
                "Population dynamics",
            ),
            k: Parameter::new(
                "Maximum population size",
                "The size of an unfished (virgin) population",
                "Population dynamics",
            ),
        }
    }
}

impl LogisticGrowth {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for LogisticGrowth {
    fn name(&self) -> &str {
        "logistic_growth"
    }

    fn parameters(&self) -> BTreeMap<String, Parameter> {
        BTreeMap::from([
            ("r".to_string(), self.r.clone()),
            ("K".to_string(), self.k.clone()),
        ])
    }

    fn execute(
        &self,
        state: &mut State,
        params: &ParamSet,
        equilibrium: bool,
    ) -> ComponentResult<()> {
        let r = params.require("r")?;
        let k = params.require("K")?;
        if r == 0.0 || k == 0.0 {
            return Err(ComponentError::DegenerateParameter {
                what: "logistic growth requires r != 0 and K != 0",
            });
        }

        if equilibrium {
            if let Some(quota) = params.get("catch") {
                // Steady state under a fixed removal C: the positive root of
                // r·B·(1 − B/K) = C. A negative discriminant means no stock
                // can sustain that catch: the population has collapsed.
                let disc = r * r - 4.0 * quota * r / k;
                let biomass = if disc < 0.0 {
                    0.0
                } else {
                    // The quota is added back because the catch component
                    // removes it again within the same pass.
                    (r + disc.sqrt()) / (2.0 * r / k) + quota
                };
                state.set("biomass", biomass)?;
            } else {
                let catch_rate = params.require("catch_rate")?;
                let effort = params.require("effort")?;
                let b = state.get("biomass")?;
                let catch = b * catch_rate * effort / k;
                state.set("biomass", k - catch_rate * effort / r + catch)?;
            }
        } else {
            let b = state.get("biomass")?;
            state.set("biomass", b + b * r * (1.0 - b / k))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::AttributeMeta;

    fn biomass_state(initial: f64) -> State {
        let mut state = State::new([("biomass", AttributeMeta::new("Biomass", "t"))]);
        state.seed("biomass", initial).unwrap();
        state.extend();
        state
    }

    fn params(pairs: &[(&str, f64)]) -> ParamSet {
        let mut set = ParamSet::default();
        for &(name, value) in pairs {
            set.insert(name, value);
        }
        set
    }

    #[test]
    fn dynamic_logistic_step() {
        let growth = LogisticGrowth::new();
        let mut state = biomass_state(5_000_000.0);
        let params = params(&[("r", 1.0), ("K", 7_000_000.0)]);

        growth.execute(&mut state, &params, false).unwrap();

        // b + b·r·(1 − b/K) = 5e6 + 5e6·(1 − 5/7)
        let expected = 6_428_571.43;
        assert!((state.get("biomass").unwrap() - expected).abs() < 1e-2);
    }

    #[test]
    fn dynamic_step_leaves_previous_untouched() {
        let growth = LogisticGrowth::new();
        let mut state = biomass_state(5_000_000.0);
        let params = params(&[("r", 1.0), ("K", 7_000_000.0)]);

        growth.execute(&mut state, &params, false).unwrap();
        assert_eq!(state.previous("biomass").unwrap(), 5_000_000.0);
    }

    #[test]
    fn equilibrium_quota_round_trip() {
        let growth = LogisticGrowth::new();
        let (r, k) = (1.0, 7_000_000.0);
        // Sustainable: C below the MSY bound r·K/4
        let quota = 1_500_000.0;
        assert!(quota <= r * k / 4.0);

        let mut state = biomass_state(5_000_000.0);
        let params = params(&[("r", r), ("K", k), ("catch", quota)]);
        growth.execute(&mut state, &params, true).unwrap();

        // The quota is added back on, so the steady biomass is state − C.
        let b = state.get("biomass").unwrap() - quota;
        let surplus = r * b * (1.0 - b / k);
        assert!(
            (surplus - quota).abs() < 1e-3,
            "surplus {surplus} should equal quota {quota}"
        );
    }

    #[test]
    fn equilibrium_quota_collapse() {
        let growth = LogisticGrowth::new();
        let (r, k) = (1.0, 7_000_000.0);
        // Above r·K/4: no steady state exists
        let quota = r * k / 4.0 * 1.01;

        let mut state = biomass_state(5_000_000.0);
        let params = params(&[("r", r), ("K", k), ("catch", quota)]);
        growth.execute(&mut state, &params, true).unwrap();

        assert_eq!(state.get("biomass").unwrap(), 0.0);
    }

    #[test]
    fn equilibrium_effort_branch() {
        let growth = LogisticGrowth::new();
        let (r, k) = (1.0, 7_000_000.0);
        let (catch_rate, effort) = (1.0, 1_500_000.0);

        let mut state = biomass_state(5_000_000.0);
        let params = params(&[
            ("r", r),
            ("K", k),
            ("catch_rate", catch_rate),
            ("effort", effort),
        ]);
        growth.execute(&mut state, &params, true).unwrap();

        let b0 = 5_000_000.0;
        let catch = b0 * catch_rate * effort / k;
        let expected = k - catch_rate * effort / r + catch;
        assert!((state.get("biomass").unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn degenerate_r_or_k_is_configuration_error() {
        let growth = LogisticGrowth::new();
        let mut state = biomass_state(5_000_000.0);

        let err = growth
            .execute(&mut state, &params(&[("r", 0.0), ("K", 7e6)]), false)
            .unwrap_err();
        assert!(matches!(err, ComponentError::DegenerateParameter { .. }));

        let err = growth
            .execute(&mut state, &params(&[("r", 1.0), ("K", 0.0)]), true)
            .unwrap_err();
        assert!(matches!(err, ComponentError::DegenerateParameter { .. }));
    }

    #[test]
    fn missing_parameter_is_configuration_error() {
        let growth = LogisticGrowth::new();
        let mut state = biomass_state(5_000_000.0);
        let err = growth
            .execute(&mut state, &params(&[("r", 1.0)]), false)
            .unwrap_err();
        assert!(matches!(err, ComponentError::MissingParameter { .. }));
    }
}
