//! Fleet economics and endogenous fleet-size dynamics.

use std::collections::BTreeMap;

use bf_core::{snap_to_zero, ParamSet, Parameter, Real, State};

use crate::error::ComponentResult;
use crate::traits::Component;

/// Profit magnitudes under this floor are reported as exactly zero so that
/// near-equilibrium noise never shows up as a trend.
const PROFIT_NOISE_FLOOR: Real = 1_000_000.0;

/// Safety cap on the fleet-adjustment search. With a positive fixed cost the
/// loop converges long before this; the cap only guards fixed_cost = 0.
const MAX_FLEET_ITERATIONS: usize = 1_000_000;

/// Fleet economics: revenue, cost, profit and fleet-size adjustment.
///
/// The fleet grows or shrinks one vessel at a time toward the size at which
/// marginal profit per vessel is absorbed by the fixed cost. Outside
/// equilibrium mode the per-step movement is bounded by `movement_rate`;
/// inside equilibrium mode the search runs to convergence.
#[derive(Debug, Clone)]
pub struct Economics {
    pub fixed_cost: Parameter,
    pub marginal_cost: Parameter,
    pub movement_rate: Parameter,
    pub beach_price: Parameter,
    pub discount_rate: Parameter,
}

impl Default for Economics {
    fn default() -> Self {
        Self {
            fixed_cost: Parameter::new(
                "Operator fixed cost",
                "An individual operator's fixed annual cost",
                "Economics",
            ),
            marginal_cost: Parameter::new(
                "Operator marginal cost",
                "An individual operator's marginal cost per unit effort",
                "Economics",
            ),
            movement_rate: Parameter::new(
                "Fleet resize rate",
                "The maximum rate at which vessels can enter or exit the fishery",
                "Fleet dynamics",
            ),
            beach_price: Parameter::new(
                "Beach price",
                "The price per kg of landed fish",
                "Economics",
            ),
            discount_rate: Parameter::new("Discount rate", "The discount rate", "Economics"),
        }
    }
}

impl Economics {
    pub fn new() -> Self {
        Self::default()
    }

    fn revenue(catch: Real, beach_price: Real) -> Real {
        catch * beach_price
    }

    fn cost(fleet_size: Real, fixed_cost: Real, effort: Real, marginal_cost: Real) -> Real {
        fleet_size * fixed_cost + effort * marginal_cost
    }
}

impl Component for Economics {
    fn name(&self) -> &str {
        "economics"
    }

    fn parameters(&self) -> BTreeMap<String, Parameter> {
        BTreeMap::from([
            ("fixed_cost".to_string(), self.fixed_cost.clone()),
            ("marginal_cost".to_string(), self.marginal_cost.clone()),
            ("movement_rate".to_string(), self.movement_rate.clone()),
            ("beach_price".to_string(), self.beach_price.clone()),
            ("discount_rate".to_string(), self.discount_rate.clone()),
        ])
    }

    fn execute(
        &self,
        state: &mut State,
        params: &ParamSet,
        equilibrium: bool,
    ) -> ComponentResult<()> {
        let fixed_cost = params.require("fixed_cost")?;
        let marginal_cost = params.require("marginal_cost")?;
        let movement_rate = params.require("movement_rate")?;
        let beach_price = params.require("beach_price")?;
        let discount_rate = params.require("discount_rate")?;

        let catch = state.get("catch")?;
        let effort = state.get("effort")?;
        let mut fleet_size = state.get("fleet_size")?;
        let fleet_size_at_start = fleet_size;

        let profit_at =
            |fleet: Real| Self::revenue(catch, beach_price) - Self::cost(fleet, fixed_cost, effort, marginal_cost);

        // Vessels enter while profitable and exit while loss-making, one at
        // a time, until per-vessel profit is absorbed by the fixed cost or
        // the movement bound is hit.
        let mut iterations = 0;
        while profit_at(fleet_size).abs() > fixed_cost
            && ((equilibrium && movement_rate > 0.0)
                || (fleet_size - fleet_size_at_start).abs() < movement_rate)
            && iterations < MAX_FLEET_ITERATIONS
        {
            if profit_at(fleet_size) > 0.0 {
                fleet_size += 1.0;
            } else {
                fleet_size -= 1.0;
            }
            iterations += 1;
        }
        state.set("fleet_size", fleet_size)?;

        let cost = Self::cost(fleet_size, fixed_cost, effort, marginal_cost);
        let revenue = Self::revenue(catch, beach_price);
        let profit = snap_to_zero(revenue - cost, PROFIT_NOISE_FLOOR);

        state.set("cost", cost)?;
        state.set("revenue", revenue)?;
        state.set("profit", profit)?;

        // Exponent 0 on the first completed step after the initial entry.
        let steps_elapsed = state.len().saturating_sub(2) as i32;
        state.set(
            "discounted_profit",
            profit * (1.0 - discount_rate).powi(steps_elapsed),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::AttributeMeta;

    fn econ_state(catch: f64, effort: f64, fleet_size: f64) -> State {
        let mut state = State::new([
            ("catch", AttributeMeta::new("Catch", "t")),
            ("effort", AttributeMeta::new("Effort", "potlifts")),
            ("fleet_size", AttributeMeta::new("Fleet Size", "# vessels")),
            ("revenue", AttributeMeta::new("Revenue", "$")),
            ("cost", AttributeMeta::new("Cost", "$")),
            ("profit", AttributeMeta::new("Profit", "$")),
            ("discounted_profit", AttributeMeta::new("Discounted profit", "$")),
        ]);
        state.seed("catch", catch).unwrap();
        state.seed("effort", effort).unwrap();
        state.seed("fleet_size", fleet_size).unwrap();
        state.extend();
        state
    }

    fn params(
        fixed: f64,
        marginal: f64,
        movement: f64,
        price: f64,
        discount: f64,
    ) -> ParamSet {
        let mut set = ParamSet::default();
        set.insert("fixed_cost", fixed);
        set.insert("marginal_cost", marginal);
        set.insert("movement_rate", movement);
        set.insert("beach_price", price);
        set.insert("discount_rate", discount);
        set
    }

    #[test]
    fn movement_rate_bounds_fleet_change_per_step() {
        let econ = Economics::new();
        // Hugely profitable: revenue 9e7, cost per vessel 1e5
        let mut state = econ_state(1_500_000.0, 1_000_000.0, 100.0);
        let params = params(100_000.0, 30.0, 5.0, 60.0, 0.0);

        econ.execute(&mut state, &params, false).unwrap();

        // Fleet may move at most movement_rate vessels in a dynamic step.
        assert_eq!(state.get("fleet_size").unwrap(), 105.0);
    }

    #[test]
    fn equilibrium_converges_to_zero_marginal_profit() {
        let econ = Economics::new();
        let mut state = econ_state(1_500_000.0, 1_000_000.0, 100.0);
        let params = params(100_000.0, 30.0, 5.0, 60.0, 0.0);

        econ.execute(&mut state, &params, true).unwrap();

        let fleet = state.get("fleet_size").unwrap();
        let profit = 1_500_000.0 * 60.0 - (fleet * 100_000.0 + 1_000_000.0 * 30.0);
        assert!(
            profit.abs() <= 100_000.0,
            "terminal profit {profit} must be within one fixed cost"
        );
    }

    #[test]
    fn zero_movement_rate_freezes_fleet_outside_equilibrium() {
        let econ = Economics::new();
        let mut state = econ_state(1_500_000.0, 1_000_000.0, 100.0);
        let params = params(100_000.0, 30.0, 0.0, 60.0, 0.0);

        econ.execute(&mut state, &params, false).unwrap();
        assert_eq!(state.get("fleet_size").unwrap(), 100.0);

        // And equilibrium mode with movement_rate 0 also leaves it alone.
        let mut state = econ_state(1_500_000.0, 1_000_000.0, 100.0);
        econ.execute(&mut state, &params, true).unwrap();
        assert_eq!(state.get("fleet_size").unwrap(), 100.0);
    }

    #[test]
    fn small_profit_snaps_to_zero() {
        let econ = Economics::new();
        // revenue 900_000, cost 0: inside the noise floor
        let mut state = econ_state(15_000.0, 0.0, 0.0);
        let params = params(1e9, 0.0, 0.0, 60.0, 0.0);

        econ.execute(&mut state, &params, false).unwrap();

        assert_eq!(state.get("profit").unwrap(), 0.0);
        assert_eq!(state.get("discounted_profit").unwrap(), 0.0);
        assert_eq!(state.get("revenue").unwrap(), 900_000.0);
    }

    #[test]
    fn discounting_applies_from_second_completed_step() {
        let econ = Economics::new();
        let params = params(100_000.0, 0.0, 0.0, 60.0, 0.1);

        // First completed step: exponent 0
        let mut state = econ_state(1_000_000.0, 0.0, 100.0);
        econ.execute(&mut state, &params, false).unwrap();
        let profit = state.get("profit").unwrap();
        assert_eq!(state.get("discounted_profit").unwrap(), profit);

        // Second completed step: exponent 1
        state.extend();
        econ.execute(&mut state, &params, false).unwrap();
        let profit = state.get("profit").unwrap();
        assert!((state.get("discounted_profit").unwrap() - profit * 0.9).abs() < 1e-6);
    }

    #[test]
    fn fleet_loop_terminates_with_zero_fixed_cost() {
        let econ = Economics::new();
        let mut state = econ_state(1_500_000.0, 1_000_000.0, 100.0);
        // fixed_cost 0 makes |profit| > fixed_cost unreachable by fleet
        // movement; the safety cap must still end the loop.
        let params = params(0.0, 30.0, 5.0, 60.0, 0.0);

        econ.execute(&mut state, &params, true).unwrap();
        assert!(state.get("fleet_size").unwrap().is_finite());
    }
}
