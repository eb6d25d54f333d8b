//! Preset fishery model definitions.
//!
//! Two reference fisheries: a rock-lobster fishery (pot-lift effort, tonnes
//! of biomass) and a generic fin-fish fishery at roughly one tenth the
//! scale. Both come in quota- or effort-controlled form.

use std::sync::Arc;

use bf_components::{Component, Economics, EffortCatch, LogisticGrowth, QuotaCatch};
use bf_core::{AttributeMeta, State};

use crate::model::Model;

/// Which management control drives the harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPolicy {
    /// Fixed total allowable catch.
    Quota,
    /// Fixed fishing effort.
    Effort,
}

fn fishery_state(cpue_unit: &str, effort_unit: &str, effort_scale: f64) -> State {
    State::new([
        (
            "biomass",
            AttributeMeta::new("Biomass", "tonnes").with_scale(1000.0).with_order(0).shown(),
        ),
        (
            "catch",
            AttributeMeta::new("Catch", "tonnes").with_scale(1000.0).with_order(1).shown(),
        ),
        ("profit", AttributeMeta::new("Profit", "$ (millions)").with_scale(1e6).with_order(2)),
        ("revenue", AttributeMeta::new("Revenue", "$ (millions)").with_scale(1e6).with_order(3)),
        ("cost", AttributeMeta::new("Cost", "$ (millions)").with_scale(1e6).with_order(4)),
        (
            "discounted_profit",
            AttributeMeta::new("Discounted profit", "$ (millions)").with_scale(1e6).with_order(5),
        ),
        ("cpue", AttributeMeta::new("CPUE", cpue_unit).with_order(6)),
        (
            "effort",
            AttributeMeta::new("Effort", effort_unit).with_scale(effort_scale).with_order(7),
        ),
        ("fleet_size", AttributeMeta::new("Fleet Size", "# vessels").with_order(8)),
    ])
}

/// A lobster fishery, loosely based on the Tasmanian rock lobster fishery.
pub fn lobster_model(policy: ControlPolicy) -> Model {
    let mut growth = LogisticGrowth::new();
    growth.r.value = 1.0;
    growth.r.max = 2.0;
    growth.k.value = 7_000_000.0;
    growth.k.max = 10_000_000.0;
    growth.k.unit = "t".to_string();
    growth.k.scale = 1000.0;

    let catch_control: Arc<dyn Component> = match policy {
        ControlPolicy::Quota => {
            let mut control = QuotaCatch::new();
            control.catch_rate.value = 1.0;
            control.catch_rate.min = 0.001;
            control.catch_rate.max = 5.0;
            control.catch_rate.unit = "kg/potlift".to_string();
            control.quota.value = 1_500_000.0;
            control.quota.max = 6_000_000.0;
            control.quota.unit = "t".to_string();
            control.quota.scale = 1000.0;
            Arc::new(control)
        }
        ControlPolicy::Effort => {
            let mut control = EffortCatch::new();
            control.catch_rate.value = 1.0;
            control.catch_rate.min = 0.001;
            control.catch_rate.max = 5.0;
            control.catch_rate.unit = "kg/potlift".to_string();
            control.effort.value = 1_500_000.0;
            control.effort.max = 5_000_000.0;
            control.effort.description = "Number of potlifts".to_string();
            control.effort.scale = 1e6;
            control.effort.scale_label = "millions".to_string();
            Arc::new(control)
        }
    };

    let mut economics = Economics::new();
    economics.fixed_cost.value = 100_000.0;
    economics.fixed_cost.min = 50_000.0;
    economics.fixed_cost.max = 200_000.0;
    economics.fixed_cost.unit = "$/year".to_string();
    economics.fixed_cost.scale = 1000.0;
    economics.fixed_cost.scale_label = "thousands".to_string();
    economics.marginal_cost.value = 30.0;
    economics.marginal_cost.min = 5.0;
    economics.marginal_cost.max = 50.0;
    economics.marginal_cost.unit = "$/potlift".to_string();
    economics.movement_rate.max = 20.0;
    economics.movement_rate.unit = "vessels/year".to_string();
    economics.beach_price.value = 60.0;
    economics.beach_price.max = 100.0;
    economics.beach_price.unit = "$/kg".to_string();
    economics.discount_rate.value = 0.07;

    let mut state = fishery_state("kg/potlift", "millions of potlifts", 1e6);
    state.seed("biomass", 5_000_000.0).expect("biomass attribute exists");
    state.seed("fleet_size", 120.0).expect("fleet_size attribute exists");

    Model::new(
        vec![Arc::new(growth), catch_control, Arc::new(economics)],
        state,
    )
}

/// A generic fin-fish model, scaled down from the lobster fishery.
pub fn fish_model(policy: ControlPolicy) -> Model {
    let mut growth = LogisticGrowth::new();
    growth.r.value = 1.0;
    growth.r.max = 2.0;
    growth.k.value = 700_000.0;
    growth.k.max = 1_000_000.0;
    growth.k.unit = "t".to_string();
    growth.k.scale = 1000.0;

    let catch_control: Arc<dyn Component> = match policy {
        ControlPolicy::Quota => {
            let mut control = QuotaCatch::new();
            control.catch_rate.value = 100.0;
            control.catch_rate.min = 1.0;
            control.catch_rate.max = 500.0;
            control.catch_rate.unit = "kg/day".to_string();
            control.quota.value = 150_000.0;
            control.quota.max = 600_000.0;
            control.quota.unit = "t".to_string();
            control.quota.scale = 1000.0;
            Arc::new(control)
        }
        ControlPolicy::Effort => {
            let mut control = EffortCatch::new();
            control.catch_rate.value = 100.0;
            control.catch_rate.min = 1.0;
            control.catch_rate.max = 500.0;
            control.catch_rate.unit = "kg/day".to_string();
            control.effort.value = 1500.0;
            control.effort.max = 5000.0;
            control.effort.description = "Days fished".to_string();
            Arc::new(control)
        }
    };

    let mut economics = Economics::new();
    economics.fixed_cost.value = 10_000.0;
    economics.fixed_cost.min = 5000.0;
    economics.fixed_cost.max = 20_000.0;
    economics.fixed_cost.unit = "$/year".to_string();
    economics.fixed_cost.scale = 1000.0;
    economics.fixed_cost.scale_label = "thousands".to_string();
    economics.marginal_cost.value = 1000.0;
    economics.marginal_cost.min = 500.0;
    economics.marginal_cost.max = 5000.0;
    economics.marginal_cost.unit = "$/day".to_string();
    economics.movement_rate.max = 20.0;
    economics.movement_rate.unit = "vessels/year".to_string();
    economics.beach_price.value = 30.0;
    economics.beach_price.max = 60.0;
    economics.beach_price.unit = "$/kg".to_string();
    economics.discount_rate.value = 0.07;

    let mut state = fishery_state("kg/day", "Days fished", 1000.0);
    state.seed("biomass", 500_000.0).expect("biomass attribute exists");
    state.seed("fleet_size", 20.0).expect("fleet_size attribute exists");

    Model::new(
        vec![Arc::new(growth), catch_control, Arc::new(economics)],
        state,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lobster_quota_exposes_full_control_surface() {
        let model = lobster_model(ControlPolicy::Quota);
        let params = model.get_parameters();
        for name in [
            "r",
            "K",
            "catch_rate",
            "catch",
            "fixed_cost",
            "marginal_cost",
            "movement_rate",
            "beach_price",
            "discount_rate",
        ] {
            assert!(params.contains_key(name), "missing {name}");
        }
        assert!(!params.contains_key("effort"));
        assert_eq!(params["K"].value, 7_000_000.0);
        assert_eq!(params["catch"].value, 1_500_000.0);
    }

    #[test]
    fn lobster_effort_swaps_the_control_parameter() {
        let model = lobster_model(ControlPolicy::Effort);
        let params = model.get_parameters();
        assert!(params.contains_key("effort"));
        assert!(!params.contains_key("catch"));
    }

    #[test]
    fn lobster_state_layout() {
        let model = lobster_model(ControlPolicy::Quota);
        let state = model.state();
        assert_eq!(
            state.attribute_names(),
            vec![
                "biomass",
                "catch",
                "profit",
                "revenue",
                "cost",
                "discounted_profit",
                "cpue",
                "effort",
                "fleet_size"
            ]
        );
        assert_eq!(state.default_shown(), vec!["biomass", "catch"]);
        assert_eq!(state.get("biomass").unwrap(), 5_000_000.0);
        assert_eq!(state.get("fleet_size").unwrap(), 120.0);
        assert!(state.get("cpue").unwrap().is_nan());
    }

    #[test]
    fn lobster_runs_ten_years() {
        let mut model = lobster_model(ControlPolicy::Quota);
        model.run(10, false).unwrap();
        assert_eq!(model.state().len(), 11);
        assert!(model.state().get("biomass").unwrap() > 0.0);
    }

    #[test]
    fn fish_model_is_the_scaled_down_fishery() {
        let mut model = fish_model(ControlPolicy::Effort);
        assert_eq!(model.state().get("biomass").unwrap(), 500_000.0);
        assert_eq!(model.get_parameters()["K"].value, 700_000.0);
        model.run(5, false).unwrap();
        assert!(model.state().get("biomass").unwrap() >= 0.0);
    }
}
