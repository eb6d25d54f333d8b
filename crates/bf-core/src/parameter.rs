//! Parameter descriptors and resolved parameter sets.
//!
//! A [`Parameter`] is an immutable template: bounds, units and display
//! metadata for one model input. The value a run actually sees comes from a
//! [`ParamSet`], built by the model from component templates overlaid with
//! per-model overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// A named, bounded, unit-tagged model input.
///
/// Bounds are advisory (a control-surface concern); the core accepts any
/// numeric value. `scale`/`scale_label` describe how the value is presented
/// (e.g. scale 1e6 with label "millions").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub value: Real,
    pub min: Real,
    pub max: Real,
    pub unit: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub scale: Real,
    pub scale_label: String,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            unit: String::new(),
            title: String::new(),
            description: String::new(),
            category: "Miscellaneous".to_string(),
            scale: 1.0,
            scale_label: String::new(),
        }
    }
}

impl Parameter {
    pub fn new(title: &str, description: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: Real) -> Self {
        self.value = value;
        self
    }

    pub fn with_range(mut self, min: Real, max: Real) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_scale(mut self, scale: Real, label: &str) -> Self {
        self.scale = scale;
        self.scale_label = label.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Resolved name→value mapping handed to components at execute time.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    values: BTreeMap<String, Real>,
}

impl ParamSet {
    pub fn new(values: BTreeMap<String, Real>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<Real> {
        self.values.get(name).copied()
    }

    /// Fetch a parameter a component cannot run without.
    pub fn require(&self, name: &str) -> CoreResult<Real> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::MissingParameter {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, value: Real) {
        self.values.insert(name.to_string(), value);
    }
}

impl From<BTreeMap<String, Real>> for ParamSet {
    fn from(values: BTreeMap<String, Real>) -> Self {
        Self { values }
    }
}
