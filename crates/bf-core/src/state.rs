//! Time-indexed model state.
//!
//! A [`State`] holds one growable series per tracked attribute (biomass,
//! catch, effort, ...) plus display metadata. Every series has the same
//! length at every observable instant; the last entry of each series is the
//! current time step. Components read and write only through [`State::get`],
//! [`State::set`] and [`State::previous`], and the step lifecycle is explicit
//! via [`State::extend`] and [`State::reset`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Display metadata for one state attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeMeta {
    pub title: String,
    pub unit: String,
    pub scale: Real,
    pub category: String,
    /// Display position among attributes (plot legend order).
    pub order: usize,
    /// Whether the attribute is plotted before the user picks anything.
    pub default_shown: bool,
}

impl AttributeMeta {
    pub fn new(title: &str, unit: &str) -> Self {
        Self {
            title: title.to_string(),
            unit: unit.to_string(),
            scale: 1.0,
            category: String::new(),
            order: 0,
            default_shown: false,
        }
    }

    pub fn with_scale(mut self, scale: Real) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn shown(mut self) -> Self {
        self.default_shown = true;
        self
    }
}

/// Equal-length time series container shared by all pipeline components.
#[derive(Debug, Clone)]
pub struct State {
    series: BTreeMap<String, Vec<Real>>,
    meta: BTreeMap<String, AttributeMeta>,
}

impl State {
    /// Create a state with one single-entry series per attribute, every
    /// value unknown (NaN) until explicitly seeded.
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeMeta)>,
        S: Into<String>,
    {
        let mut series = BTreeMap::new();
        let mut meta = BTreeMap::new();
        for (name, m) in attributes {
            let name = name.into();
            series.insert(name.clone(), vec![Real::NAN]);
            meta.insert(name, m);
        }
        Self { series, meta }
    }

    /// Overwrite the initial (first) entry of an attribute's series.
    pub fn seed(&mut self, name: &str, value: Real) -> CoreResult<()> {
        let series = self.series_mut(name)?;
        series[0] = value;
        Ok(())
    }

    /// Append a copy of each attribute's last value, growing every series
    /// by one. The new entries become the current time step.
    pub fn extend(&mut self) {
        for series in self.series.values_mut() {
            let last = *series.last().unwrap_or(&Real::NAN);
            series.push(last);
        }
    }

    /// Truncate every series back to its initial entry.
    pub fn reset(&mut self) {
        for series in self.series.values_mut() {
            series.truncate(1);
        }
    }

    /// Current (last-entry) value of an attribute.
    pub fn get(&self, name: &str) -> CoreResult<Real> {
        let series = self.series(name)?;
        Ok(*series.last().expect("series is never empty"))
    }

    /// Overwrite the current (last-entry) value of an attribute.
    pub fn set(&mut self, name: &str, value: Real) -> CoreResult<()> {
        let series = self.series_mut(name)?;
        *series.last_mut().expect("series is never empty") = value;
        Ok(())
    }

    /// Value of an attribute at the previous time step.
    ///
    /// Components use this for stock-abundance proxies (CPUE) so a step's
    /// harvest never sees the same step's post-growth biomass.
    pub fn previous(&self, name: &str) -> CoreResult<Real> {
        let series = self.series(name)?;
        if series.len() < 2 {
            return Err(CoreError::Invariant {
                what: "no previous time step before first extend",
            });
        }
        Ok(series[series.len() - 2])
    }

    /// Full series for one attribute (plot read surface).
    pub fn series(&self, name: &str) -> CoreResult<&[Real]> {
        self.series
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    fn series_mut(&mut self, name: &str) -> CoreResult<&mut Vec<Real>> {
        self.series
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// Metadata for one attribute.
    pub fn meta(&self, name: &str) -> CoreResult<&AttributeMeta> {
        self.meta
            .get(name)
            .ok_or_else(|| CoreError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// Number of completed time steps, including the initial one.
    pub fn len(&self) -> usize {
        self.series.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attribute names in display order.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.meta.keys().map(String::as_str).collect();
        names.sort_by_key(|n| (self.meta[*n].order, *n));
        names
    }

    /// Distinct units in display order, for grouping plot axes.
    pub fn unit_order(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for name in self.attribute_names() {
            let unit = self.meta[name].unit.as_str();
            if !seen.contains(&unit) {
                seen.push(unit);
            }
        }
        seen
    }

    /// Attributes plotted by default, in display order.
    pub fn default_shown(&self) -> Vec<&str> {
        self.attribute_names()
            .into_iter()
            .filter(|n| self.meta[*n].default_shown)
            .collect()
    }

    /// Append `other`'s current value of every attribute of `self`.
    ///
    /// Used when accumulating an equilibrium sweep: each converged sample
    /// contributes one entry per attribute to the output state.
    pub fn push_current_from(&mut self, other: &State) -> CoreResult<()> {
        for (name, series) in &mut self.series {
            let value = other.get(name)?;
            series.push(value);
        }
        Ok(())
    }
}
