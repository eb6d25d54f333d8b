//! Helpers shared by the catch-control components.

use bf_core::Real;

/// Catch per unit effort, derived from the previous step's stock abundance.
///
/// Using last step's biomass keeps the abundance proxy independent of the
/// same step's growth update.
pub(crate) fn cpue(previous_biomass: Real, capacity: Real, catch_rate: Real) -> Real {
    previous_biomass / capacity * catch_rate
}

/// Remove `target` from the pre-catch biomass, clamping at zero.
///
/// Returns `(new_biomass, actual_catch)`: more cannot be removed than
/// exists, so a clamped harvest reports the feasible catch.
pub(crate) fn apply_harvest(pre_catch_biomass: Real, target: Real) -> (Real, Real) {
    let remaining = pre_catch_biomass - target;
    if remaining < 0.0 {
        (0.0, pre_catch_biomass)
    } else {
        (remaining, target)
    }
}
