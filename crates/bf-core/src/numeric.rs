/// Floating point type used throughout the model core
pub type Real = f64;

/// Snap values inside the noise floor to exactly zero.
///
/// Used for profit reporting: magnitudes below the floor are measurement
/// noise relative to fleet-scale economics and must not show up as a trend.
pub fn snap_to_zero(v: Real, floor: Real) -> Real {
    if v.abs() < floor {
        0.0
    } else {
        v
    }
}

/// `n` evenly spaced samples over `[lo, hi]`, endpoints included.
///
/// `n == 1` yields `[lo]`; `n == 0` yields an empty grid.
pub fn linspace(lo: Real, hi: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as Real;
            (0..n).map(|i| lo + step * i as Real).collect()
        }
    }
}
