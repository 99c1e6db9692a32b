//! Relative floating-point equality.
//!
//! Abscissa steps and integration limits are compared with a relative
//! tolerance so that grids read from text tables still register as
//! equidistant.

use fastrt_types::constants::DOUBLE_RELATIVE_ERROR;

/// True if `a` and `b` agree to within [`DOUBLE_RELATIVE_ERROR`] relative
/// to the smaller magnitude.
///
/// Exact zero only equals exact zero: a relative difference against zero is
/// undefined.
pub fn double_equal(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    if diff == 0.0 {
        return true;
    }
    if a == 0.0 || b == 0.0 {
        return false;
    }
    let smaller = a.abs().min(b.abs());
    diff / smaller < DOUBLE_RELATIVE_ERROR
}

/// Step of an equidistant grid, or the index of the first deviating
/// spacing. Grids with fewer than two points have step 0.
pub(crate) fn equidistant_step(x: &[f64]) -> Result<f64, usize> {
    if x.len() < 2 {
        return Ok(0.0);
    }
    let step = x[1] - x[0];
    for i in 2..x.len() {
        if !double_equal(x[i] - x[i - 1], step) {
            return Err(i);
        }
    }
    Ok(step)
}
