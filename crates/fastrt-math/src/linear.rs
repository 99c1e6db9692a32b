//! Piecewise-linear interpolation in the spline coefficient layout.
//!
//! Coefficients come back as a [`PiecewiseCubic`] with a2 = a3 = 0, so the
//! result can be evaluated with [`crate::spline::calc_splined_value`] and
//! integrated with the same code path as the cubic spline.

use fastrt_types::error::NumericResult;
use fastrt_types::series::{CubicSegment, PiecewiseCubic, SampleSeries};

use crate::spline::{check_abscissas, check_samples, evaluate_on_grid, EquidistantGrid};

/// Linear interpolation coefficients for strictly ascending `x`.
///
/// Fails with `NotAscending` at the first non-increasing pair.
pub fn linear_coeffc(x: &[f64], y: &[f64]) -> NumericResult<PiecewiseCubic> {
    check_samples(x, y, 2)?;
    check_abscissas(x)?;

    let segments = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| CubicSegment::linear(ys[0], (ys[1] - ys[0]) / (xs[1] - xs[0])))
        .collect();
    Ok(PiecewiseCubic::new(segments))
}

/// Resample linearly onto the equidistant grid `start, start + step, …`.
///
/// Same grid rules as [`crate::spline::spline`].
pub fn linear_eqd(x: &[f64], y: &[f64], start: f64, step: f64) -> NumericResult<SampleSeries> {
    check_samples(x, y, 2)?;
    let grid = EquidistantGrid::clipped(x, start, step)?;
    let coeffs = linear_coeffc(x, y)?;
    Ok(evaluate_on_grid(x, &coeffs, &grid))
}
