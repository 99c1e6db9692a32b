// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Integrate
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quadrature of tabulated functions.
//!
//! [`integrate`] is the plain trapezoid sum over all samples. The spline and
//! linear variants integrate the fitted piecewise polynomial analytically
//! between arbitrary limits inside the data range.

use fastrt_types::error::{NumericError, NumericResult};
use fastrt_types::series::{CubicSegment, PiecewiseCubic};
use tracing::trace;

use crate::compare::double_equal;
use crate::linear::linear_coeffc;
use crate::spline::{check_samples, spline_coeffc};

/// Trapezoid rule over all consecutive pairs. Performs no checks.
pub fn integrate(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (ys[0] + ys[1]) * (xs[1] - xs[0]))
        .sum()
}

/// ∫ f dx from `a` to `b` with f the natural cubic spline through `(x, y)`.
///
/// `b < a` gives the negated integral. Limits strictly outside the data
/// range fail with `LimitsOutOfRange`; fitting errors are passed through.
pub fn integrate_spline(x: &[f64], y: &[f64], a: f64, b: f64) -> NumericResult<f64> {
    integrate_fitted(x, y, a, b, spline_coeffc)
}

/// As [`integrate_spline`] with linear interpolation between samples.
pub fn integrate_linear(x: &[f64], y: &[f64], a: f64, b: f64) -> NumericResult<f64> {
    integrate_fitted(x, y, a, b, linear_coeffc)
}

/// Integral of one segment between two abscissas inside it.
#[inline]
fn segment_integral(seg: &CubicSegment, a: f64, b: f64, x_left: f64) -> f64 {
    if double_equal(a, b) {
        return 0.0;
    }
    seg.antiderivative(b - x_left) - seg.antiderivative(a - x_left)
}

fn integrate_fitted<F>(x: &[f64], y: &[f64], a: f64, b: f64, fit: F) -> NumericResult<f64>
where
    F: Fn(&[f64], &[f64]) -> NumericResult<PiecewiseCubic>,
{
    if a.is_nan() || b.is_nan() {
        return Err(NumericError::InvalidParameter(format!(
            "integration limits must be numbers, got [{a}, {b}]"
        )));
    }
    if double_equal(a, b) {
        return Ok(0.0);
    }
    check_samples(x, y, 2)?;

    let (a, b, sign) = if b < a { (b, a, -1.0) } else { (a, b, 1.0) };

    let n = x.len();
    let (lower, upper) = (x[0], x[n - 1]);
    let out_of_range = || NumericError::LimitsOutOfRange {
        a,
        b,
        lower,
        upper,
    };

    if a > upper || b < lower {
        return Err(out_of_range());
    }

    // i1: first knot right of a, so a lies in segment i1 - 1
    let i1 = if double_equal(a, lower) {
        1
    } else if double_equal(a, upper) {
        return Ok(0.0);
    } else if a < lower {
        return Err(out_of_range());
    } else {
        x.partition_point(|&xi| xi < a)
    };

    // i2: segment holding b
    let i2 = if double_equal(b, upper) {
        n - 2
    } else if double_equal(b, lower) {
        return Ok(0.0);
    } else if b > upper {
        return Err(out_of_range());
    } else {
        x.partition_point(|&xi| xi < b) - 1
    };

    let coeffs = fit(x, y)?;

    if i2 + 1 < i1 {
        return Err(NumericError::FatalIntegrationError { left: i1, right: i2 });
    }
    trace!(i1, i2, n, "integrating fitted segments");

    let s = &coeffs.segments;
    let integral = if i2 + 1 == i1 {
        segment_integral(&s[i2], a, b, x[i2])
    } else {
        let head = segment_integral(&s[i1 - 1], a, x[i1], x[i1 - 1]);
        let body: f64 = (i1..i2)
            .map(|i| segment_integral(&s[i], x[i], x[i + 1], x[i]))
            .sum();
        let tail = segment_integral(&s[i2], x[i2], b, x[i2]);
        head + body + tail
    };

    Ok(sign * integral)
}
