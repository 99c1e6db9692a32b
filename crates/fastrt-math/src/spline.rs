// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Spline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Natural cubic splines: interpolating and weighted approximating.
//!
//! Coefficients are computed once per data set and then evaluated any
//! number of times; there is no incremental update. Second derivatives at
//! both end knots are zero (natural boundary condition).
//!
//! With h_i = x_{i+1} − x_i and c_i = f''(x_i)/2 the interpolating spline
//! solves the tridiagonal system
//!
//!   h_{i-1} c_{i-1} + 2 (h_{i-1} + h_i) c_i + h_i c_{i+1}
//!       = 3 (y_{i+1} − y_i)/h_i − 3 (y_i − y_{i-1})/h_{i-1}
//!
//! for the n − 2 interior knots. The approximating spline (Reinsch) adds
//! the weighted term Qᵀ·B·Q, B = diag(6/w_i), which widens the band to five
//! diagonals.

use fastrt_types::constants::{
    GRID_COUNT_SLACK, MIN_APPSPL_POINTS, MIN_SMOOTHING_WEIGHT, MIN_SPLINE_POINTS,
};
use fastrt_types::error::{NumericError, NumericResult};
use fastrt_types::series::{check_ascending, CubicSegment, PiecewiseCubic, SampleSeries};
use ndarray::Array2;
use tracing::{debug, warn};

use crate::banded::{solve_five_ms, solve_three_ms};
use crate::linear::linear_coeffc;

/// Check matching lengths and a minimum sample count.
pub(crate) fn check_samples(x: &[f64], y: &[f64], min: usize) -> NumericResult<()> {
    if x.len() != y.len() {
        return Err(NumericError::DimensionMismatch(format!(
            "x has {} samples, y has {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < min {
        return Err(NumericError::TooFewDataPoints {
            got: x.len(),
            min,
        });
    }
    Ok(())
}

/// [`check_ascending`] with the offending pair logged.
pub(crate) fn check_abscissas(x: &[f64]) -> NumericResult<()> {
    check_ascending(x).map_err(|e| {
        if let NumericError::NotAscending { index, left, right } = &e {
            warn!(index = *index, left = *left, right = *right, "x not ascending");
        }
        e
    })
}

/// Coefficients of the natural cubic spline through `(x, y)`.
///
/// Two points give the straight line (a2 = a3 = 0). Fails with
/// `TooFewDataPoints` for n < 2, `NotAscending` for non-increasing `x`, and
/// `SplineNotPossible` if the interior system is singular.
pub fn spline_coeffc(x: &[f64], y: &[f64]) -> NumericResult<PiecewiseCubic> {
    check_samples(x, y, MIN_SPLINE_POINTS)?;
    check_abscissas(x)?;
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|p| p[1] - p[0]).collect();

    if n == 2 {
        let slope = (y[1] - y[0]) / h[0];
        return Ok(PiecewiseCubic::new(vec![CubicSegment::linear(y[0], slope)]));
    }

    // Interior system for c_1 .. c_{n-2}
    let m = n - 2;
    let mut band = Array2::zeros((m, 3));
    let mut rhs = vec![0.0; m];
    for i in 0..m {
        if i > 0 {
            band[[i, 0]] = h[i];
        }
        band[[i, 1]] = 2.0 * (h[i] + h[i + 1]);
        if i + 1 < m {
            band[[i, 2]] = h[i + 1];
        }
        rhs[i] = 3.0 / h[i + 1] * (y[i + 2] - y[i + 1]) - 3.0 / h[i] * (y[i + 1] - y[i]);
    }

    let interior = solve_three_ms(&band, &rhs).map_err(|e| {
        debug!(error = %e, "interpolating spline system failed");
        NumericError::SplineNotPossible
    })?;

    let mut c = vec![0.0; n];
    c[1..n - 1].copy_from_slice(&interior);

    let segments = (0..n - 1)
        .map(|i| CubicSegment {
            a0: y[i],
            a1: (y[i + 1] - y[i]) / h[i] - h[i] / 3.0 * (c[i + 1] + 2.0 * c[i]),
            a2: c[i],
            a3: (c[i + 1] - c[i]) / 3.0 / h[i],
        })
        .collect();

    Ok(PiecewiseCubic::new(segments))
}

/// Coefficients of the weighted approximating natural spline.
///
/// Larger `w_i` pulls the curve towards `y_i`; a zero weight leaves the
/// knot in place but lets the curve ignore its ordinate. Needs at least six
/// points. Fails with `TooFewDataPoints`, `DataNotSorted`,
/// `NegativeWeightingFactors`, or `SplineNotPossible`.
pub fn appspl_coeffc(x: &[f64], y: &[f64], w: &[f64]) -> NumericResult<PiecewiseCubic> {
    check_samples(x, y, MIN_APPSPL_POINTS)?;
    if w.len() != x.len() {
        return Err(NumericError::DimensionMismatch(format!(
            "{} weights for {} samples",
            w.len(),
            x.len()
        )));
    }
    if let Some(index) = x.windows(2).position(|p| !(p[0] < p[1])) {
        return Err(NumericError::DataNotSorted { index });
    }
    if let Some((index, &weight)) = w.iter().enumerate().find(|(_, wi)| **wi < 0.0) {
        return Err(NumericError::NegativeWeightingFactors { index, weight });
    }

    // Number of intervals
    let n = x.len() - 1;

    let h1: Vec<f64> = x.windows(2).map(|p| p[1] - p[0]).collect();
    let h2: Vec<f64> = h1.iter().map(|h| 1.0 / h).collect();
    let b: Vec<f64> = w.iter().map(|wi| 6.0 / wi.max(MIN_SMOOTHING_WEIGHT)).collect();
    let big_h: Vec<f64> = (0..n - 1).map(|i| h2[i] + h2[i + 1]).collect();

    let mut rhs = vec![0.0; n - 1];
    let mut slope_left = (y[1] - y[0]) * h2[0];
    for (i, r) in rhs.iter_mut().enumerate() {
        let slope_right = (y[i + 2] - y[i + 1]) * h2[i + 1];
        *r = 3.0 * (slope_right - slope_left);
        slope_left = slope_right;
    }

    // Pentadiagonal (T + Qᵀ B Q), columns [sub2, sub1, diag, super1, super2]
    let m = n - 1;
    let mut band = Array2::zeros((m, 5));
    for i in 0..m {
        band[[i, 2]] = 2.0 * (h1[i] + h1[i + 1])
            + b[i] * h2[i] * h2[i]
            + b[i + 1] * big_h[i] * big_h[i]
            + b[i + 2] * h2[i + 1] * h2[i + 1];
        if i + 1 < m {
            band[[i, 3]] =
                h1[i + 1] - b[i + 1] * h2[i + 1] * big_h[i] - b[i + 2] * h2[i + 1] * big_h[i + 1];
        }
        if i + 2 < m {
            band[[i, 4]] = b[i + 2] * h2[i + 1] * h2[i + 2];
        }
        if i >= 1 {
            band[[i, 1]] = h1[i] - b[i] * h2[i] * big_h[i - 1] - b[i + 1] * h2[i] * big_h[i];
        }
        if i >= 2 {
            band[[i, 0]] = b[i] * h2[i - 1] * h2[i];
        }
    }

    let interior = solve_five_ms(&band, &rhs).map_err(|e| {
        debug!(error = %e, "approximating spline system failed");
        NumericError::SplineNotPossible
    })?;

    let mut c = vec![0.0; n + 1];
    c[1..n].copy_from_slice(&interior);

    // Smoothed ordinates
    let mut a = vec![0.0; n + 1];
    a[0] = y[0] + b[0] / 3.0 * h2[0] * (c[0] - c[1]);
    for i in 1..n {
        let d = h2[i - 1] + h2[i];
        a[i] = y[i] - b[i] / 3.0 * (c[i - 1] * h2[i - 1] - d * c[i] + c[i + 1] * h2[i]);
    }
    a[n] = y[n] - b[n] / 3.0 * h2[n - 1] * (c[n - 1] - c[n]);

    let segments = (0..n)
        .map(|i| CubicSegment {
            a0: a[i],
            a1: h2[i] * (a[i + 1] - a[i]) - h1[i] / 3.0 * (c[i + 1] + 2.0 * c[i]),
            a2: c[i],
            a3: h2[i] / 3.0 * (c[i + 1] - c[i]),
        })
        .collect();

    Ok(PiecewiseCubic::new(segments))
}

/// Evaluate fitted coefficients at `xnew`.
///
/// The segment is the one with x_i ≤ xnew < x_{i+1}; the last knot is
/// evaluated at the right end of the last segment. Never extrapolates.
pub fn calc_splined_value(xnew: f64, x: &[f64], coeffs: &PiecewiseCubic) -> NumericResult<f64> {
    let n = x.len();
    if n < MIN_SPLINE_POINTS {
        return Err(NumericError::TooFewDataPoints {
            got: n,
            min: MIN_SPLINE_POINTS,
        });
    }
    if coeffs.knot_count() != n {
        return Err(NumericError::DimensionMismatch(format!(
            "{} segments for {} knots",
            coeffs.len(),
            n
        )));
    }
    // Negated so that NaN is rejected as well.
    if !(xnew >= x[0] && xnew <= x[n - 1]) {
        return Err(NumericError::NoExtrapolation {
            x: xnew,
            lower: x[0],
            upper: x[n - 1],
        });
    }

    let i = x.partition_point(|&xi| xi <= xnew).saturating_sub(1).min(n - 2);
    Ok(coeffs.segments[i].eval(xnew - x[i]))
}

/// Equidistant output grid clipped to the data range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EquidistantGrid {
    pub first: f64,
    pub step: f64,
    pub count: usize,
}

impl EquidistantGrid {
    /// Grid `start, start + step, …` up to the last abscissa.
    ///
    /// A `start` below `x[0]` moves up to the smallest multiple of `step`
    /// that is ≥ `x[0]`.
    pub fn clipped(x: &[f64], start: f64, step: f64) -> NumericResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(NumericError::InvalidParameter(format!(
                "output step must be positive and finite, got {step}"
            )));
        }
        if !start.is_finite() {
            return Err(NumericError::InvalidParameter(format!(
                "output start must be finite, got {start}"
            )));
        }
        let (x_first, x_last) = match (x.first(), x.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => {
                return Err(NumericError::TooFewDataPoints {
                    got: 0,
                    min: MIN_SPLINE_POINTS,
                })
            }
        };

        let first = if start >= x_first {
            start
        } else {
            (x_first / step).ceil() * step
        };

        let count = ((x_last - first) / step + 1.0 + GRID_COUNT_SLACK).floor();
        if !(count >= 1.0) {
            return Err(NumericError::NoSplinedValues);
        }

        Ok(EquidistantGrid {
            first,
            step,
            count: count as usize,
        })
    }

    #[inline]
    pub fn abscissa(&self, j: usize) -> f64 {
        self.first + j as f64 * self.step
    }
}

/// Walk the grid once, advancing the segment index monotonically.
pub(crate) fn evaluate_on_grid(
    x: &[f64],
    coeffs: &PiecewiseCubic,
    grid: &EquidistantGrid,
) -> SampleSeries {
    let last_segment = x.len() - 2;
    let mut new_x = Vec::with_capacity(grid.count);
    let mut new_y = Vec::with_capacity(grid.count);

    let mut i = 0;
    for j in 0..grid.count {
        let xnew = grid.abscissa(j);
        while xnew > x[i + 1] && i < last_segment {
            i += 1;
        }
        new_x.push(xnew);
        new_y.push(coeffs.segments[i].eval(xnew - x[i]));
    }

    SampleSeries { x: new_x, y: new_y }
}

/// Interpolate with a natural cubic spline onto `start, start + step, …`.
///
/// Fails with `NoSplinedValues` if no grid point falls inside the data.
pub fn spline(x: &[f64], y: &[f64], start: f64, step: f64) -> NumericResult<SampleSeries> {
    check_samples(x, y, MIN_SPLINE_POINTS)?;
    let grid = EquidistantGrid::clipped(x, start, step)?;
    let coeffs = spline_coeffc(x, y)?;
    Ok(evaluate_on_grid(x, &coeffs, &grid))
}

/// Smooth with a weighted approximating spline onto `start, start + step, …`.
pub fn appspl(
    x: &[f64],
    y: &[f64],
    w: &[f64],
    start: f64,
    step: f64,
) -> NumericResult<SampleSeries> {
    check_samples(x, y, MIN_APPSPL_POINTS)?;
    let grid = EquidistantGrid::clipped(x, start, step)?;
    let coeffs = appspl_coeffc(x, y, w)?;
    Ok(evaluate_on_grid(x, &coeffs, &grid))
}

/// Knots together with their fitted coefficients.
///
/// Convenience for callers that evaluate one curve many times.
#[derive(Debug, Clone)]
pub struct Spline {
    knots: Vec<f64>,
    coefficients: PiecewiseCubic,
}

impl Spline {
    /// Natural cubic interpolating spline.
    pub fn fit(x: &[f64], y: &[f64]) -> NumericResult<Self> {
        Ok(Spline {
            knots: x.to_vec(),
            coefficients: spline_coeffc(x, y)?,
        })
    }

    /// Piecewise-linear interpolant.
    pub fn fit_linear(x: &[f64], y: &[f64]) -> NumericResult<Self> {
        Ok(Spline {
            knots: x.to_vec(),
            coefficients: linear_coeffc(x, y)?,
        })
    }

    /// Weighted approximating spline.
    pub fn fit_smoothing(x: &[f64], y: &[f64], w: &[f64]) -> NumericResult<Self> {
        Ok(Spline {
            knots: x.to_vec(),
            coefficients: appspl_coeffc(x, y, w)?,
        })
    }

    pub fn eval(&self, xnew: f64) -> NumericResult<f64> {
        calc_splined_value(xnew, &self.knots, &self.coefficients)
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coefficients(&self) -> &PiecewiseCubic {
        &self.coefficients
    }
}
