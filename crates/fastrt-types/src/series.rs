// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Series
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{NumericError, NumericResult};

/// Sampled data with strictly ascending abscissas.
///
/// Spectra, kernels and lookup-table slices all travel as this type.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub x: Vec<f64>, // abscissas, strictly ascending
    pub y: Vec<f64>, // ordinates, same length as x
}

impl SampleSeries {
    /// Build a series, checking that `x` and `y` match in length and that
    /// `x` is strictly ascending.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> NumericResult<Self> {
        if x.len() != y.len() {
            return Err(NumericError::DimensionMismatch(format!(
                "x has {} samples, y has {}",
                x.len(),
                y.len()
            )));
        }
        check_ascending(&x)?;
        Ok(SampleSeries { x, y })
    }

    /// Sample `f` on `n` equidistant abscissas starting at `start`.
    pub fn from_fn(start: f64, step: f64, n: usize, f: impl Fn(f64) -> f64) -> Self {
        let x: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
        let y = x.iter().map(|&xi| f(xi)).collect();
        SampleSeries { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `[x_first, x_last]`, or `None` for an empty series.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.x.first()?, *self.x.last()?))
    }
}

/// Fails with `NotAscending` at the first `i` where `x[i] >= x[i+1]`.
pub fn check_ascending(x: &[f64]) -> NumericResult<()> {
    for (i, pair) in x.windows(2).enumerate() {
        // Negated comparison so NaN abscissas are rejected too.
        if !(pair[0] < pair[1]) {
            return Err(NumericError::NotAscending {
                index: i,
                left: pair[0],
                right: pair[1],
            });
        }
    }
    Ok(())
}

/// One cubic piece: f(x) = a0 + a1·dx + a2·dx² + a3·dx³ with dx = x − x_i.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CubicSegment {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
}

impl CubicSegment {
    pub fn linear(a0: f64, a1: f64) -> Self {
        CubicSegment {
            a0,
            a1,
            a2: 0.0,
            a3: 0.0,
        }
    }

    /// Value at offset `dx` from the segment's left knot.
    #[inline]
    pub fn eval(&self, dx: f64) -> f64 {
        let dx2 = dx * dx;
        let dx3 = dx2 * dx;
        self.a3 * dx3 + self.a2 * dx2 + self.a1 * dx + self.a0
    }

    /// Antiderivative at offset `dx`, zero at the left knot.
    #[inline]
    pub fn antiderivative(&self, dx: f64) -> f64 {
        let dx2 = dx * dx;
        let dx3 = dx2 * dx;
        let dx4 = dx3 * dx;
        self.a0 * dx + self.a1 * dx2 / 2.0 + self.a2 * dx3 / 3.0 + self.a3 * dx4 / 4.0
    }

    pub fn is_linear(&self) -> bool {
        self.a2 == 0.0 && self.a3 == 0.0
    }
}

/// Piecewise cubic: segment `i` is valid on `[x_i, x_{i+1})`.
///
/// Holds `n - 1` segments for `n` knots. The knots themselves stay with the
/// caller and are passed back in at evaluation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PiecewiseCubic {
    pub segments: Vec<CubicSegment>,
}

impl PiecewiseCubic {
    pub fn new(segments: Vec<CubicSegment>) -> Self {
        PiecewiseCubic { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of knots this coefficient set was fitted on.
    pub fn knot_count(&self) -> usize {
        self.segments.len() + 1
    }

    pub fn is_linear(&self) -> bool {
        self.segments.iter().all(CubicSegment::is_linear)
    }
}
