// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Convolve
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete convolution of a spectrum with a slit/response kernel.
//!
//! The kernel is aligned on its tap at abscissa exactly 0.0. Near the edges
//! only the taps that overlap the spectrum contribute and the sum is divided
//! by the weight of those taps, so a constant spectrum stays constant up to
//! the boundary. There is no zero padding.

use fastrt_types::error::{NumericError, NumericResult};
use fastrt_types::series::SampleSeries;
use tracing::debug;

use crate::compare::{double_equal, equidistant_step};
use crate::linear::linear_coeffc;
use crate::spline::calc_splined_value;

/// Index of the kernel tap at exactly 0.0.
fn kernel_center(x_conv: &[f64]) -> NumericResult<usize> {
    x_conv
        .iter()
        .position(|&xc| xc == 0.0)
        .ok_or(NumericError::NotCentered)
}

/// Center-aligned, edge-normalized sum. Output has the length of `y`.
fn convolve_centered(y: &[f64], kernel: &[f64], mid: usize) -> Vec<f64> {
    let n = y.len() as isize;
    let mid = mid as isize;
    (0..n)
        .map(|i| {
            let mut acc = 0.0;
            let mut weight = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let j = i - mid + k as isize;
                if (0..n).contains(&j) {
                    acc += w * y[j as usize];
                    weight += w;
                }
            }
            if weight != 0.0 {
                acc / weight
            } else {
                0.0
            }
        })
        .collect()
}

fn check_pair(x: &[f64], y: &[f64], what: &str) -> NumericResult<()> {
    if x.len() != y.len() {
        return Err(NumericError::DimensionMismatch(format!(
            "{what}: {} abscissas, {} ordinates",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(NumericError::TooFewDataPoints { got: 0, min: 1 });
    }
    Ok(())
}

/// Convolve `(x_spec, y_spec)` with the kernel `(x_conv, y_conv)`.
///
/// Both grids must be equidistant with the same step. The result is given
/// on `x_spec`.
pub fn convolute(
    x_spec: &[f64],
    y_spec: &[f64],
    x_conv: &[f64],
    y_conv: &[f64],
) -> NumericResult<SampleSeries> {
    check_pair(x_spec, y_spec, "spectrum")?;
    check_pair(x_conv, y_conv, "kernel")?;

    let spec_step =
        equidistant_step(x_spec).map_err(|index| NumericError::SpecNotEquidistant { index })?;
    let conv_step =
        equidistant_step(x_conv).map_err(|index| NumericError::ConvNotEquidistant { index })?;
    // a single sample has no step and fits any grid
    let both_stepped = x_spec.len() > 1 && x_conv.len() > 1;
    if both_stepped && !double_equal(conv_step, spec_step) {
        return Err(NumericError::SpecConvDifferent {
            spec_step,
            conv_step,
        });
    }

    let mid = kernel_center(x_conv)?;
    debug!(
        samples = x_spec.len(),
        taps = x_conv.len(),
        mid,
        "direct convolution"
    );

    Ok(SampleSeries {
        x: x_spec.to_vec(),
        y: convolve_centered(y_spec, y_conv, mid),
    })
}

/// Convolve a spectrum sampled on any ascending grid.
///
/// The spectrum is interpolated linearly onto the kernel step starting at
/// `x_spec[0]`, convolved, and interpolated back onto `x_spec`. Only the
/// kernel needs to be equidistant.
pub fn int_convolute(
    x_spec: &[f64],
    y_spec: &[f64],
    x_conv: &[f64],
    y_conv: &[f64],
) -> NumericResult<Vec<f64>> {
    check_pair(x_conv, y_conv, "kernel")?;
    if x_conv.len() < 2 {
        return Err(NumericError::TooFewDataPoints {
            got: x_conv.len(),
            min: 2,
        });
    }
    let step =
        equidistant_step(x_conv).map_err(|index| NumericError::ConvNotEquidistant { index })?;
    if !(step > 0.0) {
        return Err(NumericError::InvalidParameter(format!(
            "kernel step must be positive, got {step}"
        )));
    }

    let coeffs = linear_coeffc(x_spec, y_spec).map_err(|e| {
        debug!(error = %e, "int_convolute: interpolation coefficients failed");
        e
    })?;

    let x0 = x_spec[0];
    let x_last = x_spec[x_spec.len() - 1];
    let count = ((x_last - x0) / step).ceil() as usize + 1;

    let mut x_fine: Vec<f64> = (0..count).map(|i| x0 + i as f64 * step).collect();
    // rounding can leave the final abscissa a hair short of the data
    if let Some(last) = x_fine.last_mut() {
        if *last < x_last {
            *last = x_last;
        }
    }

    let mut y_fine: Vec<f64> = Vec::with_capacity(count);
    for &xf in &x_fine {
        let overshoot = xf > x_last;
        // a one-ulp overshoot is still the last sample
        let at = if overshoot && double_equal(xf, x_last) {
            x_last
        } else {
            xf
        };
        match calc_splined_value(at, x_spec, &coeffs) {
            Ok(v) => y_fine.push(v),
            Err(_) if overshoot && !y_fine.is_empty() => y_fine.push(y_fine[y_fine.len() - 1]),
            Err(e) => {
                debug!(x = xf, error = %e, "int_convolute: interpolation failed");
                return Err(e);
            }
        }
    }

    let mid = kernel_center(x_conv)?;
    debug!(fine = count, taps = x_conv.len(), mid, "interpolated convolution");
    let y_smooth = convolve_centered(&y_fine, y_conv, mid);

    let back = linear_coeffc(&x_fine, &y_smooth)?;
    x_spec
        .iter()
        .map(|&xs| {
            calc_splined_value(xs, &x_fine, &back).map_err(|e| {
                debug!(x = xs, error = %e, "int_convolute: back-interpolation failed");
                e
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(start: f64, step: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| start + i as f64 * step).collect()
    }

    #[test]
    fn test_unit_tap_identity() {
        let x = grid(300.0, 0.5, 9);
        let y: Vec<f64> = x.iter().map(|v| (v / 3.0).sin()).collect();
        let out = convolute(&x, &y, &[0.0], &[1.0]).unwrap();
        assert_eq!(out.x, x);
        assert_eq!(out.y, y);
    }

    #[test]
    fn test_triangle_kernel_interior_and_edges() {
        let x = grid(0.0, 1.0, 5);
        let y = [0.0, 0.0, 4.0, 0.0, 0.0];
        let kx = [-1.0, 0.0, 1.0];
        let ky = [1.0, 2.0, 1.0];
        let out = convolute(&x, &y, &kx, &ky).unwrap();
        // interior: (1*y[i-1] + 2*y[i] + 1*y[i+1]) / 4
        assert!((out.y[1] - 1.0).abs() < 1e-15);
        assert!((out.y[2] - 2.0).abs() < 1e-15);
        assert!((out.y[3] - 1.0).abs() < 1e-15);
        // edge: only two taps overlap, normalized by 3
        assert_eq!(out.y[0], 0.0);
    }

    #[test]
    fn test_constant_preserved_at_edges() {
        let x = grid(0.0, 0.1, 12);
        let y = vec![7.5; 12];
        let kx = [-0.2, -0.1, 0.0, 0.1, 0.2];
        let ky = [0.1, 0.2, 0.4, 0.2, 0.1];
        let out = convolute(&x, &y, &kx, &ky).unwrap();
        for v in &out.y {
            assert!((v - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_asymmetric_kernel_alignment() {
        let x = grid(0.0, 1.0, 6);
        let y = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        // center is the first tap, so output i reads y[i] and y[i + 1]
        let out = convolute(&x, &y, &[0.0, 1.0], &[1.0, 1.0]).unwrap();
        assert!((out.y[1] - 0.5).abs() < 1e-15);
        assert!((out.y[2] - 0.5).abs() < 1e-15);
        assert_eq!(out.y[3], 0.0);
    }

    #[test]
    fn test_zero_weight_gives_zero() {
        let x = grid(0.0, 1.0, 3);
        let out = convolute(&x, &[1.0, 2.0, 3.0], &[-1.0, 0.0, 1.0], &[1.0, 0.0, -1.0]).unwrap();
        assert_eq!(out.y[1], 0.0);
    }

    #[test]
    fn test_convolute_errors() {
        let x = [0.0, 1.0, 2.0, 3.5];
        let y = [0.0; 4];
        assert!(matches!(
            convolute(&x, &y, &[0.0], &[1.0]),
            Err(NumericError::SpecNotEquidistant { index: 3 })
        ));

        let x = grid(0.0, 1.0, 4);
        assert!(matches!(
            convolute(&x, &y, &[-1.0, 0.0, 2.0], &[1.0; 3]),
            Err(NumericError::ConvNotEquidistant { index: 2 })
        ));
        assert!(matches!(
            convolute(&x, &y, &[-0.5, 0.0, 0.5], &[1.0; 3]),
            Err(NumericError::SpecConvDifferent { .. })
        ));
        let err = convolute(&x, &y, &[0.5, 1.5, 2.5], &[1.0; 3]).unwrap_err();
        assert!(matches!(err, NumericError::NotCentered));
        assert_eq!(err.code(), -12);
    }

    #[test]
    fn test_int_convolute_delta_reproduces() {
        let x = [290.0, 290.75, 291.25, 292.0, 293.5, 294.0];
        let y = [1.0, 3.0, 2.0, 5.0, 4.0, 0.5];
        let kx = [-0.25, 0.0, 0.25];
        let ky = [0.0, 1.0, 0.0];
        let out = int_convolute(&x, &y, &kx, &ky).unwrap();
        assert_eq!(out.len(), x.len());
        for (o, e) in out.iter().zip(y.iter()) {
            assert!((o - e).abs() < 1e-9, "{o} vs {e}");
        }
    }

    #[test]
    fn test_int_convolute_smooths_constant() {
        let x = [0.0, 0.3, 1.0, 1.2, 2.0];
        let y = [2.0; 5];
        let kx = [-0.3, -0.2, -0.1, 0.0, 0.1, 0.2, 0.3];
        let ky = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0];
        let out = int_convolute(&x, &y, &kx, &ky).unwrap();
        for v in &out {
            assert!((v - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_int_convolute_overshooting_last_point() {
        // span 1.0 is not a multiple of 0.3: fine grid ends at 1.2
        let x = [0.0, 0.5, 1.0];
        let y = [0.0, 1.0, 2.0];
        let out = int_convolute(&x, &y, &[-0.3, 0.0, 0.3], &[0.0, 1.0, 0.0]).unwrap();
        assert!((out[0] - 0.0).abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);
        // back-interpolated between 0.9 (1.8) and 1.2 (copied 1.8)
        assert!((out[2] - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_int_convolute_fine_grid_short_of_last_sample() {
        // 3 · 0.3 rounds to 0.8999999999999999, just below the last abscissa
        let x = [0.0, 0.45, 0.9];
        let y = [1.0, 2.0, 3.0];
        let out = int_convolute(&x, &y, &[-0.3, 0.0, 0.3], &[0.0, 1.0, 0.0]).unwrap();
        for (o, e) in out.iter().zip(y.iter()) {
            assert!((o - e).abs() < 1e-12, "{o} vs {e}");
        }
    }

    #[test]
    fn test_int_convolute_interior_point_past_last_sample() {
        // 0.7 + 12 · 0.2 lands one ulp above 3.1 before the final grid point
        let x = [0.7, 1.9, 3.1];
        let y = [1.0, 2.0, 3.0];
        let out = int_convolute(&x, &y, &[-0.2, 0.0, 0.2], &[0.0, 1.0, 0.0]).unwrap();
        for (o, e) in out.iter().zip(y.iter()) {
            assert!((o - e).abs() < 1e-12, "{o} vs {e}");
        }
    }

    #[test]
    fn test_int_convolute_errors() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0; 3];
        assert!(matches!(
            int_convolute(&x, &y, &[-1.0, 0.0, 1.5], &[1.0; 3]),
            Err(NumericError::ConvNotEquidistant { index: 2 })
        ));
        assert!(matches!(
            int_convolute(&x, &y, &[0.5, 1.0, 1.5], &[1.0; 3]),
            Err(NumericError::NotCentered)
        ));
        assert!(matches!(
            int_convolute(&[0.0, 0.0, 1.0], &y, &[-1.0, 0.0, 1.0], &[1.0; 3]),
            Err(NumericError::NotAscending { .. })
        ));
    }
}
