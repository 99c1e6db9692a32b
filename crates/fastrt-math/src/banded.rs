// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Banded
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Direct solvers for A·x = b.
//!
//! - [`solve_gauss`]: dense Gaussian elimination with relative column
//!   maximum pivoting (H.R. Schwarz, "Numerische Mathematik", p. 21).
//! - [`solve_three`] / [`solve_three_ms`]: tridiagonal (Thomas) elimination.
//! - [`solve_five`] / [`solve_five_ms`]: pentadiagonal LU factorization
//!   (Engeln-Müllges).
//!
//! The `_ms` variants take the band in compact storage, one row per
//! equation:
//!
//! - tridiagonal: `[sub, diag, super]`, shape (n, 3)
//! - pentadiagonal: `[sub2, sub1, diag, super1, super2]`, shape (n, 5)
//!
//! Entries that fall outside the matrix (e.g. `sub` in row 0) are ignored.
//! None of the solvers pivot inside the band, so any exactly zero pivot is
//! reported as [`NumericError::Singular`].

use fastrt_types::error::{NumericError, NumericResult};
use ndarray::Array2;
use tracing::{debug, trace};

fn check_system(a: &Array2<f64>, b: &[f64], width: Option<usize>) -> NumericResult<usize> {
    let (rows, cols) = a.dim();
    let n = b.len();
    if n == 0 {
        return Err(NumericError::DimensionMismatch(
            "linear system has no equations".to_string(),
        ));
    }
    let expected_cols = width.unwrap_or(n);
    if rows != n || cols != expected_cols {
        return Err(NumericError::DimensionMismatch(format!(
            "matrix is {rows}x{cols}, expected {n}x{expected_cols}"
        )));
    }
    Ok(n)
}

fn singular(row: usize) -> NumericError {
    debug!(row, "zero pivot in linear solve");
    NumericError::Singular { row }
}

/// Solve a dense system by Gaussian elimination.
///
/// At step k the pivot row p ∈ [k, n) maximises |A[p][k]| / Σ_{j≥k} |A[p][j]|.
/// Elimination runs on a private copy: `a` and `b` are left untouched.
///
/// Fails with `Singular` if a candidate row has zero remaining sum or the
/// chosen pivot is zero.
pub fn solve_gauss(a: &Array2<f64>, b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = check_system(a, b, None)?;
    trace!(n, "solve_gauss");

    let mut m = a.to_owned();
    let mut rhs = b.to_vec();

    for k in 0..n {
        // Pivot search
        let mut max = f64::NEG_INFINITY;
        let mut p = k;
        for i in k..n {
            let sum: f64 = (k..n).map(|j| m[[i, j]].abs()).sum();
            if sum == 0.0 {
                return Err(singular(i));
            }
            let ratio = m[[i, k]].abs() / sum;
            if ratio > max {
                max = ratio;
                p = i;
            }
        }

        if p != k {
            for j in 0..n {
                m.swap([k, j], [p, j]);
            }
            rhs.swap(k, p);
        }

        let div = m[[k, k]];
        if div == 0.0 {
            return Err(singular(k));
        }
        for j in k..n {
            m[[k, j]] /= div;
        }
        rhs[k] /= div;

        for i in (k + 1)..n {
            let factor = m[[i, k]];
            if factor == 0.0 {
                continue;
            }
            for j in k..n {
                m[[i, j]] -= m[[k, j]] * factor;
            }
            rhs[i] -= rhs[k] * factor;
        }
    }

    // Back substitution (unit diagonal after normalisation)
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut acc = rhs[i];
        for k in (i + 1)..n {
            acc -= m[[i, k]] * x[k];
        }
        x[i] = acc;
    }

    Ok(x)
}

/// Extract the tridiagonal band of a full n×n matrix as (n, 3) storage.
pub fn pack_three(a: &Array2<f64>) -> NumericResult<Array2<f64>> {
    pack_band(a, 1)
}

/// Extract the pentadiagonal band of a full n×n matrix as (n, 5) storage.
pub fn pack_five(a: &Array2<f64>) -> NumericResult<Array2<f64>> {
    pack_band(a, 2)
}

fn pack_band(a: &Array2<f64>, half_width: usize) -> NumericResult<Array2<f64>> {
    let (n, cols) = a.dim();
    if n != cols {
        return Err(NumericError::DimensionMismatch(format!(
            "band extraction needs a square matrix, got {n}x{cols}"
        )));
    }
    let width = 2 * half_width + 1;
    let mut band = Array2::zeros((n, width));
    for i in 0..n {
        for k in 0..width {
            // column of A addressed by band slot k in row i
            let j = i as isize + k as isize - half_width as isize;
            if j >= 0 && (j as usize) < n {
                band[[i, k]] = a[[i, j as usize]];
            }
        }
    }
    Ok(band)
}

/// Solve a tridiagonal system given as a full n×n matrix.
///
/// Only the three central diagonals are read.
pub fn solve_three(a: &Array2<f64>, b: &[f64]) -> NumericResult<Vec<f64>> {
    check_system(a, b, None)?;
    solve_three_ms(&pack_three(a)?, b)
}

/// Solve a tridiagonal system in compact (n, 3) storage.
pub fn solve_three_ms(band: &Array2<f64>, b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = check_system(band, b, Some(3))?;
    trace!(n, "solve_three_ms");

    if let Some(row) = (0..n).find(|&i| band[[i, 1]] == 0.0) {
        return Err(singular(row));
    }

    let mut gamma = vec![0.0; n];
    let mut r = vec![0.0; n];

    // Forward sweep
    let mut alpha = band[[0, 1]];
    if n > 1 {
        gamma[0] = band[[0, 2]] / alpha;
    }
    r[0] = b[0] / alpha;

    for i in 1..n {
        let sub = band[[i, 0]];
        alpha = band[[i, 1]] - sub * gamma[i - 1];
        if alpha == 0.0 {
            return Err(singular(i));
        }
        if i < n - 1 {
            gamma[i] = band[[i, 2]] / alpha;
        }
        r[i] = (b[i] - sub * r[i - 1]) / alpha;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = r[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = r[i] - gamma[i] * x[i + 1];
    }

    Ok(x)
}

/// Solve a pentadiagonal system given as a full n×n matrix.
///
/// Only the five central diagonals are read.
pub fn solve_five(a: &Array2<f64>, b: &[f64]) -> NumericResult<Vec<f64>> {
    check_system(a, b, None)?;
    solve_five_ms(&pack_five(a)?, b)
}

/// Solve a pentadiagonal system in compact (n, 5) storage.
///
/// Factorises A = L·U with L lower triangular (diagonal `alpha`, first
/// subdiagonal `beta`, second subdiagonal taken from A) and U unit upper
/// triangular (superdiagonals `gamma`, `delta`).
pub fn solve_five_ms(band: &Array2<f64>, b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = check_system(band, b, Some(5))?;
    trace!(n, "solve_five_ms");

    if let Some(row) = (0..n).find(|&i| band[[i, 2]] == 0.0) {
        return Err(singular(row));
    }

    let mut gamma = vec![0.0; n];
    let mut delta = vec![0.0; n];
    let mut beta = vec![0.0; n];
    let mut r = vec![0.0; n];

    for i in 0..n {
        let g = if i >= 2 { band[[i, 0]] } else { 0.0 };
        let c = if i >= 1 { band[[i, 1]] } else { 0.0 };
        let e = if i + 1 < n { band[[i, 3]] } else { 0.0 };
        let f = if i + 2 < n { band[[i, 4]] } else { 0.0 };

        let gamma_2 = if i >= 2 { gamma[i - 2] } else { 0.0 };
        let delta_2 = if i >= 2 { delta[i - 2] } else { 0.0 };
        let gamma_1 = if i >= 1 { gamma[i - 1] } else { 0.0 };
        let delta_1 = if i >= 1 { delta[i - 1] } else { 0.0 };
        let r_2 = if i >= 2 { r[i - 2] } else { 0.0 };
        let r_1 = if i >= 1 { r[i - 1] } else { 0.0 };

        beta[i] = c - g * gamma_2;
        let alpha = band[[i, 2]] - g * delta_2 - beta[i] * gamma_1;
        if alpha == 0.0 {
            return Err(singular(i));
        }
        gamma[i] = (e - beta[i] * delta_1) / alpha;
        delta[i] = f / alpha;
        r[i] = (b[i] - g * r_2 - beta[i] * r_1) / alpha;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = r[n - 1];
    if n > 1 {
        x[n - 2] = r[n - 2] - gamma[n - 2] * x[n - 1];
    }
    for i in (0..n.saturating_sub(2)).rev() {
        x[i] = r[i] - gamma[i] * x[i + 1] - delta[i] * x[i + 2];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_vec(a: &Array2<f64>, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        (0..n)
            .map(|i| (0..n).map(|j| a[[i, j]] * x[j]).sum())
            .collect()
    }

    fn laplacian(n: usize, diag: f64, off: f64) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                diag
            } else if i.abs_diff(j) == 1 {
                off
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_three_identity() {
        // Solve I * x = [1,2,3,4,5]
        let n = 5;
        let a = Array2::eye(n);
        let d = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = solve_three(&a, &d).unwrap();
        for i in 0..n {
            assert!((x[i] - d[i]).abs() < 1e-12, "x[{i}] should equal d[{i}]");
        }
    }

    #[test]
    fn test_three_small_laplacian() {
        // [ 2 -1  0]       [1]
        // [-1  2 -1] * x = [0]   →  x = [1, 1, 1]
        // [ 0 -1  2]       [1]
        let a = laplacian(3, 2.0, -1.0);
        let x = solve_three(&a, &[1.0, 0.0, 1.0]).unwrap();
        for (i, xi) in x.iter().enumerate() {
            assert!((xi - 1.0).abs() < 1e-12, "x[{i}] = {xi}, expected 1");
        }
    }

    #[test]
    fn test_three_ms_heat_equation_pattern() {
        // Implicit heat step: main = 1 + 2*alpha, sub/super = -alpha
        let n = 10;
        let alpha = 0.4;
        let band = Array2::from_shape_fn((n, 3), |(i, k)| match k {
            0 if i > 0 => -alpha,
            1 => 1.0 + 2.0 * alpha,
            2 if i < n - 1 => -alpha,
            _ => 0.0,
        });
        let d = vec![1.0; n];
        let x = solve_three_ms(&band, &d).unwrap();
        for (i, &xi) in x.iter().enumerate() {
            assert!(
                xi > 0.0 && xi.is_finite(),
                "x[{i}] = {xi} should be positive finite"
            );
        }
    }

    #[test]
    fn test_three_single_equation() {
        let band = Array2::from_shape_vec((1, 3), vec![9.0, 4.0, 9.0]).unwrap();
        let x = solve_three_ms(&band, &[2.0]).unwrap();
        assert!((x[0] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_three_zero_diagonal_is_singular() {
        let mut a = laplacian(4, 2.0, -1.0);
        a[[2, 2]] = 0.0;
        match solve_three(&a, &[1.0; 4]) {
            Err(NumericError::Singular { row }) => assert_eq!(row, 2),
            other => panic!("expected Singular, got {other:?}"),
        }
    }

    #[test]
    fn test_three_zero_elimination_pivot_is_singular() {
        // [1 1; 1 1]: diagonal nonzero, but alpha_1 = 1 - 1*1 = 0
        let a = Array2::from_elem((2, 2), 1.0);
        assert!(matches!(
            solve_three(&a, &[1.0, 1.0]),
            Err(NumericError::Singular { row: 1 })
        ));
    }

    #[test]
    fn test_gauss_recovers_solution() {
        let a = Array2::from_shape_vec(
            (3, 3),
            vec![2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0],
        )
        .unwrap();
        let b = vec![8.0, -11.0, -3.0];
        let x = solve_gauss(&a, &b).unwrap();
        let expected = [2.0, 3.0, -1.0];
        for i in 0..3 {
            assert!((x[i] - expected[i]).abs() < 1e-12, "x[{i}] = {}", x[i]);
        }
    }

    #[test]
    fn test_gauss_needs_pivoting() {
        // Zero in the top-left corner forces a row exchange.
        let a = Array2::from_shape_vec((2, 2), vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        let x = solve_gauss(&a, &[2.0, 3.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-15);
        assert!((x[1] - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_gauss_leaves_inputs_untouched() {
        let a = Array2::from_shape_vec((2, 2), vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        let b = vec![2.0, 3.0];
        let a_before = a.clone();
        let b_before = b.clone();
        solve_gauss(&a, &b).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_gauss_zero_row_is_singular() {
        let a = Array2::from_shape_vec(
            (3, 3),
            vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        assert!(matches!(
            solve_gauss(&a, &[1.0, 2.0, 3.0]),
            Err(NumericError::Singular { .. })
        ));
    }

    #[test]
    fn test_gauss_rank_deficient_is_singular() {
        let a = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        assert!(matches!(
            solve_gauss(&a, &[1.0, 2.0]),
            Err(NumericError::Singular { .. })
        ));
    }

    #[test]
    fn test_five_matches_gauss() {
        let n = 8;
        let a = Array2::from_shape_fn((n, n), |(i, j)| match i.abs_diff(j) {
            0 => 10.0,
            1 => -3.0 + 0.1 * i as f64,
            2 => 1.0,
            _ => 0.0,
        });
        let b: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).cos()).collect();
        let x5 = solve_five(&a, &b).unwrap();
        let xg = solve_gauss(&a, &b).unwrap();
        for i in 0..n {
            assert!((x5[i] - xg[i]).abs() < 1e-9, "x[{i}]: {} vs {}", x5[i], xg[i]);
        }
        let ax = mat_vec(&a, &x5);
        for i in 0..n {
            assert!((ax[i] - b[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_five_small_sizes() {
        for n in 1..5 {
            let a = Array2::from_shape_fn((n, n), |(i, j)| match i.abs_diff(j) {
                0 => 5.0,
                1 => 1.0,
                2 => 0.5,
                _ => 0.0,
            });
            let b: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
            let x = solve_five(&a, &b).unwrap();
            let ax = mat_vec(&a, &x);
            for i in 0..n {
                assert!((ax[i] - b[i]).abs() < 1e-12, "n={n}, row {i}");
            }
        }
    }

    #[test]
    fn test_five_zero_diagonal_is_singular() {
        let band = Array2::from_shape_fn((5, 5), |(i, k)| if k == 2 && i != 3 { 1.0 } else { 0.0 });
        assert!(matches!(
            solve_five_ms(&band, &[1.0; 5]),
            Err(NumericError::Singular { row: 3 })
        ));
    }

    #[test]
    fn test_pack_three_layout() {
        let a = laplacian(3, 2.0, -1.0);
        let band = pack_three(&a).unwrap();
        assert_eq!(band.dim(), (3, 3));
        assert_eq!(band[[0, 0]], 0.0);
        assert_eq!(band[[1, 0]], -1.0);
        assert_eq!(band[[1, 1]], 2.0);
        assert_eq!(band[[2, 2]], 0.0);
    }

    #[test]
    fn test_dimension_checks() {
        let a = Array2::<f64>::zeros((3, 2));
        assert!(matches!(
            solve_gauss(&a, &[1.0, 2.0, 3.0]),
            Err(NumericError::DimensionMismatch(_))
        ));
        let band = Array2::<f64>::ones((3, 3));
        assert!(matches!(
            solve_five_ms(&band, &[1.0, 2.0, 3.0]),
            Err(NumericError::DimensionMismatch(_))
        ));
        assert!(matches!(
            solve_three_ms(&Array2::zeros((0, 3)), &[]),
            Err(NumericError::DimensionMismatch(_))
        ));
    }
}
