//! Sample statistics and binomial smoothing.
//!
//! Weighted variants take per-sample uncertainties σ_i and weight each
//! sample with 1/σ_i².

use fastrt_types::error::{NumericError, NumericResult};

fn require(x: &[f64], min: usize) -> NumericResult<()> {
    if x.len() < min {
        return Err(NumericError::TooFewDataPoints { got: x.len(), min });
    }
    Ok(())
}

/// Inverse variances 1/σ², rejecting zero or non-finite σ.
fn inverse_variances(x: &[f64], sigma: &[f64]) -> NumericResult<Vec<f64>> {
    if x.len() != sigma.len() {
        return Err(NumericError::DimensionMismatch(format!(
            "{} samples, {} uncertainties",
            x.len(),
            sigma.len()
        )));
    }
    sigma
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let inv = 1.0 / (s * s);
            if inv.is_finite() {
                Ok(inv)
            } else {
                Err(NumericError::InvalidParameter(format!(
                    "uncertainty {s} at index {i}"
                )))
            }
        })
        .collect()
}

/// Arithmetic mean.
pub fn mean(x: &[f64]) -> NumericResult<f64> {
    require(x, 1)?;
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

/// Mean weighted by 1/σ².
pub fn weighted_mean(x: &[f64], sigma: &[f64]) -> NumericResult<f64> {
    require(x, 1)?;
    let inv = inverse_variances(x, sigma)?;
    let num: f64 = x.iter().zip(&inv).map(|(xi, wi)| xi * wi).sum();
    let den: f64 = inv.iter().sum();
    Ok(num / den)
}

/// Sample standard deviation (n − 1 in the denominator).
pub fn standard_deviation(x: &[f64]) -> NumericResult<f64> {
    require(x, 2)?;
    let mu = mean(x)?;
    let ss: f64 = x.iter().map(|xi| (xi - mu) * (xi - mu)).sum();
    Ok((ss / (x.len() - 1) as f64).sqrt())
}

/// Weighted sample standard deviation, scaled by n/(n − 1).
pub fn weighted_standard_deviation(x: &[f64], sigma: &[f64]) -> NumericResult<f64> {
    require(x, 2)?;
    let mu = weighted_mean(x, sigma)?;
    let inv = inverse_variances(x, sigma)?;
    let ss: f64 = x
        .iter()
        .zip(&inv)
        .map(|(xi, wi)| (xi - mu) * (xi - mu) * wi)
        .sum();
    let den: f64 = inv.iter().sum();
    let n = x.len() as f64;
    Ok((ss * n / (n - 1.0) / den).sqrt())
}

/// n! as a float. Fails with `Overflow` once the product leaves f64 range.
pub fn factorial(n: u64) -> NumericResult<f64> {
    let mut acc = 1.0f64;
    for k in 2..=n {
        acc *= k as f64;
        if !acc.is_finite() {
            return Err(NumericError::Overflow(format!("{n}! exceeds f64")));
        }
    }
    Ok(acc)
}

/// Binomial coefficient "n over m", computed exactly in integers.
pub fn binomial(n: u64, m: u64) -> NumericResult<u64> {
    if m > n {
        return Err(NumericError::InvalidParameter(format!(
            "binomial({n}, {m}): m exceeds n"
        )));
    }
    let m = m.min(n - m);
    let mut acc: u128 = 1;
    for i in 0..m {
        // acc · (n − i) is divisible by (i + 1) at every step
        acc = acc
            .checked_mul(u128::from(n - i))
            .ok_or_else(|| NumericError::Overflow(format!("binomial({n}, {m})")))?
            / u128::from(i + 1);
    }
    u64::try_from(acc).map_err(|_| NumericError::Overflow(format!("binomial({n}, {m})")))
}

/// Smooth with binomial weights C(width, j), j = 0..=width.
///
/// The window is centered at offset `width / 2`; near the edges the sum is
/// normalized by the weights that overlap the data.
pub fn binomial_average(width: u64, y: &[f64]) -> NumericResult<Vec<f64>> {
    require(y, 1)?;
    let weights = (0..=width)
        .map(|j| binomial(width, j).map(|c| c as f64))
        .collect::<NumericResult<Vec<f64>>>()?;

    let n = y.len() as i64;
    let half = (width / 2) as i64;
    let out = (0..n)
        .map(|i| {
            let mut acc = 0.0;
            let mut sum = 0.0;
            for (j, w) in weights.iter().enumerate() {
                let k = i - half + j as i64;
                if (0..n).contains(&k) {
                    acc += y[k as usize] * w;
                    sum += w;
                }
            }
            acc / sum
        })
        .collect();
    Ok(out)
}
