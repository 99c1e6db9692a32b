// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Resample
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Config-driven entry points over the spline and convolution routines.

use fastrt_types::config::{
    ConvolutionConfig, ConvolutionMode, InterpolationMethod, ResampleConfig,
};
use fastrt_types::error::NumericResult;
use fastrt_types::series::SampleSeries;
use tracing::debug;

use crate::convolve::{convolute, int_convolute};
use crate::linear::linear_eqd;
use crate::spline::{appspl, spline};

/// Resample `series` onto the grid described by `cfg`.
///
/// The approximating method uses `cfg.weights`, or weight 1 for every point
/// when none are given.
pub fn resample(series: &SampleSeries, cfg: &ResampleConfig) -> NumericResult<SampleSeries> {
    cfg.validate()?;
    debug!(
        method = ?cfg.method,
        samples = series.len(),
        start = cfg.start,
        step = cfg.step,
        "resampling"
    );
    let (x, y) = (&series.x, &series.y);
    match cfg.method {
        InterpolationMethod::Cubic => spline(x, y, cfg.start, cfg.step),
        InterpolationMethod::Linear => linear_eqd(x, y, cfg.start, cfg.step),
        InterpolationMethod::Approximating => match &cfg.weights {
            Some(w) => appspl(x, y, w, cfg.start, cfg.step),
            None => appspl(x, y, &vec![1.0; x.len()], cfg.start, cfg.step),
        },
    }
}

/// Convolve `series` with `kernel`; the result lies on `series.x`.
pub fn convolve_with(
    series: &SampleSeries,
    kernel: &SampleSeries,
    cfg: &ConvolutionConfig,
) -> NumericResult<SampleSeries> {
    match cfg.mode {
        ConvolutionMode::Direct => convolute(&series.x, &series.y, &kernel.x, &kernel.y),
        ConvolutionMode::Interpolated => {
            let y = int_convolute(&series.x, &series.y, &kernel.x, &kernel.y)?;
            Ok(SampleSeries {
                x: series.x.clone(),
                y,
            })
        }
    }
}
