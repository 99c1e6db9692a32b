// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Batch
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Data-parallel fan-out over independent requests.
//!
//! Each element is processed by the same sequential routine as a single
//! call would use; only the outer loop runs on the rayon pool. The first
//! error in index order is returned.

use fastrt_types::config::ConvolutionConfig;
use fastrt_types::error::NumericResult;
use fastrt_types::series::SampleSeries;
use rayon::prelude::*;
use tracing::debug;

use crate::resample::convolve_with;
use crate::spline::Spline;

/// Evaluate one fitted curve at many abscissas.
pub fn eval_many(curve: &Spline, xs: &[f64]) -> NumericResult<Vec<f64>> {
    xs.par_iter().map(|&x| curve.eval(x)).collect()
}

/// Apply one kernel to many spectra.
pub fn convolve_many(
    spectra: &[SampleSeries],
    kernel: &SampleSeries,
    cfg: &ConvolutionConfig,
) -> NumericResult<Vec<SampleSeries>> {
    debug!(
        spectra = spectra.len(),
        taps = kernel.len(),
        threads = rayon::current_num_threads(),
        "batch convolution"
    );
    spectra
        .par_iter()
        .map(|s| convolve_with(s, kernel, cfg))
        .collect()
}
