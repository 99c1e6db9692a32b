// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{NumericError, NumericResult};

/// Top-level numerics configuration for one processing chain.
/// Maps 1:1 to the JSON files under `configs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericsConfig {
    pub name: String,
    pub resample: ResampleConfig,
    #[serde(default)]
    pub convolution: ConvolutionConfig,
}

/// Interpolation family used when resampling onto an equidistant grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Natural cubic interpolating spline.
    #[default]
    Cubic,
    /// Piecewise linear.
    Linear,
    /// Weighted approximating (smoothing) spline.
    Approximating,
}

/// Equidistant output grid and interpolation family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampleConfig {
    /// First requested abscissa; clipped up to the data range.
    pub start: f64,
    /// Output step, must be positive.
    pub step: f64,
    #[serde(default)]
    pub method: InterpolationMethod,
    /// Per-point weights for the approximating spline.
    /// When absent every point gets weight 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

/// How an instrument kernel is applied to a spectrum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvolutionMode {
    /// Spectrum and kernel already share one equidistant step.
    Direct,
    /// Resample the spectrum onto the kernel step, convolve, resample back.
    #[default]
    Interpolated,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvolutionConfig {
    #[serde(default)]
    pub mode: ConvolutionMode,
}

impl ResampleConfig {
    pub fn new(start: f64, step: f64, method: InterpolationMethod) -> Self {
        ResampleConfig {
            start,
            step,
            method,
            weights: None,
        }
    }

    pub fn validate(&self) -> NumericResult<()> {
        if !self.start.is_finite() {
            return Err(NumericError::InvalidParameter(format!(
                "resample start must be finite, got {}",
                self.start
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(NumericError::InvalidParameter(format!(
                "resample step must be positive and finite, got {}",
                self.step
            )));
        }
        if let Some(weights) = &self.weights {
            if let Some((index, &weight)) = weights.iter().enumerate().find(|(_, w)| **w < 0.0) {
                return Err(NumericError::NegativeWeightingFactors { index, weight });
            }
        }
        Ok(())
    }
}

impl NumericsConfig {
    /// Load from a JSON file and validate it.
    pub fn from_file(path: &str) -> NumericResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.resample.validate()?;
        Ok(config)
    }
}
