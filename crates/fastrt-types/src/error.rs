// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumericError {
    #[error("No equidistant output values fall inside the data range")]
    NoSplinedValues,

    #[error("Abscissas not ascending at index {index}: {left} >= {right}")]
    NotAscending { index: usize, left: f64, right: f64 },

    #[error("Spline interpolation not possible: interior system is singular")]
    SplineNotPossible,

    #[error("Too few data points: got {got}, need at least {min}")]
    TooFewDataPoints { got: usize, min: usize },

    #[error("Data not sorted by abscissa at index {index}")]
    DataNotSorted { index: usize },

    #[error("Negative weighting factor {weight} at index {index}")]
    NegativeWeightingFactors { index: usize, weight: f64 },

    #[error("No extrapolation: {x} outside [{lower}, {upper}]")]
    NoExtrapolation { x: f64, lower: f64, upper: f64 },

    #[error("Spectrum abscissas are not equidistant (index {index})")]
    SpecNotEquidistant { index: usize },

    #[error("Kernel abscissas are not equidistant (index {index})")]
    ConvNotEquidistant { index: usize },

    #[error("Kernel has no tap at exactly 0.0")]
    NotCentered,

    #[error("Spectrum step {spec_step} differs from kernel step {conv_step}")]
    SpecConvDifferent { spec_step: f64, conv_step: f64 },

    #[error("Linear system is singular at row {row}")]
    Singular { row: usize },

    #[error("Integration limits [{a}, {b}] outside data range [{lower}, {upper}]")]
    LimitsOutOfRange {
        a: f64,
        b: f64,
        lower: f64,
        upper: f64,
    },

    #[error("Fatal integration error: segment {right} precedes segment {left}")]
    FatalIntegrationError { left: usize, right: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NumericError {
    /// Integer status code. Success (0) is expressed as `Ok`.
    ///
    /// The integrator codes reuse -1 and -2, matching the separate header
    /// they were declared in.
    pub fn code(&self) -> i32 {
        match self {
            NumericError::NoSplinedValues => -1,
            NumericError::NotAscending { .. } => -2,
            NumericError::SplineNotPossible => -3,
            NumericError::TooFewDataPoints { .. } => -4,
            NumericError::DataNotSorted { .. } => -5,
            NumericError::NegativeWeightingFactors { .. } => -6,
            NumericError::NoExtrapolation { .. } => -7,
            NumericError::SpecNotEquidistant { .. } => -10,
            NumericError::ConvNotEquidistant { .. } => -11,
            NumericError::NotCentered => -12,
            NumericError::SpecConvDifferent { .. } => -13,
            NumericError::Singular { .. } => -20,
            NumericError::LimitsOutOfRange { .. } => -1,
            NumericError::FatalIntegrationError { .. } => -2,
            NumericError::DimensionMismatch(_) => -40,
            NumericError::InvalidParameter(_) => -41,
            NumericError::Overflow(_) => -42,
            NumericError::Io(_) => -50,
            NumericError::Json(_) => -51,
        }
    }
}

pub type NumericResult<T> = Result<T, NumericError>;

/// Collapse a result into the driver's integer status convention.
pub fn status_code<T>(result: &NumericResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}
