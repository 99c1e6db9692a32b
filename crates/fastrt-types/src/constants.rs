// ─────────────────────────────────────────────────────────────────────
// FastRT Numerics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Relative tolerance for floating-point equality of abscissas and steps.
pub const DOUBLE_RELATIVE_ERROR: f64 = 1e-10;

/// Slack added when counting equidistant output points, so that a grid
/// ending exactly on the last abscissa is not lost to rounding.
pub const GRID_COUNT_SLACK: f64 = 1e-8;

/// Minimum number of points for an interpolating spline.
pub const MIN_SPLINE_POINTS: usize = 2;

/// Minimum number of points for an approximating (smoothing) spline.
pub const MIN_APPSPL_POINTS: usize = 6;

/// Weights below this are treated as this value in the approximating spline,
/// keeping the per-point variance factor 6/w finite.
pub const MIN_SMOOTHING_WEIGHT: f64 = 1e-12;
