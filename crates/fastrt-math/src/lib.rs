//! Numerical primitives for FastRT lookup-table processing.
//!
//! Splines (interpolating, linear, approximating), banded direct solvers,
//! spline quadrature, and kernel convolution on equidistant grids.

pub mod banded;
pub mod batch;
pub mod compare;
pub mod convolve;
pub mod integrate;
pub mod linear;
pub mod resample;
pub mod spline;
pub mod stats;
