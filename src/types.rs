// src/types.rs
//! Numeric types shared by every module.

#[cfg(feature = "f32")]
pub type Scalar = f32;
#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

/// Index of a basis vector as it appears in a blade tuple, e.g. the `2` in `(1, 2)`.
///
/// Signed because a layout may number its basis vectors from any `first_index`.
pub type BladeIndex = i32;

/// Default tolerance for float comparisons at the configured scalar width.
#[cfg(feature = "f32")]
pub const DEFAULT_EPS: Scalar = 1e-6;
#[cfg(not(feature = "f32"))]
pub const DEFAULT_EPS: Scalar = 1e-12;
