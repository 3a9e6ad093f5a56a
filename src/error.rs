// src/error.rs
//! Error type for layout construction and multivector operations.

use thiserror::Error;

use crate::types::{BladeIndex, Scalar};

/// Everything that can go wrong in the engine.
///
/// All failures are local and synchronous: an operation either returns a
/// new value or fails without touching its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// Malformed signature, blade list or name list.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A blade tuple that is not one of the algebra's blades.
    #[error("unknown blade {0:?}")]
    UnknownBlade(Vec<BladeIndex>),

    /// A blade name that the layout does not define.
    #[error("unknown blade name {0:?}")]
    UnknownBladeName(String),

    /// Binary operation between multivectors of different layouts.
    #[error("cannot operate on multivectors with different layouts")]
    LayoutMismatch,

    /// Grade projection onto a grade the algebra does not have.
    #[error("algebra does not have grade {0}")]
    UnknownGrade(usize),

    /// Integer power with a fractional or negative exponent.
    #[error("exponent must be a non-negative integer, got {0}")]
    InvalidExponent(Scalar),

    /// `r ** M` needs `ln(r)`.
    #[error("base of a multivector exponent must be positive, got {0}")]
    NonPositiveBase(Scalar),

    /// Inversion of an element with no inverse.
    #[error("multivector has no inverse")]
    SingularMultivector,

    /// Blade-only operation on a multivector spanning several grades.
    #[error("multivector is not a blade")]
    NotABlade,

    /// Scalar coercion of a multivector with non-scalar parts.
    #[error("non-scalar coefficients are non-zero")]
    NotAScalar,

    /// A frame member that is not a grade-1 vector.
    #[error("frames must be made from vectors")]
    NotAVector,

    /// Coefficient vector of the wrong length for its layout.
    #[error("coefficient vector must have length {expected}, got {actual}")]
    CoefficientLength { expected: usize, actual: usize },

    /// Kernel mask that does not cover the table.
    #[error("mask must have one entry per table entry ({expected}), got {actual}")]
    MaskLength { expected: usize, actual: usize },

    /// Linear coefficient index past the end of the coefficient vector.
    #[error("coefficient index {index} out of range for {len} coefficients")]
    IndexOutOfRange { index: usize, len: usize },

    /// Text that does not follow the multivector grammar.
    #[error("cannot parse multivector: {0}")]
    Parse(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GaError>;
