// src/random.rs
//! Random multivectors, vectors and rotors.
//!
//! Everything takes the generator explicitly so tests can seed it with
//! `StdRng::seed_from_u64`.

use std::sync::Arc;

use rand::Rng;

use crate::error::Result;
use crate::layout::Layout;
use crate::multivector::MultiVector;
use crate::types::Scalar;

/// How [`random_mv`] draws coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomOptions {
    /// Coefficients are uniform in `[min, max]`.
    pub min: Scalar,
    pub max: Scalar,
    /// Only these grades get coefficients; every grade when `None`.
    pub grades: Option<Vec<usize>>,
    /// Normalize the result with [`MultiVector::normal`].
    pub normed: bool,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            min: -2.0,
            max: 2.0,
            grades: None,
            normed: false,
        }
    }
}

impl RandomOptions {
    /// Grade-1 coefficients only.
    pub fn vectors() -> Self {
        Self {
            grades: Some(vec![1]),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, min: Scalar, max: Scalar) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_grades(mut self, grades: Vec<usize>) -> Self {
        self.grades = Some(grades);
        self
    }

    pub fn normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }
}

/// A multivector with uniform random coefficients.
///
/// Fails only when `normed` is set and the draw has zero magnitude.
pub fn random_mv<R: Rng + ?Sized>(
    layout: &Arc<Layout>,
    rng: &mut R,
    options: &RandomOptions,
) -> Result<MultiVector> {
    let (lo, hi) = if options.min <= options.max {
        (options.min, options.max)
    } else {
        (options.max, options.min)
    };
    let value = layout
        .grades()
        .iter()
        .map(|g| match &options.grades {
            Some(grades) if !grades.contains(g) => 0.0,
            _ => rng.gen_range(lo..=hi),
        })
        .collect();

    let mv = MultiVector::from_coefficients(layout, value)?;
    if options.normed {
        mv.normal()
    } else {
        Ok(mv)
    }
}

/// `n` random grade-1 vectors, optionally normalized.
pub fn random_vectors<R: Rng + ?Sized>(
    layout: &Arc<Layout>,
    rng: &mut R,
    n: usize,
    normed: bool,
) -> Result<Vec<MultiVector>> {
    let options = RandomOptions::vectors().normed(normed);
    (0..n).map(|_| random_mv(layout, rng, &options)).collect()
}

/// A random rotor: the product of `dims` unit vectors, or `dims - 1` when
/// `dims` is odd, so the result is even.
pub fn random_rotor<R: Rng + ?Sized>(layout: &Arc<Layout>, rng: &mut R) -> Result<MultiVector> {
    let dims = layout.dims();
    let n = if dims % 2 == 0 { dims } else { dims - 1 };

    let mut rotor = layout.scalar_one();
    for v in random_vectors(layout, rng, n, true)? {
        rotor = rotor.geometric_product(&v)?;
    }
    Ok(rotor)
}
