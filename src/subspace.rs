// src/subspace.rs
//! Subspace operations on blades: projection, vector basis, join and meet.
//!
//! A blade `A = a1 ^ a2 ^ ... ^ ak` stands for the subspace spanned by its
//! factors. The only information available is its coefficient pattern, so
//! the factors are recovered by projecting the algebra's basis vectors onto
//! `A` and keeping the ones that grow a running outer product.
//!
//! Every operation here accepts any single-grade element. A single-grade sum
//! that is not a true blade (e.g. `e12 + e34`) passes the check and yields a
//! result only as meaningful as its input.

use crate::error::{GaError, Result};
use crate::multivector::MultiVector;

impl MultiVector {
    fn single_grade(&self) -> Result<usize> {
        match self.grades().as_slice() {
            [g] => Ok(*g),
            _ => Err(GaError::NotABlade),
        }
    }

    /// Project `other` onto the subspace of this blade: `(M ⌋ A) A⁻¹`.
    pub fn project(&self, other: &MultiVector) -> Result<MultiVector> {
        self.check_layout(other)?;
        self.single_grade()?;
        other.left_contraction(self)?.geometric_product(&self.inv()?)
    }

    /// A vector basis of this blade's subspace.
    ///
    /// Basis vectors of the algebra are projected onto the blade in
    /// blade-list order; each projection that keeps the running outer product
    /// nonzero is kept, until there are as many vectors as the blade's grade.
    /// A scalar blade has an empty basis.
    pub fn basis(&self) -> Result<Vec<MultiVector>> {
        let grade = self.single_grade()?;
        let mut basis = Vec::with_capacity(grade);
        if grade == 0 {
            return Ok(basis);
        }

        let mut inverse = self.inv()?;
        inverse.clean(None);

        let mut running = MultiVector::scalar(self.layout(), 1.0);
        for ei in self.layout().basis_vectors() {
            let projected = ei.left_contraction(self)?.geometric_product(&inverse)?;
            running.clean(None);
            let extended = running.outer_product(&projected)?;
            if !extended.is_zero() {
                running = extended;
                basis.push(projected);
                if basis.len() == grade {
                    break;
                }
            }
        }
        Ok(basis)
    }

    /// Unit blade along `self`, or `self` unchanged when it is null.
    fn normal_or_null(&self) -> MultiVector {
        let mag = self.magnitude();
        if mag < self.eps() {
            return self.clone();
        }
        self.scale(1.0 / mag)
    }

    /// The smallest blade containing both blades, normalized unless it is
    /// a null blade.
    pub fn join(&self, other: &MultiVector) -> Result<MultiVector> {
        self.check_layout(other)?;
        let self_grade = self.single_grade()?;
        let other_grade = other.single_grade()?;

        let outer = self.outer_product(other)?;
        if !outer.is_zero() {
            return Ok(outer.normal_or_null());
        }

        // Contract `other`'s dual onto `self`; nonzero when the blades share
        // only part of their span.
        let m = other.geometric_product(&self.inv_ps()?)?.left_contraction(self)?;
        if !m.is_zero() {
            let c = m.normal_or_null();
            tracing::trace!(self_grade, other_grade, "join through the common factor");
            return Ok(self
                .geometric_product(&c.inv()?)?
                .outer_product(other)?
                .normal_or_null());
        }

        let (larger, smaller) = if self_grade >= other_grade {
            (self, other)
        } else {
            (other, self)
        };

        if larger.geometric_product(smaller)? == larger.inner_product(smaller)? {
            return Ok(larger.normal_or_null());
        }

        tracing::trace!(self_grade, other_grade, "join by basis augmentation");
        let mut joined = larger.clone();
        for ei in smaller.basis()? {
            joined.clean(None);
            let extended = joined.outer_product(&ei)?;
            if !extended.is_zero() {
                joined = extended;
            }
        }
        Ok(joined.normal_or_null())
    }

    /// The meet `(A I⁻¹) · B` relative to `subspace`, the join by default.
    pub fn meet(&self, other: &MultiVector, subspace: Option<&MultiVector>) -> Result<MultiVector> {
        self.check_layout(other)?;
        self.single_grade()?;
        other.single_grade()?;

        let inverse = match subspace {
            Some(i) => {
                self.check_layout(i)?;
                i.inv()?
            }
            None => self.join(other)?.inv()?,
        };
        self.geometric_product(&inverse)?.inner_product(other)
    }
}
