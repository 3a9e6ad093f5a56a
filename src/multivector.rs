// src/multivector.rs
//! Multivectors over a shared [`Layout`].
//!
//! A multivector is a dense coefficient vector of length `2^dims`, one
//! coefficient per blade in the layout's blade order. Every product is a
//! call into one of the layout's compiled kernels; nothing here knows the
//! multiplication rules directly.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::error::{GaError, Result};
use crate::layout::Layout;
use crate::table::ProductKind;
use crate::types::{BladeIndex, Scalar};

/// An element of a geometric algebra.
#[derive(Clone)]
pub struct MultiVector {
    layout: Arc<Layout>,
    value: Vec<Scalar>,
}

/// Right-hand side of a binary operation: a multivector or a bare scalar.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Multivector(&'a MultiVector),
    Scalar(Scalar),
}

impl<'a> From<&'a MultiVector> for Operand<'a> {
    fn from(mv: &'a MultiVector) -> Self {
        Operand::Multivector(mv)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Operand::Scalar(s)
    }
}

/// Ways to address a single coefficient.
#[derive(Debug, Clone, Copy)]
pub enum BladeKey<'a> {
    /// Linear position in the coefficient vector.
    Index(usize),
    /// Index tuple, canonical or not.
    Tuple(&'a [BladeIndex]),
    /// Display name, e.g. `"e12"`.
    Name(&'a str),
}

impl From<usize> for BladeKey<'_> {
    fn from(index: usize) -> Self {
        BladeKey::Index(index)
    }
}

impl<'a> From<&'a [BladeIndex]> for BladeKey<'a> {
    fn from(blade: &'a [BladeIndex]) -> Self {
        BladeKey::Tuple(blade)
    }
}

impl<'a, const N: usize> From<&'a [BladeIndex; N]> for BladeKey<'a> {
    fn from(blade: &'a [BladeIndex; N]) -> Self {
        BladeKey::Tuple(blade)
    }
}

impl<'a> From<&'a str> for BladeKey<'a> {
    fn from(name: &'a str) -> Self {
        BladeKey::Name(name)
    }
}

impl MultiVector {
    /// The zero multivector.
    pub fn zero(layout: &Arc<Layout>) -> Self {
        Self {
            layout: Arc::clone(layout),
            value: vec![0.0; layout.ga_dims()],
        }
    }

    /// A multivector with the given coefficients in blade-list order.
    pub fn from_coefficients(layout: &Arc<Layout>, value: Vec<Scalar>) -> Result<Self> {
        if value.len() != layout.ga_dims() {
            return Err(GaError::CoefficientLength {
                expected: layout.ga_dims(),
                actual: value.len(),
            });
        }
        Ok(Self {
            layout: Arc::clone(layout),
            value,
        })
    }

    /// A multivector from `(position, coefficient)` pairs; unnamed positions are zero.
    pub fn from_sparse<I>(layout: &Arc<Layout>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Scalar)>,
    {
        let mut mv = Self::zero(layout);
        for (index, v) in entries {
            mv.set_coefficient(index, v)?;
        }
        Ok(mv)
    }

    /// `s` as a multivector.
    pub fn scalar(layout: &Arc<Layout>, s: Scalar) -> Self {
        let mut mv = Self::zero(layout);
        mv.value[layout.scalar_index()] = s;
        mv
    }

    /// The unit blade at position `index`.
    ///
    /// # Panics
    /// If `index >= layout.ga_dims()`.
    pub fn basis_blade(layout: &Arc<Layout>, index: usize) -> Self {
        let mut mv = Self::zero(layout);
        mv.value[index] = 1.0;
        mv
    }

    /// A multivector on the same layout with new coefficients.
    pub(crate) fn with_value(&self, value: Vec<Scalar>) -> Self {
        debug_assert_eq!(value.len(), self.value.len());
        Self {
            layout: Arc::clone(&self.layout),
            value,
        }
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Coefficients in blade-list order.
    pub fn value(&self) -> &[Scalar] {
        &self.value
    }

    /// Mutable coefficients in blade-list order.
    pub fn value_mut(&mut self) -> &mut [Scalar] {
        &mut self.value
    }

    pub fn into_value(self) -> Vec<Scalar> {
        self.value
    }

    /// Number of coefficients, `2^dims`.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    pub(crate) fn eps(&self) -> Scalar {
        self.layout.config().eps
    }

    /// Position and sign of a key; non-canonical tuples carry a reordering sign.
    fn resolve(&self, key: BladeKey<'_>) -> Result<(Scalar, usize)> {
        match key {
            BladeKey::Index(index) if index < self.value.len() => Ok((1.0, index)),
            BladeKey::Index(index) => Err(GaError::IndexOutOfRange {
                index,
                len: self.value.len(),
            }),
            BladeKey::Name(name) => Ok((1.0, self.layout.name_index(name)?)),
            BladeKey::Tuple(blade) => match self.layout.blade_index(blade) {
                Ok(index) => Ok((1.0, index)),
                Err(_) => {
                    let (sign, index) = self.layout.indexer().canonical_form(blade, self.layout.signature())?;
                    Ok((sign as Scalar, index))
                }
            },
        }
    }

    /// Coefficient of a blade given by position, tuple or name.
    ///
    /// A tuple out of canonical order reads the canonical coefficient times
    /// the reordering sign, so `coefficient_at(&[2, 1])` is `-coefficient_at(&[1, 2])`.
    pub fn coefficient_at<'k>(&self, key: impl Into<BladeKey<'k>>) -> Result<Scalar> {
        let (sign, index) = self.resolve(key.into())?;
        Ok(sign * self.value[index])
    }

    /// Set the coefficient of a blade, applying the reordering sign for non-canonical tuples.
    pub fn set_coefficient<'k>(&mut self, key: impl Into<BladeKey<'k>>, v: Scalar) -> Result<()> {
        let (sign, index) = self.resolve(key.into())?;
        self.value[index] = sign * v;
        Ok(())
    }

    /// Zero the coefficient of a blade.
    pub fn clear_coefficient<'k>(&mut self, key: impl Into<BladeKey<'k>>) -> Result<()> {
        let (_, index) = self.resolve(key.into())?;
        self.value[index] = 0.0;
        Ok(())
    }

    /// Grade-0 coefficient.
    pub fn scalar_part(&self) -> Scalar {
        self.value[self.layout.scalar_index()]
    }

    /// Identity check on the layouts.
    pub(crate) fn check_layout(&self, other: &MultiVector) -> Result<()> {
        if Arc::ptr_eq(&self.layout, &other.layout) {
            Ok(())
        } else {
            Err(GaError::LayoutMismatch)
        }
    }

    /// Turn an operand into a multivector on this layout.
    pub(crate) fn coerce<'a>(&self, other: Operand<'a>) -> Result<Cow<'a, MultiVector>> {
        match other {
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                Ok(Cow::Borrowed(mv))
            }
            Operand::Scalar(s) => Ok(Cow::Owned(MultiVector::scalar(&self.layout, s))),
        }
    }

    #[inline]
    fn apply(&self, kind: ProductKind, other: &MultiVector) -> MultiVector {
        self.with_value(self.layout.kernel(kind).evaluate(&self.value, &other.value))
    }

    /// Geometric product `self * other`.
    pub fn geometric_product<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        match other.into() {
            Operand::Scalar(s) => Ok(self.scale(s)),
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                Ok(self.apply(ProductKind::Geometric, mv))
            }
        }
    }

    /// Outer product `self ^ other`.
    pub fn outer_product<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        match other.into() {
            Operand::Scalar(s) => Ok(self.scale(s)),
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                Ok(self.apply(ProductKind::Outer, mv))
            }
        }
    }

    /// Inner product `self | other`; zero whenever one side is a scalar.
    pub fn inner_product<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        match other.into() {
            Operand::Scalar(_) => Ok(MultiVector::zero(&self.layout)),
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                Ok(self.apply(ProductKind::Inner, mv))
            }
        }
    }

    /// Left contraction `self _| other`.
    pub fn left_contraction<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        let other = self.coerce(other.into())?;
        Ok(self.apply(ProductKind::LeftContraction, &other))
    }

    pub fn checked_add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        let other = self.coerce(other.into())?;
        let value = self.value.iter().zip(&other.value).map(|(a, b)| a + b).collect();
        Ok(self.with_value(value))
    }

    pub fn checked_sub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        let other = self.coerce(other.into())?;
        let value = self.value.iter().zip(&other.value).map(|(a, b)| a - b).collect();
        Ok(self.with_value(value))
    }

    /// `self / other`: coefficient-wise for a scalar, `self * other⁻¹` otherwise.
    pub fn divide<'a>(&self, other: impl Into<Operand<'a>>) -> Result<MultiVector> {
        match other.into() {
            Operand::Scalar(s) => Ok(self.with_value(self.value.iter().map(|v| v / s).collect())),
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                Ok(self.apply(ProductKind::Geometric, &mv.inv()?))
            }
        }
    }

    /// Add `other` into `self` in place.
    pub fn accumulate<'a>(&mut self, other: impl Into<Operand<'a>>) -> Result<()> {
        match other.into() {
            Operand::Scalar(s) => {
                self.value[self.layout.scalar_index()] += s;
            }
            Operand::Multivector(mv) => {
                self.check_layout(mv)?;
                self.value.iter_mut().zip(&mv.value).for_each(|(a, b)| *a += b);
            }
        }
        Ok(())
    }

    /// Every coefficient times `s`.
    pub fn scale(&self, s: Scalar) -> MultiVector {
        self.with_value(self.value.iter().map(|v| v * s).collect())
    }

    fn signed(&self, signs: &[Scalar]) -> MultiVector {
        self.with_value(self.value.iter().zip(signs).map(|(v, s)| v * s).collect())
    }

    /// Reversion `~M`: reverses the vector order in every blade.
    pub fn reverse(&self) -> MultiVector {
        self.signed(self.layout.reversion_signs())
    }

    /// Same as [`MultiVector::reverse`].
    pub fn adjoint(&self) -> MultiVector {
        self.reverse()
    }

    /// Grade involution: negates the odd grades.
    pub fn grade_involution(&self) -> MultiVector {
        self.signed(self.layout.involution_signs())
    }

    /// Clifford conjugate, the grade involution of the reversion.
    pub fn conjugate(&self) -> MultiVector {
        self.reverse().grade_involution()
    }

    /// `<M>_k`.
    pub fn grade(&self, k: usize) -> Result<MultiVector> {
        self.project_grades(&[k])
    }

    /// `<M>_k1 + <M>_k2 + ...`.
    pub fn project_grades(&self, grades: &[usize]) -> Result<MultiVector> {
        if let Some(&missing) = grades.iter().find(|&&g| !self.layout.has_grade(g)) {
            return Err(GaError::UnknownGrade(missing));
        }
        let value = self
            .value
            .iter()
            .zip(self.layout.grades())
            .map(|(&v, g)| if grades.contains(g) { v } else { 0.0 })
            .collect();
        Ok(self.with_value(value))
    }

    /// `(M + M*) / 2`, the even-grade part.
    pub fn even(&self) -> MultiVector {
        let inv = self.grade_involution();
        self.with_value(self.value.iter().zip(&inv.value).map(|(a, b)| 0.5 * (a + b)).collect())
    }

    /// `(M - M*) / 2`, the odd-grade part.
    pub fn odd(&self) -> MultiVector {
        let inv = self.grade_involution();
        self.with_value(self.value.iter().zip(&inv.value).map(|(a, b)| 0.5 * (a - b)).collect())
    }

    /// Scalar part of `~M * M`. Negative values occur in mixed signatures.
    pub fn mag2(&self) -> Scalar {
        let reversed = self.reverse();
        let product = self.layout.kernel(ProductKind::Geometric).evaluate(&reversed.value, &self.value);
        product[self.layout.scalar_index()]
    }

    /// `sqrt(|~M * M|)`.
    pub fn magnitude(&self) -> Scalar {
        self.mag2().abs().sqrt()
    }

    /// `M / |M|`; the result has magnitude one but `mag2` may be `-1`.
    pub fn normal(&self) -> Result<MultiVector> {
        let mag = self.magnitude();
        if mag < self.eps() {
            return Err(GaError::SingularMultivector);
        }
        Ok(self.scale(1.0 / mag))
    }

    /// `M^n` by repeated geometric product. `M^0` is `1`.
    pub fn pow(&self, n: Scalar) -> Result<MultiVector> {
        if !n.is_finite() || (n.round() - n).abs() > self.eps() || n.round() < 0.0 {
            return Err(GaError::InvalidExponent(n));
        }
        let n = n.round() as usize;
        if n == 0 {
            return Ok(MultiVector::scalar(&self.layout, 1.0));
        }
        let mut out = self.clone();
        for _ in 1..n {
            out = out.apply(ProductKind::Geometric, self);
        }
        Ok(out)
    }

    /// `base^M = exp(ln(base) · M)` as a Taylor series.
    ///
    /// Terms are added until the next one falls within `eps` of zero or
    /// `max_series_terms` terms have been summed.
    pub fn rpow(&self, base: Scalar) -> Result<MultiVector> {
        if !(base.is_finite() && base > 0.0) {
            return Err(GaError::NonPositiveBase(base));
        }
        let exponent = self.scale(base.ln());
        let max_terms = self.layout.config().max_series_terms;

        let mut sum = MultiVector::zero(&self.layout);
        let mut term = MultiVector::scalar(&self.layout, 1.0);
        let mut n: Scalar = 1.0;
        let mut terms = 0usize;

        while !term.is_zero() {
            if terms >= max_terms {
                tracing::warn!(terms, "exponential series cut off before converging");
                break;
            }
            sum.value.iter_mut().zip(&term.value).for_each(|(a, b)| *a += b);
            term = term.apply(ProductKind::Geometric, &exponent).scale(1.0 / n);
            n += 1.0;
            terms += 1;
        }
        Ok(sum)
    }

    /// `e^M`.
    pub fn exp(&self) -> Result<MultiVector> {
        self.rpow(std::f64::consts::E as Scalar)
    }

    /// Left inverse by linear algebra.
    ///
    /// Writes left multiplication by `M` as the matrix
    /// `A[i, j] = Σ_k gmt[i, j, k] · M[k]` and solves `Aᵀ x = 1`, so that
    /// `x * M = 1`. Fails with [`GaError::SingularMultivector`] when
    /// `|det A| < eps`.
    ///
    /// The threshold is absolute and `det A` scales as `s^(2^n)` under
    /// `M -> s M`, so small but well-conditioned elements of larger algebras
    /// can be reported singular: `0.01 e1` in `Cl(5, 0)` has `det A = 1e-64`.
    /// Rescale first, or use [`MultiVector::normal_inv`] for versors.
    pub fn left_la_inv(&self) -> Result<MultiVector> {
        let n = self.layout.ga_dims();
        let mut at = DMatrix::<Scalar>::zeros(n, n);
        for e in self.layout.table(ProductKind::Geometric) {
            let v = self.value[e.right];
            if v != 0.0 {
                at[(e.result, e.left)] += e.coefficient as Scalar * v;
            }
        }

        let mut identity = DVector::<Scalar>::zeros(n);
        identity[self.layout.scalar_index()] = 1.0;

        let lu = at.lu();
        let det = lu.determinant();
        tracing::trace!(ga_dims = n, det = det as f64, "left_la_inv");
        if det.abs() < self.eps() {
            return Err(GaError::SingularMultivector);
        }
        let solution = lu.solve(&identity).ok_or(GaError::SingularMultivector)?;
        Ok(self.with_value(solution.iter().copied().collect()))
    }

    /// `~M / (~M M)`, valid only when `~M M` is a nonzero scalar.
    pub fn normal_inv(&self) -> Result<MultiVector> {
        let adjoint = self.reverse();
        let product = adjoint.apply(ProductKind::Geometric, self);
        let s = product.scalar_part();
        if product.is_scalar() && s.abs() > self.eps() {
            Ok(adjoint.scale(1.0 / s))
        } else {
            Err(GaError::SingularMultivector)
        }
    }

    /// The inverse, see [`MultiVector::left_la_inv`].
    pub fn inv(&self) -> Result<MultiVector> {
        self.left_la_inv()
    }

    /// Inverse of the layout's pseudoscalar.
    pub fn inv_ps(&self) -> Result<MultiVector> {
        self.layout.pseudoscalar().inv()
    }

    /// `M * I⁻¹`, against the pseudoscalar unless another subspace is given.
    pub fn dual(&self, subspace: Option<&MultiVector>) -> Result<MultiVector> {
        let inverse = match subspace {
            Some(i) => {
                self.check_layout(i)?;
                i.inv()?
            }
            None => self.inv_ps()?,
        };
        Ok(self.apply(ProductKind::Geometric, &inverse))
    }

    /// `(M N - N M) / 2`.
    pub fn commutator(&self, other: &MultiVector) -> Result<MultiVector> {
        self.check_layout(other)?;
        let mn = self.apply(ProductKind::Geometric, other);
        let nm = other.apply(ProductKind::Geometric, self);
        Ok(self.with_value(mn.value.iter().zip(&nm.value).map(|(a, b)| 0.5 * (a - b)).collect()))
    }

    /// `(M N + N M) / 2`.
    pub fn anticommutator(&self, other: &MultiVector) -> Result<MultiVector> {
        self.check_layout(other)?;
        let mn = self.apply(ProductKind::Geometric, other);
        let nm = other.apply(ProductKind::Geometric, self);
        Ok(self.with_value(mn.value.iter().zip(&nm.value).map(|(a, b)| 0.5 * (a + b)).collect()))
    }

    /// All coefficients within `eps` of zero.
    pub fn is_zero(&self) -> bool {
        let eps = self.eps();
        self.value.iter().all(|v| v.abs() < eps)
    }

    /// No non-scalar coefficient above `eps`.
    pub fn is_scalar(&self) -> bool {
        let eps = self.eps();
        let scalar = self.layout.scalar_index();
        self.value
            .iter()
            .enumerate()
            .all(|(i, v)| i == scalar || v.abs() < eps)
    }

    /// Exactly one grade carries coefficients above `eps`.
    ///
    /// Single-grade elements such as `e12 + e34` in four dimensions pass this
    /// test without being blades; the subspace operations accept them and
    /// give results only as meaningful as their input.
    pub fn is_blade(&self) -> bool {
        self.grades().len() == 1
    }

    /// Grades carrying coefficients above `eps`, ascending.
    pub fn grades(&self) -> Vec<usize> {
        let eps = self.eps();
        let mut grades: Vec<usize> = self
            .value
            .iter()
            .zip(self.layout.grades())
            .filter(|(v, _)| v.abs() > eps)
            .map(|(_, &g)| g)
            .collect();
        grades.sort_unstable();
        grades.dedup();
        grades
    }

    /// The grade with the most coefficients above `threshold`; ties go to the lower grade.
    pub fn modal_grade(&self, threshold: Scalar) -> usize {
        let mut counts = vec![0usize; self.layout.dims() + 1];
        for (v, &g) in self.value.iter().zip(self.layout.grades()) {
            if v.abs() > threshold {
                counts[g] += 1;
            }
        }
        let mut best = 0;
        for (g, &c) in counts.iter().enumerate() {
            if c > counts[best] {
                best = g;
            }
        }
        best
    }

    /// The scalar value, if nothing else is nonzero.
    pub fn to_scalar(&self) -> Result<Scalar> {
        if self.is_scalar() {
            Ok(self.scalar_part())
        } else {
            Err(GaError::NotAScalar)
        }
    }

    /// Zero every coefficient with magnitude at most `eps` (the layout's by default).
    pub fn clean(&mut self, eps: Option<Scalar>) -> &mut Self {
        let eps = eps.unwrap_or_else(|| self.eps());
        self.value.iter_mut().filter(|v| v.abs() <= eps).for_each(|v| *v = 0.0);
        self
    }

    /// Round every coefficient to `decimals` places.
    pub fn round(&mut self, decimals: i32) -> &mut Self {
        let factor = (10.0 as Scalar).powi(decimals);
        self.value.iter_mut().for_each(|v| *v = (*v * factor).round() / factor);
        self
    }

    /// Nonzero terms as separate scaled unit blades, in blade-list order.
    pub fn blades_list(&self) -> Vec<MultiVector> {
        let eps = self.eps();
        self.value
            .iter()
            .enumerate()
            .filter(|(_, v)| v.abs() >= eps)
            .map(|(i, &v)| {
                let mut blade = MultiVector::zero(&self.layout);
                blade.value[i] = v;
                blade
            })
            .collect()
    }

    /// Equal layouts and every coefficient within `eps`.
    pub fn approx_eq(&self, other: &MultiVector) -> bool {
        if self.check_layout(other).is_err() {
            return false;
        }
        let eps = self.eps();
        self.value.iter().zip(&other.value).all(|(a, b)| (a - b).abs() < eps)
    }
}

impl PartialEq for MultiVector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl PartialEq<Scalar> for MultiVector {
    fn eq(&self, other: &Scalar) -> bool {
        let eps = self.eps();
        let scalar = self.layout.scalar_index();
        self.value.iter().enumerate().all(|(i, v)| {
            let target = if i == scalar { *other } else { 0.0 };
            (v - target).abs() < eps
        })
    }
}

impl fmt::Debug for MultiVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layout.config().pretty {
            fmt::Display::fmt(self, f)
        } else {
            write!(f, "MultiVector({:?}, value={:?})", self.layout, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cl;

    fn g3() -> Arc<Layout> {
        cl(3, 0).unwrap().0
    }

    fn mv(layout: &Arc<Layout>, value: [Scalar; 8]) -> MultiVector {
        MultiVector::from_coefficients(layout, value.to_vec()).unwrap()
    }

    #[test]
    fn construction_checks_length() {
        let layout = g3();
        assert_eq!(
            MultiVector::from_coefficients(&layout, vec![0.0; 3]).unwrap_err(),
            GaError::CoefficientLength { expected: 8, actual: 3 }
        );
        let sparse = MultiVector::from_sparse(&layout, [(1, 2.0), (7, -1.0)]).unwrap();
        assert_eq!(sparse.value(), &[0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]);
        assert!(MultiVector::from_sparse(&layout, [(8, 1.0)]).is_err());
    }

    #[test]
    fn coefficient_keys() {
        let layout = g3();
        let mut m = mv(&layout, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(m.coefficient_at(4usize), Ok(5.0));
        assert_eq!(m.coefficient_at("e12"), Ok(5.0));
        assert_eq!(m.coefficient_at(&[1, 2]), Ok(5.0));
        assert_eq!(m.coefficient_at(&[2, 1]), Ok(-5.0));
        let scalar_blade: [BladeIndex; 0] = [];
        assert_eq!(m.coefficient_at(&scalar_blade), Ok(1.0));
        assert_eq!(
            m.coefficient_at(9usize),
            Err(GaError::IndexOutOfRange { index: 9, len: 8 })
        );

        m.set_coefficient(&[3, 2], 2.0).unwrap();
        assert_eq!(m.coefficient_at("e23"), Ok(-2.0));
        m.clear_coefficient("e123").unwrap();
        assert_eq!(m.value()[7], 0.0);
        assert!(matches!(m.coefficient_at(&[1, 4]), Err(GaError::UnknownBlade(_))));
    }

    #[test]
    fn scalar_operands() {
        let layout = g3();
        let e1 = MultiVector::basis_blade(&layout, 1);
        assert_eq!(e1.geometric_product(3.0).unwrap().value()[1], 3.0);
        assert_eq!(e1.outer_product(2.0).unwrap().value()[1], 2.0);
        assert!(e1.inner_product(2.0).unwrap().is_zero());
        // 2 _| e1 = 2 e1, e1 _| 2 = 0
        let two = MultiVector::scalar(&layout, 2.0);
        assert_eq!(two.left_contraction(&e1).unwrap().value()[1], 2.0);
        assert!(e1.left_contraction(2.0).unwrap().is_zero());
    }

    #[test]
    fn layout_mismatch() {
        let a = MultiVector::scalar(&g3(), 1.0);
        let b = MultiVector::scalar(&g3(), 1.0);
        assert_eq!(a.checked_add(&b).unwrap_err(), GaError::LayoutMismatch);
        assert_eq!(a.geometric_product(&b).unwrap_err(), GaError::LayoutMismatch);
        assert!(a != b);
    }

    #[test]
    fn involutions() {
        let layout = g3();
        let m = mv(&layout, [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(m.reverse().value(), &[1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
        assert_eq!(m.grade_involution().value(), &[1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0]);
        assert_eq!(m.conjugate().value(), &[1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0]);
        assert_eq!(m.even().value(), &[1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0]);
        assert_eq!(m.odd().value(), &[0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn grade_projection() {
        let layout = g3();
        let m = mv(&layout, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(m.grade(1).unwrap().value(), &[0.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            m.project_grades(&[0, 3]).unwrap().value(),
            &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8.0]
        );
        assert_eq!(m.grade(4).unwrap_err(), GaError::UnknownGrade(4));
        assert_eq!(m.grades(), vec![0, 1, 2, 3]);
        assert_eq!(m.modal_grade(1e-7), 1);
    }

    #[test]
    fn powers() {
        let layout = g3();
        let e12 = MultiVector::basis_blade(&layout, 4);
        assert!(e12.pow(2.0).unwrap() == -1.0);
        assert!(e12.pow(0.0).unwrap() == 1.0);
        assert!(e12.pow(4.0).unwrap() == 1.0);
        assert_eq!(e12.pow(1.5).unwrap_err(), GaError::InvalidExponent(1.5));
        assert_eq!(e12.pow(-2.0).unwrap_err(), GaError::InvalidExponent(-2.0));
    }

    #[test]
    fn exponential_of_bivector_is_a_rotor() {
        let layout = g3();
        let theta: Scalar = 0.3;
        let b = MultiVector::basis_blade(&layout, 4).scale(theta);
        let r = b.exp().unwrap();
        assert!((r.value()[0] - theta.cos()).abs() < 1e-10);
        assert!((r.value()[4] - theta.sin()).abs() < 1e-10);
        assert!((r.mag2() - 1.0).abs() < 1e-10);
        assert_eq!(b.rpow(0.0).unwrap_err(), GaError::NonPositiveBase(0.0));
    }

    #[test]
    fn series_cap_stops_iteration() {
        use crate::config::GaConfig;
        use crate::layout::Cl;
        let (layout, blades) = Cl::new(2, 0)
            .config(GaConfig::default().with_max_series_terms(2))
            .build()
            .unwrap();
        // two terms: 1 + e1, without the pending e1 e1 / 2
        let r = blades["e1"].exp().unwrap();
        assert_eq!(r.layout().ga_dims(), layout.ga_dims());
        assert!(r == 1.0 + &blades["e1"]);
        assert_eq!(r.scalar_part(), 1.0);
    }

    #[test]
    fn inverses() {
        let layout = g3();
        let m = mv(&layout, [2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let inv = m.left_la_inv().unwrap();
        assert!(m.geometric_product(&inv).unwrap() == 1.0);
        assert!(inv.geometric_product(&m).unwrap() == 1.0);
        assert!(m.normal_inv().unwrap() == inv);

        // (1 + e1)(1 - e1) = 0
        let singular = mv(&layout, [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(singular.left_la_inv().unwrap_err(), GaError::SingularMultivector);
        assert_eq!(singular.normal_inv().unwrap_err(), GaError::SingularMultivector);
    }

    #[test]
    fn determinant_threshold_is_absolute() {
        let (_, b) = cl(5, 0).unwrap();
        let small = b["e1"].scale(0.01);
        assert_eq!(small.inv().unwrap_err(), GaError::SingularMultivector);
        assert!(small.normal_inv().unwrap() == b["e1"].scale(100.0));
        // the rescaled element inverts fine
        assert!(small.scale(100.0).inv().unwrap() == b["e1"]);
    }

    #[test]
    fn dual_of_vector() {
        let layout = g3();
        let e1 = MultiVector::basis_blade(&layout, 1);
        // e1 * e123^-1 = e1 * -e123 = -e23
        let d = e1.dual(None).unwrap();
        assert!(d == MultiVector::basis_blade(&layout, 6).scale(-1.0));
    }

    #[test]
    fn commutators() {
        let layout = g3();
        let e1 = MultiVector::basis_blade(&layout, 1);
        let e2 = MultiVector::basis_blade(&layout, 2);
        assert_eq!(e1.commutator(&e2).unwrap().value()[4], 1.0);
        assert!(e1.anticommutator(&e2).unwrap().is_zero());
        assert!(e1.anticommutator(&e1).unwrap() == 1.0);
    }

    #[test]
    fn clean_round_and_scalar_coercion() {
        let layout = g3();
        let mut m = mv(&layout, [1.23456, 1e-14, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(!m.is_zero());
        assert!(m.is_scalar());
        assert!((m.to_scalar().unwrap() - 1.23456).abs() < 1e-12);
        m.clean(None);
        assert_eq!(m.value()[1], 0.0);
        m.round(2);
        assert!((m.value()[0] - 1.23).abs() < 1e-12);

        let v = MultiVector::basis_blade(&layout, 2);
        assert_eq!(v.to_scalar().unwrap_err(), GaError::NotAScalar);
    }

    #[test]
    fn blades_list_splits_terms() {
        let layout = g3();
        let m = mv(&layout, [1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, -3.0]);
        let parts = m.blades_list();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].value()[7], -3.0);
    }

    #[test]
    fn accumulate_in_place() {
        let layout = g3();
        let mut m = MultiVector::zero(&layout);
        m.accumulate(&MultiVector::basis_blade(&layout, 3)).unwrap();
        m.accumulate(2.5).unwrap();
        assert_eq!(m.value(), &[2.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
