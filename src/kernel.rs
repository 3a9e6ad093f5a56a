// src/kernel.rs
//! Bilinear product kernels compiled from sparse tables.
//!
//! A kernel flattens a table into parallel index/coefficient arrays once and
//! then runs a single tight loop per product.

use crate::error::{GaError, Result};
use crate::table::{SparseTable, TableEntry};
use crate::types::Scalar;

/// How a kernel's entry list was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelMode {
    /// Every table entry; zero operands are skipped while evaluating.
    Unrestricted,
    /// Entries whose operand grades lie in declared grade sets.
    GradeRestricted,
    /// Entries picked by an explicit mask.
    Masked,
}

/// `output[result] += value[left] * coefficient * other[right]` over a fixed entry list.
#[derive(Debug, Clone)]
pub struct ProductKernel {
    ga_dims: usize,
    mode: KernelMode,
    left: Vec<usize>,
    result: Vec<usize>,
    right: Vec<usize>,
    coefficients: Vec<Scalar>,
}

impl ProductKernel {
    fn from_entries<'a, I>(ga_dims: usize, mode: KernelMode, entries: I) -> Self
    where
        I: Iterator<Item = &'a TableEntry>,
    {
        let (lower, _) = entries.size_hint();
        let mut kernel = Self {
            ga_dims,
            mode,
            left: Vec::with_capacity(lower),
            result: Vec::with_capacity(lower),
            right: Vec::with_capacity(lower),
            coefficients: Vec::with_capacity(lower),
        };
        for e in entries {
            kernel.left.push(e.left);
            kernel.result.push(e.result);
            kernel.right.push(e.right);
            kernel.coefficients.push(e.coefficient as Scalar);
        }
        kernel
    }

    /// Kernel over every entry of `table`.
    pub fn unrestricted(table: &SparseTable, ga_dims: usize) -> Self {
        Self::from_entries(ga_dims, KernelMode::Unrestricted, table.iter())
    }

    /// Kernel over the entries whose left operand has a grade in `left_grades`
    /// and right operand a grade in `right_grades`.
    ///
    /// `grades[i]` is the grade of blade position `i`.
    pub fn grade_restricted(
        table: &SparseTable,
        ga_dims: usize,
        grades: &[usize],
        left_grades: &[usize],
        right_grades: &[usize],
    ) -> Self {
        let restricted = table.restrict_grades(grades, left_grades, right_grades);
        Self::from_entries(ga_dims, KernelMode::GradeRestricted, restricted.iter())
    }

    /// Kernel over the entries `i` of `table` with `mask[i]` set.
    pub fn masked(table: &SparseTable, ga_dims: usize, mask: &[bool]) -> Result<Self> {
        if mask.len() != table.len() {
            return Err(GaError::MaskLength {
                expected: table.len(),
                actual: mask.len(),
            });
        }
        let entries = table.iter().zip(mask).filter(|(_, keep)| **keep).map(|(e, _)| e);
        Ok(Self::from_entries(ga_dims, KernelMode::Masked, entries))
    }

    pub fn mode(&self) -> KernelMode {
        self.mode
    }

    /// Number of entries the kernel loops over.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn ga_dims(&self) -> usize {
        self.ga_dims
    }

    /// Evaluate the product into a fresh coefficient vector.
    pub fn evaluate(&self, value: &[Scalar], other: &[Scalar]) -> Vec<Scalar> {
        let mut output = vec![0.0; self.ga_dims];
        self.evaluate_into(value, other, &mut output);
        output
    }

    /// Evaluate the product into `output`, which is zeroed first.
    ///
    /// Entries are visited in table order, so rounding is reproducible.
    #[inline]
    pub fn evaluate_into(&self, value: &[Scalar], other: &[Scalar], output: &mut [Scalar]) {
        debug_assert_eq!(value.len(), self.ga_dims);
        debug_assert_eq!(other.len(), self.ga_dims);
        debug_assert_eq!(output.len(), self.ga_dims);

        output.iter_mut().for_each(|x| *x = 0.0);

        match self.mode {
            KernelMode::Unrestricted => {
                for ind in 0..self.coefficients.len() {
                    let v = value[self.left[ind]];
                    if v != 0.0 {
                        let ov = other[self.right[ind]];
                        if ov != 0.0 {
                            output[self.result[ind]] += v * self.coefficients[ind] * ov;
                        }
                    }
                }
            }
            KernelMode::GradeRestricted | KernelMode::Masked => {
                for ind in 0..self.coefficients.len() {
                    output[self.result[ind]] +=
                        value[self.left[ind]] * self.coefficients[ind] * other[self.right[ind]];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blade::BladeIndexer;
    use crate::table::MultiplicationTables;

    fn setup() -> (BladeIndexer, MultiplicationTables) {
        let indexer = BladeIndexer::canonical(3, 1);
        let tables = MultiplicationTables::build(&indexer, &[1, 1, 1]);
        (indexer, tables)
    }

    #[test]
    fn vector_product_3d() {
        let (_, tables) = setup();
        let gp = ProductKernel::unrestricted(&tables.gmt, 8);
        // (e1 + 2 e2) * (3 e1 + 4 e2) = 11 + (4 - 6) e12
        let a = [0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = [0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let out = gp.evaluate(&a, &b);
        assert_eq!(out, vec![11.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn restricted_kernels_agree_on_their_blocks() {
        let (indexer, tables) = setup();
        let full = ProductKernel::unrestricted(&tables.gmt, 8);
        let vv = ProductKernel::grade_restricted(&tables.gmt, 8, indexer.grades(), &[1], &[1]);
        assert_eq!(vv.mode(), KernelMode::GradeRestricted);
        assert_eq!(vv.len(), 9);

        let a = [0.0, 1.5, -2.0, 0.5, 0.0, 0.0, 0.0, 0.0];
        let b = [0.0, 0.25, 3.0, -1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(vv.evaluate(&a, &b), full.evaluate(&a, &b));
    }

    #[test]
    fn grade_restriction_ignores_other_grades() {
        let (indexer, tables) = setup();
        let vv = ProductKernel::grade_restricted(&tables.gmt, 8, indexer.grades(), &[1], &[1]);
        // scalar parts are outside the declared blocks
        let a = [5.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = [7.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(vv.evaluate(&a, &b)[0], 1.0);
    }

    #[test]
    fn masked_kernel() {
        let (_, tables) = setup();
        // keep only scalar * anything
        let mask: Vec<bool> = tables.gmt.iter().map(|e| e.left == 0).collect();
        let k = ProductKernel::masked(&tables.gmt, 8, &mask).unwrap();
        assert_eq!(k.mode(), KernelMode::Masked);
        assert_eq!(k.len(), 8);
        let a = [2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(k.evaluate(&a, &b), vec![0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        assert_eq!(
            ProductKernel::masked(&tables.gmt, 8, &[true]).unwrap_err(),
            GaError::MaskLength { expected: 64, actual: 1 }
        );
    }

    #[test]
    fn evaluate_into_overwrites_output() {
        let (_, tables) = setup();
        let gp = ProductKernel::unrestricted(&tables.gmt, 8);
        let one = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut out = vec![9.0; 8];
        gp.evaluate_into(&one, &one, &mut out);
        assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
