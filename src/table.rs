// src/table.rs
//! Sparse multiplication tables for the four products.
//!
//! Every ordered blade pair `(i, j)` multiplies to `sign · blade[k]` with
//! `k` fixed by the XOR of the two bitmaps. The geometric table keeps all
//! of them; the inner, outer and left-contraction tables keep the entries
//! whose grades satisfy the product's grade rule.

use crate::blade::BladeIndexer;
use crate::sign::reordering_sign;

/// Which bilinear product a table or kernel implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Geometric,
    Inner,
    Outer,
    LeftContraction,
}

impl ProductKind {
    pub const ALL: [ProductKind; 4] = [
        ProductKind::Geometric,
        ProductKind::Inner,
        ProductKind::Outer,
        ProductKind::LeftContraction,
    ];

    /// Whether `blade(r) ∘ blade(s)` may land in grade `t` for this product.
    #[inline]
    pub fn keeps(self, r: usize, t: usize, s: usize) -> bool {
        match self {
            ProductKind::Geometric => true,
            // A_r · B_s = <A_r B_s>_|r-s|, zero when either side is a scalar
            ProductKind::Inner => r != 0 && s != 0 && t == r.abs_diff(s),
            // A_r ^ B_s = <A_r B_s>_(r+s)
            ProductKind::Outer => t == r + s,
            // A_r _| B_s = <A_r B_s>_(s-r), only for s >= r
            ProductKind::LeftContraction => s >= r && t == s - r,
        }
    }
}

/// One nonzero table entry: `blade[left] * blade[right] = coefficient · blade[result]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub left: usize,
    pub result: usize,
    pub right: usize,
    pub coefficient: i8,
}

/// Nonzero entries of one product, sorted by `(left, right)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseTable {
    entries: Vec<TableEntry>,
}

impl SparseTable {
    fn push(&mut self, entry: TableEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coefficient stored at `(left, result, right)`, if any.
    pub fn get(&self, left: usize, result: usize, right: usize) -> Option<i8> {
        self.entries
            .binary_search_by(|e| (e.left, e.right).cmp(&(left, right)))
            .ok()
            .map(|pos| self.entries[pos])
            .filter(|e| e.result == result)
            .map(|e| e.coefficient)
    }

    /// Drop the blocks that are zero a priori for the given operand grades.
    pub fn restrict_grades(&self, grades: &[usize], left_grades: &[usize], right_grades: &[usize]) -> SparseTable {
        let entries = self
            .entries
            .iter()
            .filter(|e| left_grades.contains(&grades[e.left]) && right_grades.contains(&grades[e.right]))
            .copied()
            .collect();
        SparseTable { entries }
    }
}

impl<'a> IntoIterator for &'a SparseTable {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The four tables of an algebra.
#[derive(Debug, Clone, Default)]
pub struct MultiplicationTables {
    pub gmt: SparseTable,
    pub imt: SparseTable,
    pub omt: SparseTable,
    pub lcmt: SparseTable,
}

impl MultiplicationTables {
    /// Walk every blade pair once and classify the product.
    pub fn build(indexer: &BladeIndexer, signature: &[i8]) -> Self {
        let ga_dims = indexer.len();
        let mut tables = MultiplicationTables::default();

        for i in 0..ga_dims {
            let bitmap_i = indexer.bitmap(i);
            let r = indexer.grade(i);
            for j in 0..ga_dims {
                let bitmap_j = indexer.bitmap(j);
                let s = indexer.grade(j);

                let coefficient = reordering_sign(bitmap_i, bitmap_j, signature);
                let result = indexer.index_of_bitmap(bitmap_i ^ bitmap_j);
                let t = indexer.grade(result);
                let entry = TableEntry {
                    left: i,
                    result,
                    right: j,
                    coefficient,
                };

                tables.gmt.push(entry);
                if ProductKind::Inner.keeps(r, t, s) {
                    tables.imt.push(entry);
                }
                if ProductKind::Outer.keeps(r, t, s) {
                    tables.omt.push(entry);
                }
                if ProductKind::LeftContraction.keeps(r, t, s) {
                    tables.lcmt.push(entry);
                }
            }
        }
        tables
    }

    pub fn get(&self, kind: ProductKind) -> &SparseTable {
        match kind {
            ProductKind::Geometric => &self.gmt,
            ProductKind::Inner => &self.imt,
            ProductKind::Outer => &self.omt,
            ProductKind::LeftContraction => &self.lcmt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables_3d() -> (BladeIndexer, MultiplicationTables) {
        let indexer = BladeIndexer::canonical(3, 1);
        let tables = MultiplicationTables::build(&indexer, &[1, 1, 1]);
        (indexer, tables)
    }

    #[test]
    fn geometric_table_is_dense() {
        let (indexer, tables) = tables_3d();
        assert_eq!(tables.gmt.len(), indexer.len() * indexer.len());
    }

    #[test]
    fn known_entries_3d() {
        let (_, tables) = tables_3d();
        // blades: 0:1 1:e1 2:e2 3:e3 4:e12 5:e13 6:e23 7:e123
        assert_eq!(tables.gmt.get(1, 0, 1), Some(1));
        assert_eq!(tables.gmt.get(1, 4, 2), Some(1));
        assert_eq!(tables.gmt.get(2, 4, 1), Some(-1));
        assert_eq!(tables.gmt.get(4, 0, 4), Some(-1));
        assert_eq!(tables.gmt.get(7, 0, 7), Some(-1));
        // wrong result blade for the pair
        assert_eq!(tables.gmt.get(1, 3, 2), None);
    }

    #[test]
    fn classification_by_grade() {
        let (indexer, tables) = tables_3d();
        for e in tables.imt.iter() {
            let (r, t, s) = (indexer.grade(e.left), indexer.grade(e.result), indexer.grade(e.right));
            assert!(r != 0 && s != 0);
            assert_eq!(t, r.abs_diff(s));
        }
        for e in &tables.omt {
            assert_eq!(indexer.grade(e.result), indexer.grade(e.left) + indexer.grade(e.right));
        }
        for e in &tables.lcmt {
            assert!(indexer.grade(e.right) >= indexer.grade(e.left));
        }
        // e1 ^ e1 vanishes, e1 ^ e2 survives
        assert_eq!(tables.omt.get(1, 0, 1), None);
        assert_eq!(tables.omt.get(1, 4, 2), Some(1));
        // scalars never enter the inner product
        assert_eq!(tables.imt.get(0, 1, 1), None);
        // e1 _| e12 = e2, e12 _| e1 = 0
        assert_eq!(tables.lcmt.get(1, 2, 4), Some(1));
        assert_eq!(tables.lcmt.get(4, 2, 1), None);
    }

    #[test]
    fn minkowski_signs() {
        let indexer = BladeIndexer::canonical(2, 0);
        let tables = MultiplicationTables::build(&indexer, &[1, -1]);
        assert_eq!(tables.gmt.get(1, 0, 1), Some(1));
        assert_eq!(tables.gmt.get(2, 0, 2), Some(-1));
        // e01 e01 = -e0 e0 e1 e1 = +1
        assert_eq!(tables.gmt.get(3, 0, 3), Some(1));
    }

    #[test]
    fn restrict_grades_keeps_only_requested_blocks() {
        let (indexer, tables) = tables_3d();
        let vv = tables.gmt.restrict_grades(indexer.grades(), &[1], &[1]);
        assert_eq!(vv.len(), 9);
        assert!(vv.iter().all(|e| indexer.grade(e.left) == 1 && indexer.grade(e.right) == 1));
        assert_eq!(vv.get(2, 4, 1), Some(-1));
    }
}
