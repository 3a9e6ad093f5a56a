// src/blade_map.rs
//! Linear maps between two algebras given blade by blade.
//!
//! The classic use is the space-time split, pairing the Dirac bivectors
//! `d01, d02, d03` with the Pauli vectors `p1, p2, p3`.

use std::sync::Arc;

use crate::error::{GaError, Result};
use crate::layout::Layout;
use crate::multivector::MultiVector;
use crate::types::Scalar;

/// Pairs of blades `(a, b)` with every `a` on one layout and every `b` on
/// another. Mapping works in both directions.
#[derive(Debug, Clone)]
pub struct BladeMap {
    pairs: Vec<(MultiVector, MultiVector)>,
    left: Arc<Layout>,
    right: Arc<Layout>,
}

impl BladeMap {
    /// Build a map from blade pairs. With `map_scalars`, `1 ↦ 1` is added in
    /// front of the given pairs.
    pub fn new(pairs: Vec<(MultiVector, MultiVector)>, map_scalars: bool) -> Result<Self> {
        let (a, b) = pairs
            .first()
            .ok_or_else(|| GaError::InvalidLayout("blade map needs at least one pair".to_string()))?;
        let left = Arc::clone(a.layout());
        let right = Arc::clone(b.layout());

        for (a, b) in &pairs {
            if !Arc::ptr_eq(a.layout(), &left) || !Arc::ptr_eq(b.layout(), &right) {
                return Err(GaError::LayoutMismatch);
            }
        }

        let mut all = Vec::with_capacity(pairs.len() + 1);
        if map_scalars {
            all.push((left.scalar_one(), right.scalar_one()));
        }
        all.extend(pairs);

        tracing::debug!(pairs = all.len(), "blade map");
        Ok(Self {
            pairs: all,
            left,
            right,
        })
    }

    pub fn pairs(&self) -> &[(MultiVector, MultiVector)] {
        &self.pairs
    }

    pub fn left_layout(&self) -> &Arc<Layout> {
        &self.left
    }

    pub fn right_layout(&self) -> &Arc<Layout> {
        &self.right
    }

    /// Map `m` to the other layout: each pair contributes
    /// `(m · from) * to`, the dot taken over raw coefficients.
    ///
    /// The direction is picked from `m`'s layout, left to right first.
    pub fn map(&self, m: &MultiVector) -> Result<MultiVector> {
        let left_to_right = if Arc::ptr_eq(m.layout(), &self.left) {
            true
        } else if Arc::ptr_eq(m.layout(), &self.right) {
            false
        } else {
            return Err(GaError::LayoutMismatch);
        };

        let target = if left_to_right { &self.right } else { &self.left };
        let mut out = MultiVector::zero(target);
        for (a, b) in &self.pairs {
            let (from, to) = if left_to_right { (a, b) } else { (b, a) };
            let weight: Scalar = m.value().iter().zip(from.value()).map(|(x, y)| x * y).sum();
            out.accumulate(&to.scale(weight))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BladeNames, Cl};
    use std::collections::BTreeMap;

    type Blades = BTreeMap<String, MultiVector>;

    fn sta_split() -> (BladeMap, Blades, Blades) {
        let (_, d) = Cl::new(1, 3)
            .first_index(0)
            .names(BladeNames::Prefix("d".into()))
            .build()
            .unwrap();
        let (_, p) = Cl::new(3, 0).names(BladeNames::Prefix("p".into())).build().unwrap();
        let pairs = [
            ("d01", "p1"),
            ("d02", "p2"),
            ("d03", "p3"),
            ("d12", "p12"),
            ("d23", "p23"),
            ("d13", "p13"),
        ]
        .iter()
        .map(|(x, y)| (d[*x].clone(), p[*y].clone()))
        .collect();
        (BladeMap::new(pairs, true).unwrap(), d, p)
    }

    #[test]
    fn maps_both_ways() {
        let (map, d, p) = sta_split();
        let m = 2.0 + &d["d01"] - &d["d23"].scale(3.0);
        let mapped = map.map(&m).unwrap();
        assert!(mapped == 2.0 + &p["p1"] - &p["p23"].scale(3.0));
        assert!(map.map(&mapped).unwrap() == m);
    }

    #[test]
    fn unmapped_blades_vanish() {
        let (map, d, _) = sta_split();
        assert!(map.map(&d["d0123"]).unwrap().is_zero());
    }

    #[test]
    fn foreign_layout_fails() {
        let (map, _, _) = sta_split();
        let (_, other) = Cl::new(3, 0).build().unwrap();
        assert_eq!(map.map(&other["e1"]).unwrap_err(), GaError::LayoutMismatch);
        assert!(matches!(BladeMap::new(vec![], true), Err(GaError::InvalidLayout(_))));
    }
}
