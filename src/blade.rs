// src/blade.rs
//! Blade representations and the tuple ↔ bitmap ↔ position bijection.
//!
//! A blade is written either as a tuple of basis-vector indices, e.g. `(1, 3)`,
//! or as a bitmap with bit `b - first_index` set for each index `b`. The
//! layout's blade list fixes a third form: the blade's position in the
//! coefficient vector.

use std::collections::HashMap;

use crate::error::{GaError, Result};
use crate::sign::reordering_sign;
use crate::types::BladeIndex;

/// Bitmap of a duplicate-free blade tuple.
#[inline]
pub fn to_bitmap(blade: &[BladeIndex], first_index: BladeIndex) -> usize {
    blade
        .iter()
        .fold(0usize, |bitmap, &b| bitmap ^ (1 << (b - first_index)))
}

/// Ascending blade tuple of a bitmap.
pub fn to_tuple(bitmap: usize, first_index: BladeIndex) -> Vec<BladeIndex> {
    let mut blade = Vec::with_capacity(bitmap.count_ones() as usize);
    let mut bmp = bitmap;
    let mut n = first_index;
    while bmp > 0 {
        if bmp & 1 != 0 {
            blade.push(n);
        }
        bmp >>= 1;
        n += 1;
    }
    blade
}

/// All `2^dims` blades ordered by grade, then lexicographically.
///
/// For `dims = 3, first_index = 1`: `(), (1), (2), (3), (1,2), (1,3), (2,3), (1,2,3)`.
pub fn canonical_blades(dims: usize, first_index: BladeIndex) -> Vec<Vec<BladeIndex>> {
    let mut blades = Vec::with_capacity(1 << dims);
    for grade in 0..=dims {
        // positions of the chosen vectors, advanced like an odometer
        let mut picks: Vec<usize> = (0..grade).collect();
        loop {
            blades.push(
                picks
                    .iter()
                    .map(|&p| first_index + p as BladeIndex)
                    .collect(),
            );
            let Some(slot) = (0..grade).rev().find(|&s| picks[s] < dims - grade + s) else {
                break;
            };
            picks[slot] += 1;
            for s in slot + 1..grade {
                picks[s] = picks[s - 1] + 1;
            }
        }
    }
    blades
}

/// Validated blade list with constant-time lookups in every direction.
#[derive(Debug, Clone)]
pub struct BladeIndexer {
    dims: usize,
    first_index: BladeIndex,
    blades: Vec<Vec<BladeIndex>>,
    grades: Vec<usize>,
    bitmaps: Vec<usize>,
    /// position of each bitmap in the blade list
    positions: Vec<usize>,
    tuple_map: HashMap<Vec<BladeIndex>, usize>,
}

impl BladeIndexer {
    /// Check `blades` against a `dims`-dimensional vector space and index it.
    ///
    /// Fails with [`GaError::InvalidLayout`] on a wrong blade count, a
    /// duplicate blade, an index outside `first_index..first_index + dims`,
    /// or a tuple that is not strictly ascending.
    pub fn new(dims: usize, first_index: BladeIndex, blades: Vec<Vec<BladeIndex>>) -> Result<Self> {
        let ga_dims = 1usize << dims;
        if blades.len() != ga_dims {
            return Err(GaError::InvalidLayout(format!(
                "incorrect number of blades: expected {ga_dims}, got {}",
                blades.len()
            )));
        }

        let last = first_index + dims as BladeIndex;
        let mut tuple_map = HashMap::with_capacity(ga_dims);
        let mut bitmaps = Vec::with_capacity(ga_dims);
        let mut positions = vec![usize::MAX; ga_dims];

        for (i, blade) in blades.iter().enumerate() {
            if let Some(&idx) = blade.iter().find(|&&b| b < first_index || b >= last) {
                return Err(GaError::InvalidLayout(format!(
                    "blade {blade:?} has index {idx} outside {first_index}..{last}"
                )));
            }
            if blade.windows(2).any(|w| w[0] >= w[1]) {
                return Err(GaError::InvalidLayout(format!(
                    "blade {blade:?} must list distinct indices in ascending order"
                )));
            }
            if tuple_map.insert(blade.clone(), i).is_some() {
                return Err(GaError::InvalidLayout(format!("blade {blade:?} is not unique")));
            }
            let bitmap = to_bitmap(blade, first_index);
            positions[bitmap] = i;
            bitmaps.push(bitmap);
        }

        let grades = blades.iter().map(Vec::len).collect();

        Ok(Self {
            dims,
            first_index,
            blades,
            grades,
            bitmaps,
            positions,
            tuple_map,
        })
    }

    /// Canonically enumerated indexer, see [`canonical_blades`].
    pub fn canonical(dims: usize, first_index: BladeIndex) -> Self {
        let blades = canonical_blades(dims, first_index);
        let grades = blades.iter().map(Vec::len).collect();
        let bitmaps: Vec<usize> = blades.iter().map(|b| to_bitmap(b, first_index)).collect();
        let mut positions = vec![0; bitmaps.len()];
        for (i, &bitmap) in bitmaps.iter().enumerate() {
            positions[bitmap] = i;
        }
        let tuple_map = blades
            .iter()
            .enumerate()
            .map(|(i, b)| (b.clone(), i))
            .collect();
        Self {
            dims,
            first_index,
            blades,
            grades,
            bitmaps,
            positions,
            tuple_map,
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn first_index(&self) -> BladeIndex {
        self.first_index
    }

    /// Number of blades, `2^dims`.
    pub fn len(&self) -> usize {
        self.blades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blades.is_empty()
    }

    pub fn blades(&self) -> &[Vec<BladeIndex>] {
        &self.blades
    }

    pub fn blade(&self, index: usize) -> &[BladeIndex] {
        &self.blades[index]
    }

    pub fn grades(&self) -> &[usize] {
        &self.grades
    }

    pub fn grade(&self, index: usize) -> usize {
        self.grades[index]
    }

    pub fn bitmap(&self, index: usize) -> usize {
        self.bitmaps[index]
    }

    /// Position of the blade with this bitmap.
    #[inline(always)]
    pub fn index_of_bitmap(&self, bitmap: usize) -> usize {
        self.positions[bitmap]
    }

    /// Position of a canonical (ascending) blade tuple.
    pub fn index_of(&self, blade: &[BladeIndex]) -> Result<usize> {
        self.tuple_map
            .get(blade)
            .copied()
            .ok_or_else(|| GaError::UnknownBlade(blade.to_vec()))
    }

    /// Reorder an arbitrary index tuple into canonical form.
    ///
    /// Returns the sign picked up on the way and the position of the
    /// resulting blade. Repeated indices contract against `signature`, so
    /// `(2, 1, 2)` is `-signature[2] · (1)`.
    pub fn canonical_form(&self, blade: &[BladeIndex], signature: &[i8]) -> Result<(i8, usize)> {
        let last = self.first_index + self.dims as BladeIndex;
        let mut sign = 1i8;
        let mut bitmap = 0usize;
        for &b in blade {
            if b < self.first_index || b >= last {
                return Err(GaError::UnknownBlade(blade.to_vec()));
            }
            let bit = 1 << (b - self.first_index);
            sign *= reordering_sign(bitmap, bit, signature);
            bitmap ^= bit;
        }
        Ok((sign, self.index_of_bitmap(bitmap)))
    }
}
