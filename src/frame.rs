// src/frame.rs
//! Frames: ordered lists of vectors and their reciprocals.

use std::sync::Arc;

use crate::error::{GaError, Result};
use crate::layout::Layout;
use crate::multivector::MultiVector;
use crate::types::Scalar;

/// An ordered list of grade-1 vectors on one layout.
#[derive(Debug, Clone)]
pub struct Frame {
    vectors: Vec<MultiVector>,
}

impl Frame {
    /// Fails with [`GaError::NotAVector`] if any member (or the list itself)
    /// is not a nonempty set of vectors, and with [`GaError::LayoutMismatch`]
    /// if the vectors come from different layouts.
    pub fn new(vectors: Vec<MultiVector>) -> Result<Self> {
        let first = vectors.first().ok_or(GaError::NotAVector)?;
        for v in &vectors {
            first.check_layout(v)?;
            if v.grades() != [1] {
                return Err(GaError::NotAVector);
            }
        }
        Ok(Self { vectors })
    }

    pub fn vectors(&self) -> &[MultiVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn layout(&self) -> &Arc<Layout> {
        self.vectors[0].layout()
    }

    /// Volume element `En = v1 ^ v2 ^ ... ^ vn`.
    pub fn en(&self) -> MultiVector {
        Self::wedge(self.vectors.iter(), self.layout())
    }

    fn wedge<'a>(vectors: impl Iterator<Item = &'a MultiVector>, layout: &Arc<Layout>) -> MultiVector {
        vectors.fold(layout.scalar_one(), |acc, v| &acc ^ v)
    }

    /// The reciprocal frame `v^k = (-1)^k (v1 ^ .. v̂k .. ^ vn) En⁻¹`,
    /// satisfying `v^k · v_j = δ_kj`.
    pub fn inverse(&self) -> Result<Frame> {
        let en_inv = self.en().inv()?;
        let vectors = (0..self.len())
            .map(|k| {
                let rest = self
                    .vectors
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != k)
                    .map(|(_, v)| v);
                let sign: Scalar = if k % 2 == 0 { 1.0 } else { -1.0 };
                Self::wedge(rest, self.layout())
                    .geometric_product(&en_inv)?
                    .scale(sign)
                    .grade(1)
            })
            .collect::<Result<Vec<_>>>()?;
        Frame::new(vectors)
    }

    /// Whether corresponding vectors of the two frames have the same inner
    /// products, i.e. the frames differ by an orthogonal transform.
    ///
    /// Frames of different length are never innermorphic. Frames on
    /// different layouts are compared by value, so the layouts must have the
    /// same blade order.
    pub fn is_innermorphic_to(&self, other: &Frame, eps: Option<Scalar>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let eps = eps.unwrap_or_else(|| self.layout().config().eps);
        let n = self.len();
        (0..n).all(|m| {
            (m..n).all(|k| {
                let a = self.inner(m, k);
                let b = other.inner(m, k);
                (a - b).abs() < eps
            })
        })
    }

    /// `v_m · v_k` through the layout's vector-vector kernel.
    fn inner(&self, m: usize, k: usize) -> Scalar {
        let layout = self.layout();
        let out = layout
            .vector_inner_kernel()
            .evaluate(self.vectors[m].value(), self.vectors[k].value());
        out[layout.scalar_index()]
    }
}
