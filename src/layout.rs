// src/layout.rs
//! The algebra description: signature, blade enumeration, tables and kernels.
//!
//! A [`Layout`] is built once, eagerly, in `O(4^dims)` time and is immutable
//! afterwards. Multivectors hold it behind an [`Arc`], so one layout can be
//! shared read-only across threads.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::blade::{canonical_blades, BladeIndexer};
use crate::config::GaConfig;
use crate::error::{GaError, Result};
use crate::kernel::ProductKernel;
use crate::multivector::MultiVector;
use crate::table::{MultiplicationTables, ProductKind, SparseTable};
use crate::types::{BladeIndex, Scalar};

/// Display names for the blades of a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BladeNames {
    /// `e` followed by the blade's indices, e.g. `e12`.
    #[default]
    Default,
    /// A custom prefix in place of `e`, e.g. `d01`.
    Prefix(String),
    /// One name per blade, in blade-list order.
    Explicit(Vec<String>),
}

impl BladeNames {
    fn resolve(self, blades: &[Vec<BladeIndex>]) -> Result<Vec<String>> {
        let prefix = match self {
            BladeNames::Explicit(names) => {
                if names.len() != blades.len() {
                    return Err(GaError::InvalidLayout(format!(
                        "names list of length {} needs to be of length {}",
                        names.len(),
                        blades.len()
                    )));
                }
                return Ok(names);
            }
            BladeNames::Prefix(prefix) => prefix,
            BladeNames::Default => "e".to_string(),
        };
        Ok(blades
            .iter()
            .map(|blade| {
                if blade.is_empty() {
                    String::new()
                } else {
                    let digits: String = blade.iter().map(|b| b.to_string()).collect();
                    format!("{prefix}{digits}")
                }
            })
            .collect())
    }
}

/// A geometric algebra over a diagonal ±1 metric.
pub struct Layout {
    dims: usize,
    signature: Vec<i8>,
    indexer: BladeIndexer,
    names: Vec<String>,
    name_index: HashMap<String, usize>,
    tables: MultiplicationTables,
    gmt_kernel: ProductKernel,
    imt_kernel: ProductKernel,
    omt_kernel: ProductKernel,
    lcmt_kernel: ProductKernel,
    vector_inner_kernel: ProductKernel,
    reversion_signs: Vec<Scalar>,
    involution_signs: Vec<Scalar>,
    scalar_index: usize,
    config: GaConfig,
}

impl Layout {
    /// Build a layout with the default [`GaConfig`].
    ///
    /// `signature` gives the square of each basis vector; only its sign
    /// matters and zero entries are rejected. `blades` fixes the coefficient
    /// order and must hold all `2^dims` ascending index tuples.
    pub fn new(
        signature: &[i8],
        blades: Vec<Vec<BladeIndex>>,
        first_index: BladeIndex,
        names: BladeNames,
    ) -> Result<Arc<Layout>> {
        Self::with_config(signature, blades, first_index, names, GaConfig::default())
    }

    /// Build a layout carrying `config`.
    pub fn with_config(
        signature: &[i8],
        blades: Vec<Vec<BladeIndex>>,
        first_index: BladeIndex,
        names: BladeNames,
        config: GaConfig,
    ) -> Result<Arc<Layout>> {
        let dims = signature.len();
        if dims >= usize::BITS as usize - 1 {
            return Err(GaError::InvalidLayout(format!("{dims} dimensions do not fit a blade bitmap")));
        }
        if let Some(pos) = signature.iter().position(|&s| s == 0) {
            return Err(GaError::InvalidLayout(format!(
                "degenerate signature entry at position {pos}"
            )));
        }
        let signature: Vec<i8> = signature.iter().map(|s| s.signum()).collect();

        let indexer = BladeIndexer::new(dims, first_index, blades)?;
        let names = names.resolve(indexer.blades())?;
        Ok(Arc::new(Self::assemble(dims, signature, indexer, names, config)))
    }

    fn assemble(
        dims: usize,
        signature: Vec<i8>,
        indexer: BladeIndexer,
        names: Vec<String>,
        config: GaConfig,
    ) -> Layout {
        let ga_dims = indexer.len();
        let tables = MultiplicationTables::build(&indexer, &signature);

        let gmt_kernel = ProductKernel::unrestricted(&tables.gmt, ga_dims);
        let imt_kernel = ProductKernel::unrestricted(&tables.imt, ga_dims);
        let omt_kernel = ProductKernel::unrestricted(&tables.omt, ga_dims);
        let lcmt_kernel = ProductKernel::unrestricted(&tables.lcmt, ga_dims);
        let vector_inner_kernel =
            ProductKernel::grade_restricted(&tables.imt, ga_dims, indexer.grades(), &[1], &[1]);

        let reversion_signs = indexer
            .grades()
            .iter()
            .map(|&g| if (g * g.saturating_sub(1) / 2) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let involution_signs = indexer
            .grades()
            .iter()
            .map(|&g| if g % 2 == 0 { 1.0 } else { -1.0 })
            .collect();

        let mut name_index = HashMap::with_capacity(ga_dims);
        for (i, name) in names.iter().enumerate() {
            name_index.entry(name.clone()).or_insert(i);
        }
        let scalar_index = indexer.index_of_bitmap(0);

        tracing::debug!(
            dims,
            ga_dims,
            gmt = tables.gmt.len(),
            imt = tables.imt.len(),
            omt = tables.omt.len(),
            lcmt = tables.lcmt.len(),
            "built layout"
        );

        Layout {
            dims,
            signature,
            indexer,
            names,
            name_index,
            tables,
            gmt_kernel,
            imt_kernel,
            omt_kernel,
            lcmt_kernel,
            vector_inner_kernel,
            reversion_signs,
            involution_signs,
            scalar_index,
            config,
        }
    }

    /// Number of basis vectors.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of blades, `2^dims`.
    pub fn ga_dims(&self) -> usize {
        self.indexer.len()
    }

    pub fn signature(&self) -> &[i8] {
        &self.signature
    }

    pub fn first_index(&self) -> BladeIndex {
        self.indexer.first_index()
    }

    pub fn blades(&self) -> &[Vec<BladeIndex>] {
        self.indexer.blades()
    }

    pub fn grades(&self) -> &[usize] {
        self.indexer.grades()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn indexer(&self) -> &BladeIndexer {
        &self.indexer
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Position of the scalar blade `()`.
    pub fn scalar_index(&self) -> usize {
        self.scalar_index
    }

    /// Position of a canonical blade tuple.
    pub fn blade_index(&self, blade: &[BladeIndex]) -> Result<usize> {
        self.indexer.index_of(blade)
    }

    /// Position of the blade called `name`.
    pub fn name_index(&self, name: &str) -> Result<usize> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| GaError::UnknownBladeName(name.to_string()))
    }

    /// Whether some blade has grade `grade`.
    pub fn has_grade(&self, grade: usize) -> bool {
        grade <= self.dims
    }

    pub fn table(&self, kind: ProductKind) -> &SparseTable {
        self.tables.get(kind)
    }

    pub fn tables(&self) -> &MultiplicationTables {
        &self.tables
    }

    /// The compiled kernel of a product.
    pub fn kernel(&self, kind: ProductKind) -> &ProductKernel {
        match kind {
            ProductKind::Geometric => &self.gmt_kernel,
            ProductKind::Inner => &self.imt_kernel,
            ProductKind::Outer => &self.omt_kernel,
            ProductKind::LeftContraction => &self.lcmt_kernel,
        }
    }

    /// Inner product of two grade-1 coefficient vectors.
    pub fn vector_inner_kernel(&self) -> &ProductKernel {
        &self.vector_inner_kernel
    }

    /// A kernel for `kind` limited to operand grades known in advance.
    pub fn grade_restricted_kernel(
        &self,
        kind: ProductKind,
        left_grades: &[usize],
        right_grades: &[usize],
    ) -> ProductKernel {
        ProductKernel::grade_restricted(self.table(kind), self.ga_dims(), self.grades(), left_grades, right_grades)
    }

    /// A kernel for `kind` over the table entries selected by `mask`.
    pub fn masked_kernel(&self, kind: ProductKind, mask: &[bool]) -> Result<ProductKernel> {
        ProductKernel::masked(self.table(kind), self.ga_dims(), mask)
    }

    /// `(-1)^(g(g-1)/2)` per blade position.
    pub fn reversion_signs(&self) -> &[Scalar] {
        &self.reversion_signs
    }

    /// `(-1)^g` per blade position.
    pub fn involution_signs(&self) -> &[Scalar] {
        &self.involution_signs
    }

    /// The multivector `1`.
    pub fn scalar_one(self: &Arc<Self>) -> MultiVector {
        MultiVector::scalar(self, 1.0)
    }

    /// The unit pseudoscalar, the single blade of grade `dims`.
    pub fn pseudoscalar(self: &Arc<Self>) -> MultiVector {
        let top = self.indexer.index_of_bitmap((1 << self.dims) - 1);
        MultiVector::basis_blade(self, top)
    }

    /// Unit blades of every nonzero grade (or only `grades`), keyed by name.
    pub fn bases(self: &Arc<Self>, grades: Option<&[usize]>) -> BTreeMap<String, MultiVector> {
        (0..self.ga_dims())
            .filter(|&i| {
                let g = self.grades()[i];
                g != 0 && grades.map_or(true, |gs| gs.contains(&g))
            })
            .map(|i| (self.names[i].clone(), MultiVector::basis_blade(self, i)))
            .collect()
    }

    /// Grade-1 basis vectors in blade-list order.
    pub fn basis_vectors(self: &Arc<Self>) -> Vec<MultiVector> {
        self.blades_of_grade(1)
    }

    /// Unit blades of one grade in blade-list order.
    pub fn blades_of_grade(self: &Arc<Self>, grade: usize) -> Vec<MultiVector> {
        (0..self.ga_dims())
            .filter(|&i| self.grades()[i] == grade)
            .map(|i| MultiVector::basis_blade(self, i))
            .collect()
    }

    /// Every unit blade in blade-list order, the scalar included.
    pub fn blades_list(self: &Arc<Self>) -> Vec<MultiVector> {
        (0..self.ga_dims()).map(|i| MultiVector::basis_blade(self, i)).collect()
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout({:?}, {:?}, first_index={}, names={:?})",
            self.signature,
            self.blades(),
            self.first_index(),
            self.names
        )
    }
}

/// Builder for the standard algebra `Cl(p, q)`.
///
/// The signature is `p` copies of `+1` followed by `q` copies of `-1`; blades
/// come in canonical order and vectors are numbered from 1 unless
/// [`Cl::first_index`] says otherwise.
#[derive(Debug, Clone)]
pub struct Cl {
    signature: Vec<i8>,
    first_index: BladeIndex,
    names: BladeNames,
    config: GaConfig,
}

impl Cl {
    pub fn new(p: usize, q: usize) -> Self {
        let mut signature = vec![1i8; p];
        signature.extend(std::iter::repeat(-1i8).take(q));
        Self::from_signature(&signature)
    }

    /// Arbitrary ±1 signature in the given order.
    pub fn from_signature(signature: &[i8]) -> Self {
        Self {
            signature: signature.to_vec(),
            first_index: 1,
            names: BladeNames::Default,
            config: GaConfig::default(),
        }
    }

    pub fn first_index(mut self, first_index: BladeIndex) -> Self {
        self.first_index = first_index;
        self
    }

    pub fn names(mut self, names: BladeNames) -> Self {
        self.names = names;
        self
    }

    pub fn config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// The layout and its unit blades keyed by name.
    pub fn build(self) -> Result<(Arc<Layout>, BTreeMap<String, MultiVector>)> {
        let blades = canonical_blades(self.signature.len(), self.first_index);
        let layout = Layout::with_config(&self.signature, blades, self.first_index, self.names, self.config)?;
        let blades = layout.bases(None);
        Ok((layout, blades))
    }
}

/// `Cl(p, q)` with default settings.
pub fn cl(p: usize, q: usize) -> Result<(Arc<Layout>, BTreeMap<String, MultiVector>)> {
    Cl::new(p, q).build()
}
