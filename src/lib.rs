//! # Clifford engine quickstart
//!
//! ```rust
//! use clifford_engine::prelude::*;
//!
//! let (layout, blades) = cl(3, 0).unwrap();
//! let (e1, e2, e3) = (&blades["e1"], &blades["e2"], &blades["e3"]);
//!
//! // e1 e2 is the bivector e12, and the wedge of all three is e123
//! assert!(e1 * e2 == blades["e12"]);
//! assert!((e1 ^ e2 ^ e3) == layout.pseudoscalar());
//!
//! // inversion through the linear solve
//! let m = 1.0 + &(e1 * 2.0);
//! let inv = m.inv().unwrap();
//! assert!(&m * &inv == 1.0);
//! ```
//!
#![doc = include_str!("../README.md")]

// Numeric types, errors and settings
pub mod config;
pub mod error;
pub mod types;

// Blade structure and product tables
pub mod blade;
pub mod kernel;
pub mod sign;
pub mod table;

// Algebra and elements
pub mod layout;
pub mod multivector;
pub mod ops;
pub mod subspace;
pub mod text;

// Helpers built on the public multivector API
pub mod blade_map;
pub mod frame;
pub mod random;

pub mod prelude;

// --- Public API exports ---

pub use blade::{canonical_blades, BladeIndexer};
pub use config::GaConfig;
pub use error::{GaError, Result};
pub use kernel::{KernelMode, ProductKernel};
pub use layout::{cl, BladeNames, Cl, Layout};
pub use multivector::{BladeKey, MultiVector, Operand};
pub use table::{MultiplicationTables, ProductKind, SparseTable, TableEntry};
pub use types::{BladeIndex, Scalar};

pub use blade_map::BladeMap;
pub use frame::Frame;
pub use random::{random_mv, random_rotor, random_vectors, RandomOptions};
