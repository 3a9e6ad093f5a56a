// src/prelude.rs
//! The “everything” import for the engine.
//!
//! Brings the layout builders, the multivector type and the helpers into
//! scope with one glob:
//! ```rust
//! use clifford_engine::prelude::*;
//! ```

// algebra construction
pub use crate::config::GaConfig;
pub use crate::layout::{cl, BladeNames, Cl, Layout};

// elements
pub use crate::error::{GaError, Result};
pub use crate::multivector::MultiVector;
pub use crate::table::ProductKind;
pub use crate::types::Scalar;

// helpers
pub use crate::blade_map::BladeMap;
pub use crate::frame::Frame;
pub use crate::random::{random_mv, random_rotor, random_vectors, RandomOptions};
