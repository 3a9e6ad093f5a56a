// src/config.rs
//! Per-layout numeric and display settings.

use serde::{Deserialize, Serialize};

use crate::types::{Scalar, DEFAULT_EPS};

/// Settings read by every multivector operation on a layout.
///
/// A config is fixed when the layout is built; two layouts over the same
/// signature may carry different tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Tolerance for float comparisons (equality, zero tests, singularity).
    pub eps: Scalar,

    /// Decimal places kept when printing coefficients.
    pub print_precision: usize,

    /// When false, `Debug` prints the structural form instead of the blade sum.
    pub pretty: bool,

    /// Upper bound on Taylor-series terms in `r ** M`.
    pub max_series_terms: usize,
}

impl GaConfig {
    pub fn with_eps(mut self, eps: Scalar) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_print_precision(mut self, print_precision: usize) -> Self {
        self.print_precision = print_precision;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_max_series_terms(mut self, max_series_terms: usize) -> Self {
        self.max_series_terms = max_series_terms;
        self
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            print_precision: 5,
            pretty: true,
            max_series_terms: 1000,
        }
    }
}
