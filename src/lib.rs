//! larray — NaN-aware statistics and label-set algebra for labeled arrays.
//!
//! Purpose
//! -------
//! Serve as the numerical analytics core of a labeled multi-dimensional
//! array library for quantitative research: group-wise (sector) statistics,
//! cross-sectional rankings, moving-window aggregates, missing-data-tolerant
//! reductions, and the label algebra needed to align and combine labeled
//! arrays.
//!
//! Key behaviors
//! -------------
//! - Missing values are IEEE NaN throughout; every operation documents how
//!   NaN propagates (excluded from statistics, preserved in outputs) and no
//!   numeric edge case is an error.
//! - All operations are pure: inputs are never mutated and every call
//!   returns a new buffer or labeled array.
//! - Buffer engines (`rank`, `moving`, `sector`, `stats`) are generic over
//!   `ndarray` storage and dimension; label-aware operations (`label`,
//!   `combine`, labeled covariance, the `LabeledArray` methods) work with
//!   the dynamic-rank collaborator in `array`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Label lists are ordered, unique, and extent-sized per axis; the
//!   `array` constructors enforce this once so the engines can rely on it.
//! - Caller misuse (wrong rank, unknown mode, malformed parameters, missing
//!   label structure) surfaces synchronously as [`errors::LarError`]; see
//!   [`errors::LarError::kind`] for the Type/Value classification.
//!
//! Conventions
//! -----------
//! - Axis parameters are explicit everywhere; the canonical cross-section
//!   axis for rank-2 data (rows = entities) is axis 0.
//! - Rows are entities and columns are observations in all sector and
//!   covariance operations.
//!
//! Downstream usage
//! ----------------
//! - Typical callers import the main surface via the prelude:
//!
//!   ```rust
//!   use larray::prelude::*;
//!   use ndarray::array;
//!
//!   let x = array![[1.0, f64::NAN, 2.0], [2.0, 2.0, 3.0]];
//!   let ranked = ranking(&x, ndarray::Axis(0));
//!   assert_eq!(ranked.shape(), x.shape());
//!   ```
//!
//! - Labeled workflows construct a [`array::LabeledArray`], combine with
//!   [`combine::stack`]/[`combine::panel`], and call the analytics methods
//!   directly on the array type.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests pinning exact output matrices for its
//!   engine; `tests/` holds an end-to-end pipeline over stacking, panel
//!   reshaping, sector statistics, and covariance.

pub mod array;
pub mod combine;
pub mod errors;
pub mod label;
pub mod moving;
pub mod rank;
pub mod sector;
pub mod stats;

// ---- Re-exports (primary public surface) ----------------------------------

pub use crate::array::LabeledArray;
pub use crate::combine::{panel, stack, StackMode};
pub use crate::errors::{ErrorKind, LarError, LarResult};
pub use crate::label::{intersection, union, Key};
pub use crate::moving::{movingrank, movingsum, movingsum_forward};
pub use crate::rank::{ranking, ranking_1n, ranking_norm};
pub use crate::sector::{sector_dummy, sector_mean, sector_median, sector_rank, unique_sector};
pub use crate::stats::{cov, cov_missing, geometric_mean};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use larray::prelude::*;
//
// to import the main analytics surface in a single line.

pub mod prelude {
    pub use crate::array::LabeledArray;
    pub use crate::combine::{panel, stack, StackMode};
    pub use crate::errors::{ErrorKind, LarError, LarResult};
    pub use crate::label::{intersection, union, Key};
    pub use crate::moving::{movingrank, movingsum, movingsum_forward};
    pub use crate::rank::{ranking, ranking_1n, ranking_norm};
    pub use crate::sector::{
        sector_dummy, sector_mean, sector_median, sector_rank, unique_sector,
    };
    pub use crate::stats::{cov, cov_missing, geometric_mean};
}
