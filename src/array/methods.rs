//! array::methods — label-carrying wrappers over the buffer engines.
//!
//! Purpose
//! -------
//! Expose the ranking, moving-window, sector, and geometric-mean engines as
//! [`LabeledArray`] methods. Each method validates its axis or rank, applies
//! the corresponding pure buffer function to the backing `ArrayD`, and
//! carries the labels through: shape-preserving operations keep every label
//! list, reductions drop the aggregated axis's list.
//!
//! Conventions
//! -----------
//! - Axis parameters are plain `usize` here (the collaborator's label lists
//!   are axis-indexed); they are checked against the rank and converted to
//!   `ndarray::Axis` before dispatch, so no method panics on a bad axis —
//!   it returns `AxisOutOfBounds`.
//! - Sector methods require rank 2 like their buffer counterparts and
//!   surface `WrongRank` otherwise.
//!
//! Testing notes
//! -------------
//! - Unit tests check label carry-through, the reduced label set of the
//!   geometric mean, and the axis/rank error branches; numeric behavior is
//!   pinned by the engine modules.

use ndarray::{Axis, Ix2};

use crate::array::labeled::LabeledArray;
use crate::errors::{LarError, LarResult};
use crate::label::key::Key;
use crate::{moving, rank, sector, stats};

impl LabeledArray {
    fn check_axis(&self, axis: usize) -> LarResult<Axis> {
        if axis >= self.ndim() {
            return Err(LarError::AxisOutOfBounds { axis, ndim: self.ndim() });
        }
        Ok(Axis(axis))
    }

    fn with_same_labels(&self, data: ndarray::ArrayD<f64>) -> LabeledArray {
        LabeledArray::from_parts(data, self.labels().to_vec())
    }

    /// Signed centered rank along `axis` ([-0.5, 0.5] scale); labels are
    /// preserved. See `rank::ranking`.
    pub fn ranking(&self, axis: usize) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(rank::ranking(self.data(), ax)))
    }

    /// Rank along `axis` rescaled to [-1, 1]; labels are preserved. See
    /// `rank::ranking_norm`.
    pub fn ranking_norm(&self, axis: usize) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(rank::ranking_norm(self.data(), ax)))
    }

    /// Rank along `axis` spanning the full extent [0, N−1]; labels are
    /// preserved. See `rank::ranking_1n`.
    pub fn ranking_1n(&self, axis: usize) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(rank::ranking_1n(self.data(), ax)))
    }

    /// Trailing rolling sum along `axis`; labels are preserved. See
    /// `moving::movingsum`.
    pub fn movingsum(&self, window: usize, axis: usize, norm: bool) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(moving::movingsum(self.data(), window, ax, norm)?))
    }

    /// Forward rolling sum along `axis`; labels are preserved. See
    /// `moving::movingsum_forward`.
    pub fn movingsum_forward(
        &self, window: usize, skip: usize, axis: usize, norm: bool,
    ) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(moving::movingsum_forward(self.data(), window, skip, ax, norm)?))
    }

    /// Trailing window rank along `axis`; labels are preserved. See
    /// `moving::movingrank`.
    pub fn movingrank(&self, window: usize, axis: usize) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        Ok(self.with_same_labels(moving::movingrank(self.data(), window, ax)?))
    }

    /// NaN-excluded geometric mean along `axis`; the aggregated axis and
    /// its label list are removed. See `stats::geometric_mean`.
    pub fn geometric_mean(&self, axis: usize) -> LarResult<LabeledArray> {
        let ax = self.check_axis(axis)?;
        let reduced = stats::geometric_mean(self.data(), ax);
        let mut labels = self.labels().to_vec();
        labels.remove(axis);
        Ok(LabeledArray::from_parts(reduced, labels))
    }

    fn rows_view(&self) -> LarResult<ndarray::ArrayView2<'_, f64>> {
        self.data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| LarError::WrongRank { expected: 2, actual: self.ndim() })
    }

    /// Within-sector column means scattered to rows; labels are preserved.
    /// Requires rank 2. See `sector::sector_mean`.
    pub fn sector_mean(&self, sectors: &[Option<Key>]) -> LarResult<LabeledArray> {
        let x = self.rows_view()?;
        Ok(self.with_same_labels(sector::sector_mean(&x, sectors)?.into_dyn()))
    }

    /// Within-sector column medians scattered to rows; labels are
    /// preserved. Requires rank 2. See `sector::sector_median`.
    pub fn sector_median(&self, sectors: &[Option<Key>]) -> LarResult<LabeledArray> {
        let x = self.rows_view()?;
        Ok(self.with_same_labels(sector::sector_median(&x, sectors)?.into_dyn()))
    }

    /// Within-sector signed ranks scattered to rows; labels are preserved.
    /// Requires rank 2. See `sector::sector_rank`.
    pub fn sector_rank(&self, sectors: &[Option<Key>]) -> LarResult<LabeledArray> {
        let x = self.rows_view()?;
        Ok(self.with_same_labels(sector::sector_rank(&x, sectors)?.into_dyn()))
    }
}
