//! sector — group-wise statistics scattered back to row positions.
//!
//! Purpose
//! -------
//! Partition the rows of a rank-2 buffer by a sector vector (one group key or
//! an explicit "unsectored" marker per row) and replace each row's values with
//! a within-sector, per-column statistic: the sector mean, the sector median,
//! or the row's signed rank within its sector. Output shape always equals
//! input shape — these are scatters, not reductions.
//!
//! Key behaviors
//! -------------
//! - The unsectored marker is `Option::None`: such rows are NaN in every
//!   sector output regardless of their input values, and never join the key
//!   set of [`unique_sector`] or [`sector_dummy`].
//! - Statistics are NaN-excluding within the sector; a sector whose members
//!   are all NaN in a column is NaN in that column for every member.
//! - [`unique_sector`] and the dummy-matrix column order are ascending under
//!   [`Key`]'s total order.
//!
//! Conventions
//! -----------
//! - Rows are entities, columns are observations; the sector vector's length
//!   must equal the row count (`SectorLengthMismatch` otherwise).
//! - [`sector_rank`] scores each sector's row subset per column with the
//!   crate's signed centered ranking (`rank::ranking` semantics, spanning
//!   [-0.5, 0.5]).
//!
//! Testing notes
//! -------------
//! - Unit tests pin exact scatter matrices for mean, median, and rank on a
//!   NaN-mixed fixture, with and without unsectored rows, plus the dummy
//!   matrix, the ascending-keys property, idempotence of the mean scatter,
//!   and the length-mismatch error.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::errors::{LarError, LarResult};
use crate::label::key::Key;
use crate::rank::rank_centered;

/// Distinct non-marker sector keys, sorted ascending.
pub fn unique_sector(sectors: &[Option<Key>]) -> Vec<Key> {
    let keys: BTreeSet<Key> = sectors.iter().flatten().cloned().collect();
    keys.into_iter().collect()
}

/// Rows-by-sectors dummy matrix and its ordered key list.
///
/// Each sectored row carries a single 1.0 in its sector's column; unsectored
/// rows are all-zero. Columns follow [`unique_sector`]'s ascending order.
pub fn sector_dummy(sectors: &[Option<Key>]) -> (Array2<f64>, Vec<Key>) {
    let keys = unique_sector(sectors);
    let columns: BTreeMap<&Key, usize> =
        keys.iter().enumerate().map(|(j, key)| (key, j)).collect();
    let mut dummy = Array2::zeros((sectors.len(), keys.len()));
    for (row, sector) in sectors.iter().enumerate() {
        if let Some(key) = sector {
            dummy[[row, columns[key]]] = 1.0;
        }
    }
    (dummy, keys)
}

/// Row indices per sector key, in row order, unsectored rows omitted.
fn partition(sectors: &[Option<Key>]) -> BTreeMap<&Key, Vec<usize>> {
    let mut members: BTreeMap<&Key, Vec<usize>> = BTreeMap::new();
    for (row, sector) in sectors.iter().enumerate() {
        if let Some(key) = sector {
            members.entry(key).or_default().push(row);
        }
    }
    members
}

fn check_length<S: Data<Elem = f64>>(
    x: &ArrayBase<S, Ix2>, sectors: &[Option<Key>],
) -> LarResult<()> {
    if sectors.len() != x.nrows() {
        return Err(LarError::SectorLengthMismatch { sectors: sectors.len(), rows: x.nrows() });
    }
    Ok(())
}

/// Scatter a per-sector, per-column statistic back to every member row.
fn scatter_statistic<S, F>(
    x: &ArrayBase<S, Ix2>, sectors: &[Option<Key>], statistic: F,
) -> LarResult<Array2<f64>>
where
    S: Data<Elem = f64>,
    F: Fn(&[f64]) -> f64,
{
    check_length(x, sectors)?;
    let mut out = Array2::from_elem(x.raw_dim(), f64::NAN);
    for rows in partition(sectors).values() {
        for column in 0..x.ncols() {
            let observed: Vec<f64> =
                rows.iter().map(|&row| x[[row, column]]).filter(|v| !v.is_nan()).collect();
            if observed.is_empty() {
                continue;
            }
            let value = statistic(&observed);
            for &row in rows {
                out[[row, column]] = value;
            }
        }
    }
    Ok(out)
}

/// Replace each value with the NaN-excluding mean of its row's sector in
/// that column.
///
/// Parameters
/// ----------
/// - `x`: rank-2 buffer, rows = entities, columns = observations.
/// - `sectors`: one `Some(key)` or `None` (unsectored) per row.
///
/// Returns
/// -------
/// `LarResult<Array2<f64>>`
///   A buffer of `x`'s shape: every member of a sector carries the sector's
///   column mean; columns where the whole sector is NaN stay NaN; unsectored
///   rows are NaN everywhere.
///
/// Errors
/// ------
/// - `LarError::SectorLengthMismatch`
///   When `sectors.len() != x.nrows()`.
pub fn sector_mean<S>(x: &ArrayBase<S, Ix2>, sectors: &[Option<Key>]) -> LarResult<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    scatter_statistic(x, sectors, |observed| {
        observed.iter().sum::<f64>() / observed.len() as f64
    })
}

/// Replace each value with the NaN-excluding median of its row's sector in
/// that column. An even member count takes the average of the two middle
/// values. Same shape, NaN, and error rules as [`sector_mean`].
pub fn sector_median<S>(x: &ArrayBase<S, Ix2>, sectors: &[Option<Key>]) -> LarResult<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    scatter_statistic(x, sectors, |observed| {
        let mut sorted = observed.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        }
    })
}

/// Replace each value with its signed centered rank within its row's sector
/// in that column.
///
/// The per-sector, per-column line is scored with the crate's cross-sectional
/// ranking (`rank::ranking` semantics): NaN-excluded, tie-averaged, spanning
/// [-0.5, 0.5], with a lone observed member scoring 0.0. Unsectored rows are
/// NaN everywhere. Same error rule as [`sector_mean`].
pub fn sector_rank<S>(x: &ArrayBase<S, Ix2>, sectors: &[Option<Key>]) -> LarResult<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    check_length(x, sectors)?;
    let mut out = Array2::from_elem(x.raw_dim(), f64::NAN);
    for rows in partition(sectors).values() {
        for column in 0..x.ncols() {
            let line: Vec<f64> = rows.iter().map(|&row| x[[row, column]]).collect();
            for (&row, value) in rows.iter().zip(rank_centered(&line)) {
                out[[row, column]] = value;
            }
        }
    }
    Ok(out)
}
