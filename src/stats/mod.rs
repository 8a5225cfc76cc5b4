//! stats — missing-data-tolerant closed-form reductions.
//!
//! Purpose
//! -------
//! Provide the two aggregate statistics of the analytics core:
//!
//! - [`geometric_mean`] — NaN-excluded geometric mean along one axis,
//!   computed as the exponential of the mean log so extreme magnitudes
//!   (1e200 and beyond) never overflow an intermediate product,
//! - [`cov_missing`] / [`cov`] — NaN-tolerant covariance of a rank-2
//!   buffer's rows under a zero-mean assumption, normalized pairwise by the
//!   number of commonly observed columns.
//!
//! Key behaviors
//! -------------
//! - [`geometric_mean`] removes the aggregated axis (ndarray reduction
//!   convention); an all-NaN line reduces to NaN. Negative inputs are
//!   undefined behavior and are not validated — the log simply goes NaN.
//! - [`cov_missing`] does not demean: entry `(i, j)` is the mean product of
//!   rows `i` and `j` over the columns where both are observed (divisor is
//!   that count, not count − 1); a pair with no common column is NaN, not
//!   an error. The result is symmetric by construction.
//! - The labeled [`cov`] requires rank exactly 2 and labels both result
//!   axes with the input's row labels.
//!
//! Testing notes
//! -------------
//! - Unit tests pin reduction values on both axes, the all-NaN and 1e200
//!   lines, pairwise covariance normalization under missing data, the
//!   zero-overlap NaN entry, symmetry, and the wrong-rank error.

use ndarray::{Array, Array2, ArrayBase, Axis, Data, Dimension, Ix2, RemoveAxis};

use crate::array::labeled::LabeledArray;
use crate::errors::{LarError, LarResult};

/// NaN-excluded geometric mean along `axis`.
///
/// Each line reduces to `exp(mean(ln v))` over its non-NaN values, never a
/// running product, so magnitudes like 1e200 cannot overflow on the way
/// through. An all-NaN line reduces to NaN. Negative inputs are undefined
/// behavior, not validated.
///
/// Parameters
/// ----------
/// - `x`: input buffer of any rank; not mutated.
/// - `axis`: the axis to aggregate away.
///
/// Returns
/// -------
/// A buffer of `x`'s shape with `axis` removed.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn geometric_mean<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D::Smaller>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    x.map_axis(axis, |lane| {
        let (log_sum, count) = lane
            .iter()
            .filter(|value| !value.is_nan())
            .fold((0.0, 0usize), |(sum, count), value| (sum + value.ln(), count + 1));
        if count == 0 { f64::NAN } else { (log_sum / count as f64).exp() }
    })
}

/// NaN-tolerant covariance of a rank-2 buffer's rows, zero-mean assumed.
///
/// Entry `(i, j)` is `Σ_t x[i,t]·x[j,t] / N_ij` over the columns `t` where
/// both rows are observed, with `N_ij` that column count. Rows are not
/// demeaned and the divisor is `N_ij`, not `N_ij − 1`. A pair with no
/// commonly observed column is NaN.
pub fn cov_missing<S>(x: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let n = x.nrows();
    let mut out = Array2::from_elem((n, n), f64::NAN);
    for i in 0..n {
        for j in i..n {
            let mut sum = 0.0;
            let mut count = 0usize;
            for t in 0..x.ncols() {
                let (a, b) = (x[[i, t]], x[[j, t]]);
                if !a.is_nan() && !b.is_nan() {
                    sum += a * b;
                    count += 1;
                }
            }
            let value = if count == 0 { f64::NAN } else { sum / count as f64 };
            out[[i, j]] = value;
            out[[j, i]] = value;
        }
    }
    out
}

/// Labeled covariance: [`cov_missing`] over a rank-2 labeled array.
///
/// Parameters
/// ----------
/// - `lar`: a rank-2 labeled array, rows = variables, columns =
///   observations.
///
/// Returns
/// -------
/// `LarResult<LabeledArray>`
///   A square labeled array with both axes carrying `lar`'s row labels.
///
/// Errors
/// ------
/// - `LarError::WrongRank`
///   When `lar` is not rank 2.
pub fn cov(lar: &LabeledArray) -> LarResult<LabeledArray> {
    let x = lar
        .data()
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| LarError::WrongRank { expected: 2, actual: lar.ndim() })?;
    let buffer = cov_missing(&x).into_dyn();
    let rows = lar.label(0)?.to_vec();
    LabeledArray::new(buffer, vec![rows.clone(), rows])
}
