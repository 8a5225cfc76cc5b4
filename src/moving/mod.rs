//! moving — rolling-window sums and ranks with NaN-aware normalization.
//!
//! Purpose
//! -------
//! Compute trailing-window and forward-window rolling statistics along one
//! axis of a dense buffer, independently per line:
//!
//! - [`movingsum`] — trailing sum aligned to the window end,
//! - [`movingsum_forward`] — the same sum looking forward from the current
//!   position plus a skip,
//! - [`movingrank`] — the current sample rank-scored within its trailing
//!   window on the `rank::ranking_norm` scale.
//!
//! Key behaviors
//! -------------
//! - Boundary positions that cannot hold a full window are NaN: the first
//!   `W−1` positions for trailing windows, the last `W+skip−1` for forward
//!   windows.
//! - `norm = true` rescales a window's non-NaN sum by `W / count_non_NaN`,
//!   extrapolating the observed mean over the full window; `norm = false`
//!   treats NaN members as 0.
//! - A window with no non-NaN member is NaN under both flags — the interior
//!   all-NaN window follows the all-NaN-line rule rather than summing to 0.
//! - A window larger than the axis extent degrades the output to all-NaN;
//!   it is not an error. A window of size 0 is caller misuse
//!   ([`LarError::ZeroWindow`]).
//!
//! Conventions
//! -----------
//! - `axis` is explicit and required; lines along the other axes are
//!   mutually independent.
//! - All functions are pure; inputs are never mutated.
//!
//! Testing notes
//! -------------
//! - Unit tests pin exact matrices for both flags on both axes, the forward
//!   variant with and without skip, the window-rank fixtures including
//!   NaN-current and NaN-neighbor windows, plus the degenerate window sizes
//!   (0, 1, and oversized).

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};

use crate::errors::{LarError, LarResult};

/// Sum and non-NaN count of a window slice.
fn window_sum(window: &[f64]) -> (f64, usize) {
    window
        .iter()
        .filter(|value| !value.is_nan())
        .fold((0.0, 0), |(sum, count), value| (sum + value, count + 1))
}

/// One window's output value under the shared normalization rule.
fn window_value(window: &[f64], size: usize, norm: bool) -> f64 {
    let (sum, count) = window_sum(window);
    if count == 0 {
        f64::NAN
    } else if norm {
        sum * size as f64 / count as f64
    } else {
        sum
    }
}

/// Rolling sum of the trailing `window` samples along `axis`, aligned to the
/// window end.
///
/// Parameters
/// ----------
/// - `x`: input buffer of any rank; not mutated.
/// - `window`: window size `W >= 1`.
/// - `axis`: the axis the window slides along.
/// - `norm`: rescale each window's non-NaN sum by `W / count_non_NaN` when
///   true; treat NaN members as 0 when false.
///
/// Returns
/// -------
/// `LarResult<Array<f64, D>>`
///   A buffer of `x`'s shape. The first `W−1` positions along `axis` are
///   NaN; a window whose members are all NaN is NaN under both flags. A
///   window larger than the axis extent yields an all-NaN output.
///
/// Errors
/// ------
/// - `LarError::ZeroWindow`
///   When `window == 0`.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn movingsum<S, D>(
    x: &ArrayBase<S, D>, window: usize, axis: Axis, norm: bool,
) -> LarResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if window == 0 {
        return Err(LarError::ZeroWindow);
    }
    let mut out = Array::from_elem(x.raw_dim(), f64::NAN);
    for (lane, mut lane_out) in x.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let line: Vec<f64> = lane.iter().copied().collect();
        if window > line.len() {
            continue;
        }
        for end in (window - 1)..line.len() {
            let start = end + 1 - window;
            lane_out[end] = window_value(&line[start..=end], window, norm);
        }
    }
    Ok(out)
}

/// Rolling sum looking forward from the current position plus `skip`.
///
/// The value at position `i` is the `movingsum` of the samples
/// `[i + skip, i + skip + W)`; the last `W + skip − 1` positions along
/// `axis` are NaN. `norm` semantics are identical to [`movingsum`].
///
/// Errors
/// ------
/// - `LarError::ZeroWindow`
///   When `window == 0`.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn movingsum_forward<S, D>(
    x: &ArrayBase<S, D>, window: usize, skip: usize, axis: Axis, norm: bool,
) -> LarResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if window == 0 {
        return Err(LarError::ZeroWindow);
    }
    let mut out = Array::from_elem(x.raw_dim(), f64::NAN);
    for (lane, mut lane_out) in x.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let line: Vec<f64> = lane.iter().copied().collect();
        let reach = window + skip;
        if reach > line.len() {
            continue;
        }
        for position in 0..=(line.len() - reach) {
            let start = position + skip;
            lane_out[position] = window_value(&line[start..start + window], window, norm);
        }
    }
    Ok(out)
}

/// Rank of the current sample within its trailing `window`-sample window,
/// on the `ranking_norm` [-1, 1] scale, NaN-excluding.
///
/// At each position with at least `W−1` prior samples, the current sample is
/// compared against the other non-NaN window members: with `g` members below
/// it, `e` equal to it, and `n` valid members in total, the score is
/// `(2g + e − n) / n` — exactly the `ranking_norm` value of the window's
/// last sample. Positions lacking `W−1` prior samples are NaN; a NaN current
/// sample is NaN; a window whose only non-NaN member is the current sample
/// is NaN (there is nothing to rank against).
///
/// Errors
/// ------
/// - `LarError::ZeroWindow`
///   When `window == 0`.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn movingrank<S, D>(x: &ArrayBase<S, D>, window: usize, axis: Axis) -> LarResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if window == 0 {
        return Err(LarError::ZeroWindow);
    }
    let mut out = Array::from_elem(x.raw_dim(), f64::NAN);
    for (lane, mut lane_out) in x.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let line: Vec<f64> = lane.iter().copied().collect();
        if window > line.len() {
            continue;
        }
        for end in (window - 1)..line.len() {
            let current = line[end];
            if current.is_nan() {
                continue;
            }
            let others = &line[end + 1 - window..end];
            let mut below = 0usize;
            let mut equal = 0usize;
            let mut valid = 0usize;
            for &other in others.iter().filter(|other| !other.is_nan()) {
                valid += 1;
                if current > other {
                    below += 1;
                } else if current == other {
                    equal += 1;
                }
            }
            if valid > 0 {
                lane_out[end] =
                    (2.0 * below as f64 + equal as f64 - valid as f64) / valid as f64;
            }
        }
    }
    Ok(out)
}
