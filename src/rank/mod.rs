//! rank — cross-sectional, NaN-excluded, tie-averaged ranking.
//!
//! Purpose
//! -------
//! Rank values along one axis of a dense buffer, independently per line,
//! excluding NaN, with ties resolved by averaging the 0-based positions the
//! tied values occupy. Three output scalings share that core:
//!
//! - [`ranking_1n`] — ranks rescaled to span the full line extent `[0, N−1]`,
//! - [`ranking_norm`] — ranks rescaled to `[-1, 1]`,
//! - [`ranking`] — signed ranks centered at 0, spanning `[-0.5, 0.5]`.
//!
//! Key behaviors
//! -------------
//! - NaN positions stay NaN in every scaling and never consume a rank.
//! - A line with exactly one non-NaN value yields that scaling's neutral
//!   output (midpoint for [`ranking_1n`], 0.0 for the signed scalings) —
//!   never NaN, never a division by zero.
//! - An all-NaN line stays all-NaN.
//!
//! Conventions
//! -----------
//! - `axis` is explicit and required on every function; there is no implicit
//!   default. The canonical cross-section axis for rank-2 data (rows =
//!   entities, columns = observations) is `Axis(0)`.
//! - With `m` non-NaN values in a line of extent `N` and tie-averaged ranks
//!   `r ∈ [0, m−1]`:
//!   - `ranking_1n`:   `r · (N−1)/(m−1)`, midpoint `(N−1)/2` when `m == 1`,
//!   - `ranking_norm`: `2·r/(m−1) − 1`, `0.0` when `m == 1`,
//!   - `ranking`:      `(r − (m−1)/2) / (m−1)`, `0.0` when `m == 1`.
//!
//! Downstream usage
//! ----------------
//! - `sector::sector_rank` applies the line-level core within per-sector row
//!   subsets; `moving::movingrank` scores a window's last sample on the
//!   [`ranking_norm`] scale.
//! - `LabeledArray` exposes all three as label-preserving methods.
//!
//! Testing notes
//! -------------
//! - Unit tests pin exact matrices for all three scalings on both axes,
//!   including ties, NaN mixtures, all-NaN lines, and single-value lines,
//!   plus the tie-free `{0, …, N−1}` output-set property of [`ranking_1n`].

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};

/// Tie-averaged 0-based ranks of a line's non-NaN values.
///
/// Returns the per-position ranks (NaN where the input is NaN) and the
/// non-NaN count `m`. Tied values share the mean of the positions they
/// occupy in ascending order, so ranks may be half-integral.
pub(crate) fn tie_ranks(line: &[f64]) -> (Vec<f64>, usize) {
    let mut order: Vec<usize> = (0..line.len()).filter(|&i| !line[i].is_nan()).collect();
    order.sort_by(|&a, &b| line[a].total_cmp(&line[b]));
    let m = order.len();

    let mut ranks = vec![f64::NAN; line.len()];
    let mut start = 0;
    while start < m {
        let mut stop = start + 1;
        while stop < m && line[order[stop]] == line[order[start]] {
            stop += 1;
        }
        // Mean of the positions start..stop-1 occupied by this tie run.
        let shared = (start + stop - 1) as f64 / 2.0;
        for &position in &order[start..stop] {
            ranks[position] = shared;
        }
        start = stop;
    }
    (ranks, m)
}

/// Signed line ranks centered at 0, spanning [-0.5, 0.5].
pub(crate) fn rank_centered(line: &[f64]) -> Vec<f64> {
    let (mut ranks, m) = tie_ranks(line);
    for rank in ranks.iter_mut().filter(|rank| !rank.is_nan()) {
        *rank = if m == 1 { 0.0 } else { (*rank - (m as f64 - 1.0) / 2.0) / (m as f64 - 1.0) };
    }
    ranks
}

/// Line ranks rescaled to [-1, 1].
pub(crate) fn rank_normalized(line: &[f64]) -> Vec<f64> {
    let (mut ranks, m) = tie_ranks(line);
    for rank in ranks.iter_mut().filter(|rank| !rank.is_nan()) {
        *rank = if m == 1 { 0.0 } else { 2.0 * *rank / (m as f64 - 1.0) - 1.0 };
    }
    ranks
}

/// Line ranks rescaled to span the full extent [0, N-1].
pub(crate) fn rank_scaled_1n(line: &[f64]) -> Vec<f64> {
    let n = line.len();
    let (mut ranks, m) = tie_ranks(line);
    for rank in ranks.iter_mut().filter(|rank| !rank.is_nan()) {
        *rank = if m == 1 {
            (n as f64 - 1.0) / 2.0
        } else {
            *rank * (n as f64 - 1.0) / (m as f64 - 1.0)
        };
    }
    ranks
}

fn map_lanes<S, D, F>(x: &ArrayBase<S, D>, axis: Axis, score: F) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
    F: Fn(&[f64]) -> Vec<f64>,
{
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let line: Vec<f64> = lane.iter().copied().collect();
        for (slot, value) in lane.iter_mut().zip(score(&line)) {
            *slot = value;
        }
    }
    out
}

/// Signed rank centered at 0 along `axis`, spanning exactly [-0.5, 0.5]
/// when a line has more than one non-NaN value.
///
/// Parameters
/// ----------
/// - `x`: input buffer of any rank; not mutated.
/// - `axis`: the axis to rank along, independently per line.
///
/// Returns
/// -------
/// A new buffer of `x`'s shape with each line replaced by
/// `(r − (m−1)/2) / (m−1)` over its tie-averaged ranks `r`; `0.0` for a
/// single non-NaN value; NaN positions and all-NaN lines stay NaN.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x` (ndarray's lane iteration panics).
pub fn ranking<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    map_lanes(x, axis, rank_centered)
}

/// Rank along `axis` rescaled to [-1, 1].
///
/// Per line: `2·r/(m−1) − 1` over tie-averaged ranks `r`; `0.0` for a single
/// non-NaN value; NaN positions and all-NaN lines stay NaN.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn ranking_norm<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    map_lanes(x, axis, rank_normalized)
}

/// Rank along `axis` rescaled to span the full line extent [0, N−1].
///
/// Per line of extent `N` with `m` non-NaN values: `r · (N−1)/(m−1)` over
/// tie-averaged ranks `r`, so a tie-free, NaN-free line yields exactly the
/// set `{0, …, N−1}`. A single non-NaN value maps to the midpoint `(N−1)/2`;
/// NaN positions and all-NaN lines stay NaN.
///
/// Panics
/// ------
/// - If `axis` is out of bounds for `x`.
pub fn ranking_1n<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    map_lanes(x, axis, rank_scaled_1n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact output matrices for ranking, ranking_norm, and ranking_1n on
    //   both axes, with NaN mixtures and ties.
    // - Neutral outputs for single-value lines and NaN propagation for
    //   all-NaN lines.
    // - The tie-free output-set property of ranking_1n.
    //
    // They intentionally DO NOT cover:
    // - Within-sector application (sector::sector_rank) or windowed
    //   application (moving::movingrank); those modules carry their own
    //   fixtures.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-8;
    const NAN: f64 = f64::NAN;

    fn assert_matrices_close(actual: &Array2<f64>, expected: &Array2<f64>, tol: f64) {
        assert_eq!(actual.shape(), expected.shape(), "shape mismatch");
        for i in 0..actual.nrows() {
            for j in 0..actual.ncols() {
                let (a, e) = (actual[[i, j]], expected[[i, j]]);
                if e.is_nan() {
                    assert!(a.is_nan(), "expected NaN at ({i}, {j}), got {a}");
                } else {
                    assert_relative_eq!(a, e, epsilon = tol, max_relative = tol);
                }
            }
        }
    }

    fn mixed_3x5() -> Array2<f64> {
        array![
            [1.0, NAN, 2.0, NAN, NAN],
            [2.0, 2.0, NAN, NAN, NAN],
            [3.0, 3.0, 3.0, 3.0, NAN]
        ]
    }

    fn mixed_4x5() -> Array2<f64> {
        array![
            [1.0, NAN, 2.0, NAN, NAN],
            [2.0, 2.0, NAN, NAN, NAN],
            [3.0, 3.0, 3.0, 3.0, NAN],
            [4.0, 2.0, 3.0, 1.0, 0.0]
        ]
    }

    #[test]
    // Purpose
    // -------
    // Verify the signed centered ranking down columns on a NaN-mixed
    // matrix without ties.
    //
    // Given
    // -----
    // - The 3x5 mixed fixture, axis 0.
    //
    // Expect
    // ------
    // - Columns span [-0.5, 0.5]; a lone non-NaN value maps to 0.0; the
    //   all-NaN column stays NaN.
    fn ranking_axis0_spans_half_unit_interval() {
        // Arrange
        let x = mixed_3x5();
        let expected = array![
            [-0.5, NAN, -0.5, NAN, NAN],
            [0.0, -0.5, NAN, NAN, NAN],
            [0.5, 0.5, 0.5, 0.0, NAN]
        ];

        // Act
        let practice = ranking(&x, Axis(0));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify the signed centered ranking across rows, including a fully
    // tied row that must collapse to 0.0 everywhere.
    //
    // Given
    // -----
    // - The 4x5 mixed fixture, axis 1.
    //
    // Expect
    // ------
    // - Tied rows are all 0.0; the dense row spans [-0.5, 0.5] in steps of
    //   0.25.
    fn ranking_axis1_collapses_tied_rows_to_zero() {
        // Arrange
        let x = mixed_4x5();
        let expected = array![
            [-0.5, NAN, 0.5, NAN, NAN],
            [0.0, 0.0, NAN, NAN, NAN],
            [0.0, 0.0, 0.0, 0.0, NAN],
            [0.5, 0.0, 0.25, -0.25, -0.5]
        ];

        // Act
        let practice = ranking(&x, Axis(1));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify tie averaging down columns on a matrix mixing ties with NaNs.
    //
    // Given
    // -----
    // - x = [[1,nan,1,nan,nan],[1,1,nan,nan,nan],[1,2,0,2,nan],[1,3,1,1,0]],
    //   axis 0.
    //
    // Expect
    // ------
    // - Tied pairs share the averaged rank (e.g. the two 1s in column 2 both
    //   map to 0.25); lone values map to 0.0.
    fn ranking_axis0_averages_ties() {
        // Arrange
        let x = array![
            [1.0, NAN, 1.0, NAN, NAN],
            [1.0, 1.0, NAN, NAN, NAN],
            [1.0, 2.0, 0.0, 2.0, NAN],
            [1.0, 3.0, 1.0, 1.0, 0.0]
        ];
        let expected = array![
            [0.0, NAN, 0.25, NAN, NAN],
            [0.0, -0.5, NAN, NAN, NAN],
            [0.0, 0.0, -0.5, 0.5, NAN],
            [0.0, 0.5, 0.25, -0.5, 0.0]
        ];

        // Act
        let practice = ranking(&x, Axis(0));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify tie averaging on a dense, NaN-free grid, down columns and (by
    // transposition) across rows, so both axes hit the same numbers.
    //
    // Given
    // -----
    // - A 4x4 grid of small integers with repeated values.
    //
    // Expect
    // ------
    // - Known third-valued outputs; the transposed input ranked along axis 1
    //   reproduces the transposed expectation.
    fn ranking_dense_tie_grid_matches_both_axes() {
        // Arrange
        let x = array![
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 2.0, 2.0],
            [2.0, 2.0, 3.0, 2.0],
            [2.0, 3.0, 3.0, 3.0]
        ];
        let third = 1.0 / 3.0;
        let sixth = 1.0 / 6.0;
        let expected = array![
            [-third, -third, -0.5, -0.5],
            [-third, -third, -sixth, 0.0],
            [third, sixth, third, 0.0],
            [third, 0.5, third, 0.5]
        ];

        // Act
        let down = ranking(&x, Axis(0));
        let across = ranking(&x.t(), Axis(1));

        // Assert
        assert_matrices_close(&down, &expected, TOL);
        assert_matrices_close(&across, &expected.t().to_owned(), TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify the single-column and single-element-line edge cases of the
    // signed ranking.
    //
    // Given
    // -----
    // - A 3x1 column [3, 1, 2].
    //
    // Expect
    // ------
    // - Axis 0 gives [0.5, -0.5, 0.0]; axis 1 (one value per line) gives
    //   all zeros.
    fn ranking_single_column_and_single_value_lines() {
        // Arrange
        let x = array![[3.0], [1.0], [2.0]];

        // Act
        let down = ranking(&x, Axis(0));
        let across = ranking(&x, Axis(1));

        // Assert
        assert_matrices_close(&down, &array![[0.5], [-0.5], [0.0]], TOL);
        assert_matrices_close(&across, &array![[0.0], [0.0], [0.0]], TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify that all-NaN lines pass through every scaling untouched.
    //
    // Given
    // -----
    // - A 3x2 all-NaN matrix ranked down columns and a 1x3 all-NaN row
    //   ranked across.
    //
    // Expect
    // ------
    // - Every output position is NaN for ranking, ranking_norm, and
    //   ranking_1n.
    fn all_rankings_keep_all_nan_lines_nan() {
        // Arrange
        let cols = array![[NAN, NAN], [NAN, NAN], [NAN, NAN]];
        let row = array![[NAN, NAN, NAN]];

        // Act / Assert
        for out in [
            ranking(&cols, Axis(0)),
            ranking_norm(&cols, Axis(0)),
            ranking_1n(&cols, Axis(0)),
        ] {
            assert!(out.iter().all(|v| v.is_nan()), "all-NaN columns must stay NaN");
        }
        for out in [ranking(&row, Axis(1)), ranking_norm(&row, Axis(1)), ranking_1n(&row, Axis(1))]
        {
            assert!(out.iter().all(|v| v.is_nan()), "all-NaN row must stay NaN");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify ranking_norm down columns on the NaN-mixed fixture.
    //
    // Given
    // -----
    // - The 3x5 mixed fixture, axis 0.
    //
    // Expect
    // ------
    // - Columns span [-1, 1]; the lone value in column 3 maps to 0.0.
    fn ranking_norm_axis0_spans_unit_interval() {
        // Arrange
        let x = mixed_3x5();
        let expected = array![
            [-1.0, NAN, -1.0, NAN, NAN],
            [0.0, -1.0, NAN, NAN, NAN],
            [1.0, 1.0, 1.0, 0.0, NAN]
        ];

        // Act
        let practice = ranking_norm(&x, Axis(0));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify ranking_norm across rows, where tie averaging sends a fully
    // tied row to 0.0 and two-value ties collapse likewise.
    //
    // Given
    // -----
    // - The 4x5 mixed fixture, axis 1.
    //
    // Expect
    // ------
    // - Row of four equal values -> all 0.0; dense row spans [-1, 1].
    fn ranking_norm_axis1_averages_ties() {
        // Arrange
        let x = mixed_4x5();
        let expected = array![
            [-1.0, NAN, 1.0, NAN, NAN],
            [0.0, 0.0, NAN, NAN, NAN],
            [0.0, 0.0, 0.0, 0.0, NAN],
            [1.0, 0.0, 0.5, -0.5, -1.0]
        ];

        // Act
        let practice = ranking_norm(&x, Axis(1));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify the single-column edge cases of ranking_norm.
    //
    // Given
    // -----
    // - A 3x1 column [3, 1, 2].
    //
    // Expect
    // ------
    // - Axis 0 gives [1, -1, 0]; axis 1 gives all zeros.
    fn ranking_norm_single_column_and_single_value_lines() {
        // Arrange
        let x = array![[3.0], [1.0], [2.0]];

        // Act / Assert
        assert_matrices_close(&ranking_norm(&x, Axis(0)), &array![[1.0], [-1.0], [0.0]], TOL);
        assert_matrices_close(&ranking_norm(&x, Axis(1)), &array![[0.0], [0.0], [0.0]], TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify ranking_1n down columns on the NaN-mixed fixture: ranks span
    // the full column extent and a lone value maps to the midpoint.
    //
    // Given
    // -----
    // - The 3x5 mixed fixture, axis 0 (three rows, so extent N = 3).
    //
    // Expect
    // ------
    // - [[0,nan,0,nan,nan],[1,0,nan,nan,nan],[2,2,2,1,nan]]: two-value
    //   columns stretch to {0, 2}; the lone value in column 3 sits at
    //   (N-1)/2 = 1.
    fn ranking_1n_axis0_spans_full_extent() {
        // Arrange
        let x = mixed_3x5();
        let expected = array![
            [0.0, NAN, 0.0, NAN, NAN],
            [1.0, 0.0, NAN, NAN, NAN],
            [2.0, 2.0, 2.0, 1.0, NAN]
        ];

        // Act
        let practice = ranking_1n(&x, Axis(0));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify ranking_1n across rows with ties: tied values share the
    // averaged rank before the extent rescale.
    //
    // Given
    // -----
    // - The 4x5 mixed fixture, axis 1 (extent N = 5).
    //
    // Expect
    // ------
    // - Row [2,2,nan,nan,nan]: averaged rank 0.5 stretched by 4 -> [2, 2].
    // - Row [3,3,3,3,nan]: averaged rank 1.5 stretched by 4/3 -> all 2.
    // - Dense row keeps its permutation [4,2,3,1,0].
    fn ranking_1n_axis1_averages_ties_before_rescale() {
        // Arrange
        let x = mixed_4x5();
        let expected = array![
            [0.0, NAN, 4.0, NAN, NAN],
            [2.0, 2.0, NAN, NAN, NAN],
            [2.0, 2.0, 2.0, 2.0, NAN],
            [4.0, 2.0, 3.0, 1.0, 0.0]
        ];

        // Act
        let practice = ranking_1n(&x, Axis(1));

        // Assert
        assert_matrices_close(&practice, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify the tie-free output-set property: a dense, tie-free line
    // yields exactly {0, ..., N-1}.
    //
    // Given
    // -----
    // - A 3x1 column [3, 1, 2] and a 1x4 row [7, -1, 3, 0].
    //
    // Expect
    // ------
    // - Column output is the permutation [2, 0, 1]; the sorted row output
    //   is [0, 1, 2, 3].
    fn ranking_1n_tie_free_line_is_a_permutation() {
        // Arrange
        let column = array![[3.0], [1.0], [2.0]];
        let row = array![[7.0, -1.0, 3.0, 0.0]];

        // Act
        let down = ranking_1n(&column, Axis(0));
        let across = ranking_1n(&row, Axis(1));

        // Assert
        assert_matrices_close(&down, &array![[2.0], [0.0], [1.0]], TOL);
        let mut values: Vec<f64> = across.iter().copied().collect();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify ranking_1n's single-value-per-line edge: a lone value in a
    // one-element line maps to (1-1)/2 = 0.
    //
    // Given
    // -----
    // - A 3x1 column ranked across rows (each line has extent 1).
    //
    // Expect
    // ------
    // - All zeros.
    fn ranking_1n_single_element_lines_map_to_zero() {
        // Arrange
        let x = array![[3.0], [1.0], [2.0]];

        // Act
        let practice = ranking_1n(&x, Axis(1));

        // Assert
        assert_matrices_close(&practice, &array![[0.0], [0.0], [0.0]], TOL);
    }
}
