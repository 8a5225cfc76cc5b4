//! label::algebra — set union and intersection of per-axis label lists.
//!
//! Purpose
//! -------
//! Compute the union or intersection of one axis's labels across a list of
//! labeled arrays. These two operations are the alignment primitive under
//! `combine::stack`: the common row/column label sets every operand is
//! morphed onto are produced here.
//!
//! Key behaviors
//! -------------
//! - Deterministic output: results are sorted ascending under [`Key`]'s total
//!   order, independent of operand order.
//! - Structure checks first: an operand whose rank does not reach the
//!   requested axis has no label list there and is rejected with the
//!   Type-kind `MissingLabels` error before any set work happens.
//! - An empty intersection is an empty sorted list, not an error.
//!
//! Conventions
//! -----------
//! - Both functions require at least one operand (`NoOperands` otherwise);
//!   intersection is seeded from the first operand and narrowed by the rest.
//! - Set state is kept in `BTreeSet`, which makes the ascending-order
//!   guarantee a property of the container rather than a final sort.
//!
//! Testing notes
//! -------------
//! - Unit tests cover ascending output, operand-order independence, the
//!   union ⊇ intersection containment property, empty intersections, and
//!   both error branches.

use std::collections::BTreeSet;

use crate::array::labeled::LabeledArray;
use crate::errors::{LarError, LarResult};
use crate::label::key::Key;

/// Union of labels along `axis` across all operands, sorted ascending.
///
/// Parameters
/// ----------
/// - `axis`: `usize`
///   The axis whose label lists are combined.
/// - `arrays`: `&[&LabeledArray]`
///   One or more operands.
///
/// Returns
/// -------
/// `LarResult<Vec<Key>>`
///   The ascending union of every operand's labels along `axis`.
///
/// Errors
/// ------
/// - `LarError::NoOperands`
///   When `arrays` is empty.
/// - `LarError::MissingLabels`
///   When an operand's rank does not reach `axis`.
pub fn union(axis: usize, arrays: &[&LabeledArray]) -> LarResult<Vec<Key>> {
    if arrays.is_empty() {
        return Err(LarError::NoOperands);
    }
    let mut keys: BTreeSet<Key> = BTreeSet::new();
    for lar in arrays {
        keys.extend(lar.label(axis)?.iter().cloned());
    }
    Ok(keys.into_iter().collect())
}

/// Intersection of labels along `axis` across all operands, sorted ascending.
///
/// Seeded from the first operand and narrowed by each subsequent one. An
/// empty intersection yields an empty list.
///
/// Parameters
/// ----------
/// - `axis`: `usize`
///   The axis whose label lists are intersected.
/// - `arrays`: `&[&LabeledArray]`
///   One or more operands.
///
/// Returns
/// -------
/// `LarResult<Vec<Key>>`
///   The ascending intersection, possibly empty.
///
/// Errors
/// ------
/// - `LarError::NoOperands`
///   When `arrays` is empty.
/// - `LarError::MissingLabels`
///   When an operand's rank does not reach `axis`.
pub fn intersection(axis: usize, arrays: &[&LabeledArray]) -> LarResult<Vec<Key>> {
    let (first, rest) = arrays.split_first().ok_or(LarError::NoOperands)?;
    let mut keys: BTreeSet<Key> = first.label(axis)?.iter().cloned().collect();
    for lar in rest {
        let other: BTreeSet<&Key> = lar.label(axis)?.iter().collect();
        keys.retain(|key| other.contains(key));
    }
    Ok(keys.into_iter().collect())
}
