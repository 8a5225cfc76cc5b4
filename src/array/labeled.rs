//! array::labeled — the minimal labeled-array collaborator.
//!
//! Purpose
//! -------
//! Hold a dense `f64` buffer together with one ordered, unique label list per
//! axis, and expose exactly the surface the analytics core consumes: shape,
//! rank, per-axis labels, deep copy, reindexing (`morph`), and raw buffer
//! access. The general construction/parsing/indexing API of a full labeled
//! array library is intentionally absent.
//!
//! Key behaviors
//! -------------
//! - Validated construction: the number of label lists must equal the rank,
//!   each list's length must equal its axis extent, and keys within a list
//!   must be unique.
//! - `morph` reindexes one axis onto a caller-supplied label set: positions
//!   for keys present in the old list carry their data over, positions for
//!   new keys are filled with NaN, and old keys absent from the new list are
//!   dropped.
//! - `with_default_labels` labels every axis positionally (`0..extent`), the
//!   conventional default for freshly built buffers.
//!
//! Invariants & assumptions
//! ------------------------
//! - `labels.len() == data.ndim()` and `labels[ax].len() == shape[ax]` for
//!   every axis, with unique keys per list; all constructors enforce this, so
//!   downstream code may index label lists without re-checking.
//! - Missing values in the buffer are IEEE NaN, never a sentinel.
//! - The type is `Clone`; cloning is the collaborator's deep copy.
//!
//! Conventions
//! -----------
//! - The buffer is `ArrayD<f64>` so one type serves every rank; buffer-level
//!   engines stay generic over `Dimension` and are applied through views.
//! - All operations are pure: `morph` returns a new array and never mutates
//!   `self`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation branches, morph's carry/insert/
//!   drop behavior on both axes, and label accessor errors.

use std::collections::{HashMap, HashSet};

use ndarray::{ArrayD, Axis, IxDyn};

use crate::errors::{LarError, LarResult};
use crate::label::key::Key;

/// A dense `f64` buffer plus one ordered, unique label list per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    data: ArrayD<f64>,
    labels: Vec<Vec<Key>>,
}

impl LabeledArray {
    /// Construct a labeled array from a buffer and per-axis label lists.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayD<f64>`
    ///   Backing dense buffer of any rank.
    /// - `labels`: `Vec<Vec<Key>>`
    ///   One label list per axis, in axis order.
    ///
    /// Returns
    /// -------
    /// `LarResult<LabeledArray>`
    ///   The validated labeled array.
    ///
    /// Errors
    /// ------
    /// - `LarError::LabelArityMismatch`
    ///   When `labels.len() != data.ndim()`.
    /// - `LarError::LabelLengthMismatch`
    ///   When a list's length differs from its axis extent.
    /// - `LarError::DuplicateKey`
    ///   When a list contains the same key twice.
    pub fn new(data: ArrayD<f64>, labels: Vec<Vec<Key>>) -> LarResult<LabeledArray> {
        if labels.len() != data.ndim() {
            return Err(LarError::LabelArityMismatch { lists: labels.len(), ndim: data.ndim() });
        }
        for (axis, list) in labels.iter().enumerate() {
            let extent = data.shape()[axis];
            if list.len() != extent {
                return Err(LarError::LabelLengthMismatch {
                    axis,
                    labels: list.len(),
                    extent,
                });
            }
            let mut seen: HashSet<&Key> = HashSet::with_capacity(list.len());
            for key in list {
                if !seen.insert(key) {
                    return Err(LarError::DuplicateKey(key.clone()));
                }
            }
        }
        Ok(LabeledArray { data, labels })
    }

    /// Construct a labeled array with positional integer labels `0..extent`
    /// on every axis.
    pub fn with_default_labels(data: ArrayD<f64>) -> LabeledArray {
        let labels = data
            .shape()
            .iter()
            .map(|&extent| (0..extent as i64).map(Key::Int).collect())
            .collect();
        // Positional labels are unique and extent-sized by construction.
        LabeledArray { data, labels }
    }

    /// Internal constructor for crate code that already upholds the label
    /// invariants (matching arity, lengths, and uniqueness).
    pub(crate) fn from_parts(data: ArrayD<f64>, labels: Vec<Vec<Key>>) -> LabeledArray {
        LabeledArray { data, labels }
    }

    /// All label lists, in axis order.
    pub(crate) fn labels(&self) -> &[Vec<Key>] {
        &self.labels
    }

    /// Shape of the backing buffer.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Rank of the backing buffer.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Label list along `axis`.
    ///
    /// Errors
    /// ------
    /// - `LarError::MissingLabels`
    ///   When `axis >= self.ndim()`.
    pub fn label(&self, axis: usize) -> LarResult<&[Key]> {
        self.labels
            .get(axis)
            .map(Vec::as_slice)
            .ok_or(LarError::MissingLabels { axis, ndim: self.ndim() })
    }

    /// Read-only view of the backing buffer.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consume the array and return its backing buffer.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Reindex one axis onto a new label set.
    ///
    /// For every key in `new_labels` that exists in the current label list,
    /// the corresponding slice of data is carried over; keys new to this
    /// array produce NaN slices; current keys absent from `new_labels` are
    /// dropped. The other axes are untouched.
    ///
    /// Parameters
    /// ----------
    /// - `new_labels`: `&[Key]`
    ///   Target label list for `axis`; must be free of duplicates.
    /// - `axis`: `usize`
    ///   The axis to reindex.
    ///
    /// Returns
    /// -------
    /// `LarResult<LabeledArray>`
    ///   A new array whose `axis` extent is `new_labels.len()`.
    ///
    /// Errors
    /// ------
    /// - `LarError::MissingLabels`
    ///   When `axis >= self.ndim()`.
    /// - `LarError::DuplicateKey`
    ///   When `new_labels` contains the same key twice.
    pub fn morph(&self, new_labels: &[Key], axis: usize) -> LarResult<LabeledArray> {
        let old = self.label(axis)?;
        let mut seen: HashSet<&Key> = HashSet::with_capacity(new_labels.len());
        for key in new_labels {
            if !seen.insert(key) {
                return Err(LarError::DuplicateKey(key.clone()));
            }
        }

        let positions: HashMap<&Key, usize> =
            old.iter().enumerate().map(|(i, key)| (key, i)).collect();

        let mut shape = self.data.shape().to_vec();
        shape[axis] = new_labels.len();
        let mut out = ArrayD::from_elem(IxDyn(&shape), f64::NAN);
        for (j, key) in new_labels.iter().enumerate() {
            if let Some(&i) = positions.get(key) {
                out.index_axis_mut(Axis(axis), j).assign(&self.data.index_axis(Axis(axis), i));
            }
        }

        let mut labels = self.labels.clone();
        labels[axis] = new_labels.to_vec();
        Ok(LabeledArray { data: out, labels })
    }
}
