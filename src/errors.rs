//! errors — crate-wide error type and result alias.
//!
//! Purpose
//! -------
//! Define [`LarError`] and [`LarResult`] as the canonical error surface of the
//! analytics core. Every fallible operation (label algebra, morphing, stacking,
//! sector aggregation, moving windows, labeled covariance) reports caller
//! misuse through this one enum; numeric edge cases such as all-NaN lines or
//! empty intersections are documented outputs, never errors.
//!
//! Key behaviors
//! -------------
//! - Classify every variant into one of two kinds via [`LarError::kind`]:
//!   [`ErrorKind::Type`] when an operand lacks required structure (no label
//!   list along the requested axis), and [`ErrorKind::Value`] for wrong ranks,
//!   unrecognized modes, and malformed parameters.
//! - Attach human-readable `Display` messages phrased as domain constraints so
//!   diagnostics are meaningful without additional context.
//! - Raise synchronously at the detecting call and propagate unchanged via
//!   `?`; nothing is deferred, batched, or retried.
//!
//! Invariants & assumptions
//! ------------------------
//! - Operations either fully succeed or return an error before producing any
//!   output; no partial results escape.
//! - `LarError` values are small, cloneable, and comparable, so unit tests can
//!   match on them directly.
//!
//! Conventions
//! -----------
//! - Variants carry just enough payload (offending axis, rank, key, or length
//!   pair) to identify the misuse without dragging large structures along.
//! - Messages name the violated constraint ("window size must be at least 1"),
//!   not the implementation detail that tripped over it.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the kind classification and that each `Display` message
//!   embeds its payload.

use crate::label::key::Key;

pub type LarResult<T> = Result<T, LarError>;

/// Coarse classification of a [`LarError`].
///
/// `Type` marks operands lacking required structure; `Value` marks wrong
/// ranks, unrecognized modes, and malformed parameter combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
}

/// LarError — error conditions raised by the analytics core.
///
/// Variants
/// --------
/// - `MissingLabels { axis, ndim }`
///   An operand has no label list along the requested axis (`axis >= ndim`).
///   The one `Type`-kind error: the operand lacks the structure the operation
///   requires.
/// - `NoOperands`
///   Label algebra was invoked over an empty operand list; union and
///   intersection need at least one operand.
/// - `WrongRank { expected, actual }`
///   A rank-specific operation (stack inputs, panel, cov, sector methods)
///   received an array of another rank.
/// - `BadMode(mode)`
///   A stack mode string parsed to neither "union" nor "intersection".
/// - `DuplicateKey(key)`
///   A label list or stack name set contains the same key twice.
/// - `LabelArityMismatch { lists, ndim }`
///   A labeled array was constructed with a number of label lists different
///   from its rank.
/// - `LabelLengthMismatch { axis, labels, extent }`
///   A label list's length differs from its axis extent.
/// - `SectorLengthMismatch { sectors, rows }`
///   A sector vector's length differs from the row count it partitions.
/// - `AxisOutOfBounds { axis, ndim }`
///   A numeric operation was pointed at an axis the array does not have.
/// - `ZeroWindow`
///   A moving-window operation was asked for a window of size 0; windows must
///   have size >= 1 (oversized windows are not errors, they degrade to NaN).
#[derive(Debug, Clone, PartialEq)]
pub enum LarError {
    MissingLabels { axis: usize, ndim: usize },
    NoOperands,
    WrongRank { expected: usize, actual: usize },
    BadMode(String),
    DuplicateKey(Key),
    LabelArityMismatch { lists: usize, ndim: usize },
    LabelLengthMismatch { axis: usize, labels: usize, extent: usize },
    SectorLengthMismatch { sectors: usize, rows: usize },
    AxisOutOfBounds { axis: usize, ndim: usize },
    ZeroWindow,
}

impl LarError {
    /// Classify this error as operand-structure (`Type`) or parameter
    /// (`Value`) misuse.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LarError::MissingLabels { .. } => ErrorKind::Type,
            _ => ErrorKind::Value,
        }
    }
}

impl std::error::Error for LarError {}

impl std::fmt::Display for LarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LarError::MissingLabels { axis, ndim } => {
                write!(f, "Operand has no labels along axis {axis} (rank is {ndim}).")
            }
            LarError::NoOperands => {
                write!(f, "Label algebra needs at least one operand.")
            }
            LarError::WrongRank { expected, actual } => {
                write!(f, "Operation requires a rank-{expected} array, got rank {actual}.")
            }
            LarError::BadMode(mode) => {
                write!(f, "Unrecognized mode {mode:?}. Must be 'union' or 'intersection'.")
            }
            LarError::DuplicateKey(key) => {
                write!(f, "Duplicate key: {key}. Labels and stack names must be unique.")
            }
            LarError::LabelArityMismatch { lists, ndim } => {
                write!(f, "Got {lists} label lists for a rank-{ndim} array.")
            }
            LarError::LabelLengthMismatch { axis, labels, extent } => {
                write!(
                    f,
                    "Label list along axis {axis} has {labels} keys but the axis extent is \
                     {extent}."
                )
            }
            LarError::SectorLengthMismatch { sectors, rows } => {
                write!(f, "Sector vector has {sectors} entries but the array has {rows} rows.")
            }
            LarError::AxisOutOfBounds { axis, ndim } => {
                write!(f, "Axis {axis} is out of bounds for a rank-{ndim} array.")
            }
            LarError::ZeroWindow => {
                write!(f, "Window size must be at least 1.")
            }
        }
    }
}
