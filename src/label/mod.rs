//! label — key type and label-set algebra.
//!
//! Purpose
//! -------
//! House the ordered key type every label list and sector vector is built
//! from ([`key::Key`]) and the set algebra over per-axis label lists
//! ([`algebra::union`], [`algebra::intersection`]) that label-aligned
//! combination builds on.
//!
//! Conventions
//! -----------
//! - All set outputs are sorted ascending under [`key::Key`]'s total order
//!   and are independent of operand order.
//! - Structure errors (an operand without labels along the requested axis)
//!   are the Type-kind `MissingLabels`; an empty operand list is the
//!   Value-kind `NoOperands`.

pub mod algebra;
pub mod key;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::algebra::{intersection, union};
pub use self::key::Key;
