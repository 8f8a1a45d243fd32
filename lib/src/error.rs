//! All kinds of errors in this crate.

use crate::{
    cells::{Coord, State},
    rules::ParseRuleError,
};
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// Invalid rule: {0}
    MalformedRule(#[from] ParseRuleError),
    /// Cell at {0:?} has invalid state: {1:?}.
    InvalidState(Coord, State),
    /// Dimensions mismatch: expected {expected:?}, found {found:?}.
    DimensionMismatch {
        /// `(rows, columns)` that was expected.
        expected: (usize, usize),
        /// `(rows, columns)` that was found.
        found: (usize, usize),
    },
    /// The history contains no frames.
    EmptyHistory,
    /// Rows / columns / block size should be positive.
    NonPositive,
    /// A grid of {0} × {1} cells is too large.
    TooLarge(usize, usize),
    /// Unable to set cell at {0:?}.
    SetCell(Coord),
    /// Neighbor count {0} exceeds the neighborhood size {1}.
    CountOutOfRange(usize, usize),
    /// Density should be between 0 and 1, found {0}.
    InvalidDensity(f64),
    /// Invalid neighborhood offset: {0:?}.
    MalformedOffset(String),
    /// Fraction should be a digit from 0 to 9, found {0}.
    InvalidFraction(u8),
}
