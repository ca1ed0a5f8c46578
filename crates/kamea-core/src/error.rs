use thiserror::Error;

use crate::lattice::Coordinate;

/// Input-validation failures raised by the ternary engine.
///
/// Every variant carries the offending input. Non-convergence of nuclear
/// mutation is not an error: it is reported through
/// [`TerminalReason`](crate::nuclear::TerminalReason).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KameaError {
    /// Integer outside `[0, 3^width - 1]`.
    #[error("invalid value {value}: must lie in [0, {max}] for width {width}")]
    InvalidValue { value: i64, width: usize, max: u64 },

    /// Character outside {0, 1, 2}.
    #[error("invalid digit {found:?} at position {position}: ternary digits are 0, 1 or 2")]
    InvalidDigit { found: char, position: usize },

    /// Width outside the supported range, or not the width an operation requires.
    #[error("invalid width {width}: {reason}")]
    InvalidWidth { width: usize, reason: String },

    /// Coordinate outside the lattice.
    #[error("coordinate ({x}, {y}) out of bounds: both axes must lie in [-{extent}, {extent}]")]
    OutOfBounds { x: i32, y: i32, extent: i32 },

    /// Values at reflected coordinates violate the quadset relations.
    #[error("inconsistent quadset at {coordinate}: expected {expected}, found {found}")]
    InconsistentQuadset {
        coordinate: Coordinate,
        expected: String,
        found: String,
    },

    /// Polygon with fewer than three sides.
    #[error("invalid sides {sides}: a polygon needs at least {min} sides")]
    InvalidSides { sides: usize, min: usize },

    /// Supplied vertex values do not match the vertex count.
    #[error("value count mismatch: {sides} vertices but {supplied} values supplied")]
    ValueCountMismatch { sides: usize, supplied: usize },
}

pub type Result<T> = std::result::Result<T, KameaError>;
