//! Error types for grid queries.

use thiserror::Error;

/// Errors returned by [`Grid`](crate::Grid) lookups and placement searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The requested coordinate lies outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// The grid has no `Normal` cell to place a combatant on.
    #[error("grid has no free cell")]
    NoFreeCell,

    /// A grid was requested with a zero or negative dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}
