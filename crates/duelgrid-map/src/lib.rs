//! # Duelgrid Map
//!
//! Bounded cell grid for arena duels.
//!
//! The grid is a fixed `width x height` matrix of [`Cell`]s, each either
//! `Normal` or `Blocked`, some carrying a pickable item. It provides:
//!
//! - **Seeded generation**: sparse obstacle and item fields drawn from
//!   standard-normal samples ([`Density`] tunes the thresholds)
//! - **Bounds-checked lookup**: out-of-range coordinates are an error, never a panic
//! - **Adjacency**: the eight-neighbourhood used to validate movement
//! - **Placement**: bounded random search for a free cell
//!
//! ## Quick Start
//!
//! ```
//! use duelgrid_map::{Density, Grid};
//! use glam::IVec2;
//!
//! let grid: Grid<&str> =
//!     Grid::generate_seeded(16, 16, Density::default(), 7, |_| "potion").unwrap();
//!
//! let neighbours = grid.adjacent_cells(IVec2::new(0, 0)).unwrap();
//! assert_eq!(neighbours.len(), 3);
//!
//! for cell in grid.special_item_cells() {
//!     assert!(cell.is_traversable());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod density;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use cell::{Cell, CellKind};
pub use density::Density;
pub use error::GridError;
pub use grid::{Grid, MAX_FREE_CELL_ATTEMPTS};
