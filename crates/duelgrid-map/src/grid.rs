//! The arena grid: a fixed `width x height` matrix of [`Cell`]s.
//!
//! The grid is built once and never resized. Terrain never changes after
//! construction; the only mutation is removing items when they are picked up.
//!
//! # Example
//!
//! ```
//! use duelgrid_map::{CellKind, Density, Grid};
//!
//! let grid: Grid<()> = Grid::generate_seeded(10, 10, Density::default(), 42, |_| ()).unwrap();
//! let cell = grid.cell(3, 4).unwrap();
//! assert_eq!((cell.x(), cell.y()), (3, 4));
//! assert!(grid.cell(10, 0).is_err());
//!
//! let free = grid.free_cell(&mut rand::thread_rng()).unwrap();
//! assert_eq!(free.kind(), CellKind::Normal);
//! ```

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellKind};
use crate::density::Density;
use crate::error::GridError;

/// Rejection-sampling attempts before [`Grid::free_cell`] falls back to a
/// direct pick among the open cells.
pub const MAX_FREE_CELL_ATTEMPTS: usize = 1024;

/// Neighbour offsets in lookup order: orthogonal first, then diagonal.
const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(1, 1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
];

/// Bounded cell matrix.
///
/// Cells are stored column-major (`x` outer, `y` inner), so iteration and
/// [`special_item_cells`](Self::special_item_cells) visit cells in
/// `(x, y)` lexicographic order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid<I> {
    width: i32,
    height: i32,
    cells: Vec<Cell<I>>,
    /// Number of `Normal` cells; terrain is fixed so this never changes.
    open_cells: usize,
}

impl<I> Grid<I> {
    /// Generates a randomized grid.
    ///
    /// For every coordinate two standard-normal samples are drawn from `rng`:
    /// first the item sample, then the terrain sample. A terrain sample whose
    /// magnitude exceeds `density.block_threshold` blocks the cell. An open
    /// cell whose item sample exceeds `density.item_threshold` receives an
    /// item from `draw_item`, which may draw from the same `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is not
    /// positive.
    pub fn generate<R, F>(
        width: i32,
        height: i32,
        density: Density,
        rng: &mut R,
        mut draw_item: F,
    ) -> Result<Self, GridError>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> I,
    {
        let grid = Self::from_fn(width, height, |_| {
            let item_sample: f64 = rng.sample(StandardNormal);
            let block_sample: f64 = rng.sample(StandardNormal);

            if block_sample.abs() > density.block_threshold {
                (CellKind::Blocked, None)
            } else if item_sample.abs() > density.item_threshold {
                (CellKind::Normal, Some(draw_item(&mut *rng)))
            } else {
                (CellKind::Normal, None)
            }
        })?;

        tracing::debug!(
            width,
            height,
            open = grid.open_cells,
            items = grid.special_item_cells().len(),
            "generated grid"
        );
        Ok(grid)
    }

    /// Generates a grid from a fresh `ChaCha8Rng` seeded with `seed`.
    ///
    /// # Errors
    ///
    /// See [`Grid::generate`].
    pub fn generate_seeded<F>(
        width: i32,
        height: i32,
        density: Density,
        seed: u64,
        draw_item: F,
    ) -> Result<Self, GridError>
    where
        F: FnMut(&mut ChaCha8Rng) -> I,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(width, height, density, &mut rng, draw_item)
    }

    /// Builds a grid by asking `layout` for the kind and item of every cell.
    ///
    /// `layout` is called in storage order (`x` outer, `y` inner). Items
    /// returned for blocked cells are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is not
    /// positive.
    pub fn from_fn<F>(width: i32, height: i32, mut layout: F) -> Result<Self, GridError>
    where
        F: FnMut(IVec2) -> (CellKind, Option<I>),
    {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(area(width, height));
        for x in 0..width {
            for y in 0..height {
                let position = IVec2::new(x, y);
                let (kind, item) = layout(position);
                cells.push(Cell::new(position, kind, item));
            }
        }
        let open_cells = cells.iter().filter(|c| c.is_traversable()).count();

        Ok(Self {
            width,
            height,
            cells,
            open_cells,
        })
    }

    /// Grid width (number of columns).
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height (number of rows).
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of `Normal` cells.
    #[must_use]
    pub const fn open_cell_count(&self) -> usize {
        self.open_cells
    }

    /// Returns true if `pos` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub const fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Looks up the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell<I>, GridError> {
        self.cell_at(IVec2::new(x, y))
    }

    /// Looks up the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn cell_at(&self, pos: IVec2) -> Result<&Cell<I>, GridError> {
        let index = self.index(pos)?;
        Ok(&self.cells[index])
    }

    /// Returns the in-bounds subset of the eight neighbours of `pos`.
    ///
    /// The result never contains `pos` itself. Callers should rely on
    /// membership, not on the order of the returned cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn adjacent_cells(&self, pos: IVec2) -> Result<Vec<&Cell<I>>, GridError> {
        self.index(pos)?;
        Ok(NEIGHBOUR_OFFSETS
            .iter()
            .map(|offset| pos + *offset)
            .filter_map(|neighbour| self.cell_at(neighbour).ok())
            .collect())
    }

    /// Returns true if `to` is one of the cells returned by
    /// [`adjacent_cells(from)`](Self::adjacent_cells).
    ///
    /// An out-of-bounds `from` has no neighbours.
    #[must_use]
    pub fn is_adjacent(&self, from: IVec2, to: IVec2) -> bool {
        self.adjacent_cells(from)
            .map(|cells| cells.iter().any(|cell| cell.position() == to))
            .unwrap_or(false)
    }

    /// Picks a uniformly random `Normal` cell.
    ///
    /// Uses rejection sampling (column first, then row) for up to
    /// [`MAX_FREE_CELL_ATTEMPTS`] draws, then falls back to a direct uniform
    /// pick among the open cells so the search always terminates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoFreeCell`] if the grid has no `Normal` cell.
    pub fn free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Cell<I>, GridError> {
        if self.open_cells == 0 {
            return Err(GridError::NoFreeCell);
        }

        for _ in 0..MAX_FREE_CELL_ATTEMPTS {
            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);
            let cell = self.cell(x, y)?;
            if cell.is_traversable() {
                return Ok(cell);
            }
        }

        tracing::debug!(
            attempts = MAX_FREE_CELL_ATTEMPTS,
            "free cell sampling exhausted, picking directly"
        );
        let pick = rng.gen_range(0..self.open_cells);
        self.cells
            .iter()
            .filter(|cell| cell.is_traversable())
            .nth(pick)
            .ok_or(GridError::NoFreeCell)
    }

    /// Returns every cell currently holding an item, in `(x, y)` order.
    #[must_use]
    pub fn special_item_cells(&self) -> Vec<&Cell<I>> {
        self.cells.iter().filter(|cell| cell.has_item()).collect()
    }

    /// Removes and returns the item resting at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn take_item(&mut self, pos: IVec2) -> Result<Option<I>, GridError> {
        let index = self.index(pos)?;
        Ok(self.cells[index].take_item())
    }

    /// Iterates over all cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell<I>> + '_ {
        self.cells.iter()
    }

    fn index(&self, pos: IVec2) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        // Both coordinates are non-negative once bounds are checked.
        #[allow(clippy::cast_sign_loss)]
        let (x, y, height) = (pos.x as usize, pos.y as usize, self.height as usize);
        Ok(x * height + y)
    }
}

#[allow(clippy::cast_sign_loss)]
fn area(width: i32, height: i32) -> usize {
    width as usize * height as usize
}
