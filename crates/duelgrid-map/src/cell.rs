//! Grid cells.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Terrain kind of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open ground; combatants may stand here.
    Normal,
    /// Obstacle; never traversable.
    Blocked,
}

impl CellKind {
    /// Returns true if a combatant may stand on this kind of cell.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Blocked => write!(f, "Blocked"),
        }
    }
}

/// A single grid cell.
///
/// Cells are owned by their [`Grid`](crate::Grid) and never move; the stored
/// coordinates always equal the cell's index in the grid. `I` is the payload
/// type for pickable items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell<I> {
    position: IVec2,
    kind: CellKind,
    item: Option<I>,
}

impl<I> Cell<I> {
    pub(crate) fn new(position: IVec2, kind: CellKind, item: Option<I>) -> Self {
        // Items only ever rest on open ground.
        let item = if kind.is_traversable() { item } else { None };
        Self {
            position,
            kind,
            item,
        }
    }

    /// Column of this cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    /// Row of this cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// Coordinates of this cell.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Terrain kind.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Returns true if this cell is `Normal`.
    #[must_use]
    pub const fn is_traversable(&self) -> bool {
        self.kind.is_traversable()
    }

    /// The item resting on this cell, if any.
    #[must_use]
    pub const fn item(&self) -> Option<&I> {
        self.item.as_ref()
    }

    /// Returns true if an item rests on this cell.
    #[must_use]
    pub const fn has_item(&self) -> bool {
        self.item.is_some()
    }

    pub(crate) fn take_item(&mut self) -> Option<I> {
        self.item.take()
    }
}

impl<I> fmt::Display for Cell<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.position.x, self.position.y, self.kind)
    }
}
