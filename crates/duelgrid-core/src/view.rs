//! Read-only window onto a running fight.
//!
//! Combatants and listeners never touch the arena directly. They receive an
//! [`ArenaView`] borrowed from the arena for the duration of one call, which
//! exposes the grid queries and snapshots of both fighters, oriented around
//! the acting slot.

use duelgrid_map::{Cell, Grid, GridError};
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::combatant::{CombatantId, Fighter};
use crate::error::ArenaError;
use crate::item::Item;
use crate::slot::{Slot, SlotId};

/// What the acting combatant may know about its opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentInfo {
    /// Opponent's slot.
    pub slot: SlotId,
    /// Opponent's identifier.
    pub id: CombatantId,
    /// Opponent's display name.
    pub name: String,
    /// Opponent's cell.
    pub position: IVec2,
    /// Opponent's health.
    pub health: i32,
    /// Whether the opponent is within the actor's attack range.
    pub in_range: bool,
}

/// Borrowed, read-only view of the arena.
#[derive(Debug, Clone, Copy)]
pub struct ArenaView<'a> {
    grid: &'a Grid<Item>,
    slots: [&'a Slot; 2],
    actor: SlotId,
    tick: u64,
}

impl<'a> ArenaView<'a> {
    /// Builds a view once both slots are filled.
    pub(crate) fn new(
        grid: &'a Grid<Item>,
        slots: &'a [Option<Slot>; 2],
        actor: SlotId,
        tick: u64,
    ) -> Result<Self, ArenaError> {
        let [one, two] = slots;
        let one = one.as_ref().ok_or(ArenaError::EmptySlot(SlotId::One))?;
        let two = two.as_ref().ok_or(ArenaError::EmptySlot(SlotId::Two))?;
        Ok(Self {
            grid,
            slots: [one, two],
            actor,
            tick,
        })
    }

    /// Current macro-turn.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Slot the view is oriented around.
    #[must_use]
    pub const fn actor(&self) -> SlotId {
        self.actor
    }

    /// The arena grid.
    #[must_use]
    pub const fn grid(&self) -> &'a Grid<Item> {
        self.grid
    }

    /// Bounds-checked cell lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Result<&'a Cell<Item>, GridError> {
        self.grid.cell(x, y)
    }

    /// In-bounds neighbours of `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn adjacent_cells(&self, pos: IVec2) -> Result<Vec<&'a Cell<Item>>, GridError> {
        self.grid.adjacent_cells(pos)
    }

    /// Cells currently holding an item.
    #[must_use]
    pub fn special_item_cells(&self) -> Vec<&'a Cell<Item>> {
        self.grid.special_item_cells()
    }

    /// The fighter in `slot`.
    #[must_use]
    pub const fn fighter(&self, slot: SlotId) -> &'a Fighter {
        let slot: &'a Slot = self.slots[slot.index()];
        &slot.fighter
    }

    /// The acting fighter.
    #[must_use]
    pub const fn me(&self) -> &'a Fighter {
        self.fighter(self.actor)
    }

    /// Snapshot of the actor's opponent.
    #[must_use]
    pub fn opponent(&self) -> OpponentInfo {
        let slot = self.actor.opponent();
        let them = self.fighter(slot);
        OpponentInfo {
            slot,
            id: them.id(),
            name: them.name().to_string(),
            position: them.position(),
            health: them.health(),
            in_range: self.me().reaches(them.position()),
        }
    }

    /// Steps the actor has taken this turn.
    #[must_use]
    pub const fn steps_taken(&self) -> u32 {
        let slot: &'a Slot = self.slots[self.actor.index()];
        slot.state.steps()
    }
}
