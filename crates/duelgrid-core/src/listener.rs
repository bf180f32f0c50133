//! Fight listeners: notifications and the continuation vote.
//!
//! After every macro-turn the arena asks each registered [`FightListener`]
//! whether the fight should go on. Every listener is asked, even after one
//! has already voted to stop, and the fight continues only if all agree.

use crate::view::ArenaView;

/// Observer of a fight with a say in when it ends.
pub trait FightListener: Send {
    /// Called once both initial combatants are on the grid.
    fn fight_started(&mut self, view: &ArenaView<'_>) {
        let _ = view;
    }

    /// Called after each resolved sub-turn.
    fn turn_lapsed(&mut self, view: &ArenaView<'_>, tick: u64, sub_turn: u32) {
        let _ = (view, tick, sub_turn);
    }

    /// Votes on whether to play another macro-turn.
    fn continue_fighting(&mut self, view: &ArenaView<'_>) -> bool;
}

/// Stops the fight once `max_ticks` macro-turns have been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickLimit {
    max_ticks: u64,
}

impl TickLimit {
    /// Creates a limit of `max_ticks` macro-turns.
    #[must_use]
    pub const fn new(max_ticks: u64) -> Self {
        Self { max_ticks }
    }
}

impl FightListener for TickLimit {
    fn continue_fighting(&mut self, view: &ArenaView<'_>) -> bool {
        view.tick() < self.max_ticks
    }
}

/// Stops the fight as soon as either fighter is defeated, before any
/// replacement is recruited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopWhenDefeated;

impl FightListener for StopWhenDefeated {
    fn continue_fighting(&mut self, view: &ArenaView<'_>) -> bool {
        !view.me().is_defeated() && !view.fighter(view.actor().opponent()).is_defeated()
    }
}
