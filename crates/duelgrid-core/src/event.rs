//! Fight events and results.
//!
//! Everything the arena resolves is recorded as an [`ArenaEvent`]. Events
//! accumulate until drained with [`Arena::take_events`](crate::arena::Arena::take_events),
//! so a caller can replay, render or persist a fight without hooking into
//! the turn loop.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::combatant::CombatantId;
use crate::slot::SlotId;

/// A resolved occurrence in the fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// Both initial combatants are on the grid.
    FightStarted {
        /// Seed of the fight's random stream.
        seed: u64,
    },
    /// Result of the opening coin toss.
    OpeningToss {
        /// Slot that won the toss.
        winner: SlotId,
    },
    /// A combatant entered the grid.
    Spawned {
        /// Tick of the spawn (0 for the initial pair).
        tick: u64,
        /// Slot filled.
        slot: SlotId,
        /// The new combatant.
        combatant: CombatantId,
        /// Its display name.
        name: String,
        /// Starting cell.
        position: IVec2,
    },
    /// A path step was committed.
    Moved {
        /// Current tick.
        tick: u64,
        /// Acting slot.
        slot: SlotId,
        /// Cell left.
        from: IVec2,
        /// Cell entered.
        to: IVec2,
    },
    /// An item was removed from the grid by a moving combatant.
    ItemPickedUp {
        /// Current tick.
        tick: u64,
        /// Acting slot.
        slot: SlotId,
        /// Item name.
        item: String,
        /// Cell the item rested on.
        position: IVec2,
        /// Whether the combatant chose to apply it.
        used: bool,
    },
    /// An attack landed on the opponent.
    Attacked {
        /// Current tick.
        tick: u64,
        /// Attacking slot.
        slot: SlotId,
        /// Slot that took the hit, the attacker's own on a self-hit.
        target: SlotId,
        /// Health removed (zero when the defence roll won).
        damage: i32,
        /// Target health after the hit.
        health_after: i32,
    },
    /// A defeated combatant was removed from its slot.
    Defeated {
        /// Tick of the removal.
        tick: u64,
        /// Slot being refilled.
        slot: SlotId,
        /// The defeated combatant.
        combatant: CombatantId,
    },
    /// A move path contained a non-adjacent step.
    RuleViolation {
        /// Current tick.
        tick: u64,
        /// Offending slot.
        slot: SlotId,
        /// Last accepted path cell.
        from: IVec2,
        /// Rejected path cell.
        to: IVec2,
    },
    /// A self-destruct was requested; it has no effect.
    SelfDestructReserved {
        /// Current tick.
        tick: u64,
        /// Acting slot.
        slot: SlotId,
    },
    /// The turn loop stopped.
    FightEnded {
        /// Final tick.
        tick: u64,
        /// Why the fight ended.
        end: FightEnd,
    },
}

/// Reason a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightEnd {
    /// At least one listener voted to stop.
    Voted,
    /// A [`StopHandle`](crate::arena::StopHandle) requested the stop.
    Stopped,
    /// A combatant broke the movement rules and lost.
    Forfeit {
        /// The slot that broke the rules.
        offender: SlotId,
    },
}

/// Outcome of a finished fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightSummary {
    /// Seed the fight ran with.
    pub seed: u64,
    /// Macro-turns played.
    pub ticks: u64,
    /// Why the fight ended.
    pub end: FightEnd,
    /// Combatants replaced per slot, indexed by [`SlotId::index`].
    pub defeats: [u32; 2],
}

impl FightSummary {
    /// Replacements recruited for `slot`.
    #[must_use]
    pub const fn defeats(&self, slot: SlotId) -> u32 {
        self.defeats[slot.index()]
    }

    /// The losing slot of a forfeit, if the fight ended that way.
    #[must_use]
    pub const fn forfeited_by(&self) -> Option<SlotId> {
        match self.end {
            FightEnd::Forfeit { offender } => Some(offender),
            FightEnd::Voted | FightEnd::Stopped => None,
        }
    }
}
