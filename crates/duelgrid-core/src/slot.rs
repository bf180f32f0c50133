//! The two combatant slots of an arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combatant::Fighter;
use crate::state::CombatantState;

/// One of the two positions a combatant can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// Filled by the first registered source; acts on even ticks.
    One,
    /// Filled by the second registered source; acts on odd ticks.
    Two,
}

impl SlotId {
    /// Both slots in registration order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Acting slot for `tick`: even ticks select [`SlotId::One`], odd ticks
    /// [`SlotId::Two`].
    #[must_use]
    pub const fn for_tick(tick: u64) -> Self {
        if tick % 2 == 0 {
            Self::One
        } else {
            Self::Two
        }
    }

    /// The other slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Zero-based index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// One-based number as shown to users.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.number())
    }
}

/// An occupied slot: the fighter and its per-turn bookkeeping.
///
/// The pair is replaced together when the fighter is defeated.
#[derive(Debug, Clone)]
pub struct Slot {
    pub(crate) fighter: Fighter,
    pub(crate) state: CombatantState,
}

impl Slot {
    pub(crate) fn new(fighter: Fighter) -> Self {
        let state = CombatantState::new(fighter.id());
        Self { fighter, state }
    }

    /// The fighter occupying the slot.
    #[must_use]
    pub const fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    /// Step bookkeeping for the fighter.
    #[must_use]
    pub const fn state(&self) -> &CombatantState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_selects_slot() {
        assert_eq!(SlotId::for_tick(0), SlotId::One);
        assert_eq!(SlotId::for_tick(1), SlotId::Two);
        assert_eq!(SlotId::for_tick(2), SlotId::One);
        assert_eq!(SlotId::for_tick(u64::MAX), SlotId::Two);
    }

    #[test]
    fn opponent_is_an_involution() {
        for slot in SlotId::ALL {
            assert_ne!(slot.opponent(), slot);
            assert_eq!(slot.opponent().opponent(), slot);
        }
    }

    #[test]
    fn index_and_number_agree() {
        for slot in SlotId::ALL {
            assert_eq!(usize::from(slot.number()), slot.index() + 1);
        }
        assert_eq!(SlotId::Two.to_string(), "slot 2");
    }
}
