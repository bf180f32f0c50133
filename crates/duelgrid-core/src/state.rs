//! Per-turn step bookkeeping for one combatant.

use serde::{Deserialize, Serialize};

use crate::combatant::CombatantId;

/// Step counter bound to a single combatant for as long as it holds its slot.
///
/// # Example
///
/// ```
/// use duelgrid_core::combatant::CombatantId;
/// use duelgrid_core::state::CombatantState;
///
/// let mut state = CombatantState::new(CombatantId::new(4));
/// state.do_step();
/// state.do_step();
/// assert_eq!(state.steps(), 2);
///
/// state.start_turn();
/// assert_eq!(state.steps(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantState {
    combatant: CombatantId,
    steps: u32,
}

impl CombatantState {
    /// Creates a fresh counter for `combatant`.
    #[must_use]
    pub const fn new(combatant: CombatantId) -> Self {
        Self {
            combatant,
            steps: 0,
        }
    }

    /// Resets the counter at the start of a macro-turn.
    pub fn start_turn(&mut self) {
        self.steps = 0;
    }

    /// Records one attempted path step.
    pub fn do_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    /// Path steps attempted since the turn started.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// The combatant this state belongs to.
    #[must_use]
    pub const fn combatant(&self) -> CombatantId {
        self.combatant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let state = CombatantState::new(CombatantId::new(1));
        assert_eq!(state.steps(), 0);
        assert_eq!(state.combatant(), CombatantId::new(1));
    }

    #[test]
    fn steps_accumulate_until_reset() {
        let mut state = CombatantState::new(CombatantId::new(1));
        for _ in 0..5 {
            state.do_step();
        }
        assert_eq!(state.steps(), 5);
        state.start_turn();
        assert_eq!(state.steps(), 0);
    }
}
