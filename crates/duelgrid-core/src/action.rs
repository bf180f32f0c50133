//! Actions a combatant may take in one sub-turn.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// The closed set of choices returned by [`Combatant::play_turn`](crate::combatant::Combatant::play_turn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Walk the given path, one adjacent cell per entry.
    Move(Vec<IVec2>),
    /// Attack whoever stands on the target cell.
    Attack(IVec2),
    /// Do nothing.
    Skip,
    /// Reserved; currently has no effect.
    SelfDestruct,
}

impl Action {
    /// Short lowercase name, used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::Attack(_) => "attack",
            Self::Skip => "skip",
            Self::SelfDestruct => "self_destruct",
        }
    }
}
