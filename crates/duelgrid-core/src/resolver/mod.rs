//! Action resolvers.
//!
//! Resolvers turn a combatant's chosen [`Action`](crate::action::Action) into
//! state changes. The arena dispatches each action variant to its resolver
//! together with a [`TurnContext`] that lends out exactly the state a
//! sub-turn may touch: the grid, both slots, the acting combatant's decision
//! logic, the shared random stream and the event log.
//!
//! # Invariants
//!
//! - Resolvers draw randomness only from the context's RNG, in a fixed order
//! - Positions change only onto in-bounds `Normal` cells
//! - Health changes only through the combat formula or item effects
//!
//! # Available Resolvers
//!
//! - [`MovementResolver`]: walks a path step by step, enforcing adjacency and speed
//! - [`CombatResolver`]: resolves attacks with the strength/defence rolls

mod combat;
mod movement;

pub use combat::{roll_damage, AttackOutcome, CombatResolver};
pub use movement::{MoveOutcome, MovementResolver};

use duelgrid_map::Grid;
use rand_chacha::ChaCha8Rng;

use crate::combatant::Combatant;
use crate::event::ArenaEvent;
use crate::item::Item;
use crate::slot::{Slot, SlotId};

/// Mutable state lent to a resolver for one sub-turn.
pub(crate) struct TurnContext<'a> {
    pub grid: &'a mut Grid<Item>,
    pub actor: &'a mut Slot,
    pub opponent: &'a mut Slot,
    pub brain: &'a mut dyn Combatant,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<ArenaEvent>,
    pub tick: u64,
    pub slot: SlotId,
}
