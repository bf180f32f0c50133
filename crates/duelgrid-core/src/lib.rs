//! # Duelgrid Core
//!
//! Turn-based duel engine for two combatants on a bounded grid.
//!
//! The crate provides the fight itself; who fights and when to stop are
//! supplied from outside:
//!
//! - **Combatants** ([`combatant::Combatant`]) choose one [`action::Action`]
//!   per sub-turn from a read-only [`view::ArenaView`]
//! - **Sources** ([`combatant::CombatantSource`]) recruit a fresh combatant
//!   whenever a slot's fighter is defeated
//! - **Listeners** ([`listener::FightListener`]) are told about every sub-turn
//!   and vote after each macro-turn on whether to continue
//!
//! ## Architecture
//!
//! - [`arena`]: session state and the turn loop
//! - [`resolver`]: movement and combat resolution
//! - [`event`]: the event log and fight summary
//! - [`duelgrid_map`]: the grid substrate, re-exported
//!
//! ## Usage
//!
//! ```
//! use duelgrid_core::prelude::*;
//! use rand::RngCore;
//!
//! struct Charger;
//!
//! impl Combatant for Charger {
//!     fn play_turn(&mut self, view: &ArenaView<'_>, _tick: u64, _sub_turn: u32) -> Action {
//!         let them = view.opponent();
//!         if them.in_range {
//!             Action::Attack(them.position)
//!         } else {
//!             let step = view.me().position() + (them.position - view.me().position()).signum();
//!             Action::Move(vec![step])
//!         }
//!     }
//! }
//!
//! let mut catalogue = |_: &mut dyn RngCore| -> Item { Box::new(HealthPotion { amount: 5 }) };
//! let mut arena = Arena::new(ArenaConfig::sized(10, 10).with_seed(1), &mut catalogue).unwrap();
//! for id in [1, 2] {
//!     arena
//!         .add_source(move || {
//!             Ok::<_, RecruitError>(Recruit::new(CombatantId::new(id), Stats::new(20, 5, 10, 1), 60, Charger))
//!         })
//!         .unwrap();
//! }
//! arena.add_listener(TickLimit::new(50));
//!
//! let summary = arena.fight().unwrap();
//! assert!(summary.ticks <= 50);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the grid crate for cell and coordinate types
pub use duelgrid_map;

pub mod action;
pub mod arena;
pub mod combatant;
pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod listener;
pub mod pacing;
pub mod resolver;
pub mod slot;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;

/// Common imports for writing combatants and running fights.
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::arena::{Arena, FightPhase, StopHandle};
    pub use crate::combatant::{
        Combatant, CombatantId, CombatantSource, Fighter, Recruit, RecruitError, Stats,
    };
    pub use crate::config::ArenaConfig;
    pub use crate::error::ArenaError;
    pub use crate::event::{ArenaEvent, FightEnd, FightSummary};
    pub use crate::item::{HealthPotion, Item, ItemCatalogue, SpecialItem, Whetstone};
    pub use crate::listener::{FightListener, StopWhenDefeated, TickLimit};
    pub use crate::pacing::{FixedPacing, NoPacing, PacePhase, Pacer};
    pub use crate::slot::SlotId;
    pub use crate::view::{ArenaView, OpponentInfo};
}
