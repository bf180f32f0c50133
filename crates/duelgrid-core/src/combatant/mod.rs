//! Combatants: the engine-side record and the external capabilities.
//!
//! A combatant is split in two:
//! - [`Fighter`]: identity, name, position, health and [`Stats`], owned and
//!   mutated only by the [`Arena`](crate::arena::Arena)
//! - [`Combatant`]: the decision logic, supplied from outside, whose only
//!   effect on the fight is the [`Action`] it returns
//!
//! New combatants enter through a [`CombatantSource`], which hands the arena a
//! [`Recruit`] whenever a slot needs filling.
//!
//! # Example
//!
//! ```
//! use duelgrid_core::action::Action;
//! use duelgrid_core::combatant::{
//!     Combatant, CombatantId, CombatantSource, Recruit, RecruitError, Stats,
//! };
//! use duelgrid_core::view::ArenaView;
//!
//! struct Idle;
//!
//! impl Combatant for Idle {
//!     fn play_turn(&mut self, _view: &ArenaView<'_>, _tick: u64, _sub_turn: u32) -> Action {
//!         Action::Skip
//!     }
//! }
//!
//! let mut next_id = 0;
//! let mut source = move || {
//!     next_id += 1;
//!     Ok::<_, RecruitError>(Recruit::new(CombatantId::new(next_id), Stats::new(10, 5, 10, 2), 100, Idle))
//! };
//!
//! let recruit = source.next_combatant().unwrap();
//! assert_eq!(recruit.id(), CombatantId::new(1));
//! ```

pub mod stats;

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::item::SpecialItem;
use crate::view::ArenaView;

pub use stats::{Stats, SPEED_PER_STEP};

/// Unique identifier of a combatant, assigned by its [`CombatantSource`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(u64);

impl CombatantId {
    /// Creates an identifier from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CombatantId({})", self.0)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Fighter
// =============================================================================

/// Engine-owned state of a combatant on the grid.
///
/// Position changes only through arena resolution. Health and stats may also
/// be adjusted by [`SpecialItem`] effects, which the arena applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    id: CombatantId,
    name: String,
    position: IVec2,
    health: i32,
    stats: Stats,
}

impl Fighter {
    pub(crate) fn new(
        id: CombatantId,
        name: String,
        position: IVec2,
        health: i32,
        stats: Stats,
    ) -> Self {
        Self {
            id,
            name,
            position,
            health,
            stats,
        }
    }

    /// Identifier assigned by the source.
    #[must_use]
    pub const fn id(&self) -> CombatantId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cell coordinates.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Returns true once health has dropped to zero or below.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Current stats.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Mutable stats, for item effects.
    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Raises health by `amount`.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount);
    }

    /// Lowers health by `amount`, never below zero.
    pub fn reduce_health(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount).max(0);
    }

    /// Returns true if `target` lies within this fighter's circular attack range.
    #[must_use]
    pub fn reaches(&self, target: IVec2) -> bool {
        within_range(self.position, target, self.stats.range)
    }

    pub(crate) fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }
}

/// Squared Euclidean distance test, `|to - from|^2 <= range^2`.
#[must_use]
pub fn within_range(from: IVec2, to: IVec2, range: u32) -> bool {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);
    let range = i64::from(range);
    dx * dx + dy * dy <= range * range
}

// =============================================================================
// External capabilities
// =============================================================================

/// Decision logic of a combatant.
///
/// The arena calls [`play_turn`](Self::play_turn) once per sub-turn and
/// resolves the returned [`Action`]. Implementations observe the fight only
/// through the read-only [`ArenaView`].
pub trait Combatant: Send {
    /// Chooses the action for sub-turn `sub_turn` of macro-turn `tick`.
    fn play_turn(&mut self, view: &ArenaView<'_>, tick: u64, sub_turn: u32) -> Action;

    /// Decides whether a picked-up item takes effect. The item is removed from
    /// the grid either way. Defaults to always using it.
    fn use_special_item(&mut self, item: &dyn SpecialItem) -> bool {
        let _ = item;
        true
    }
}

/// Everything a source hands over for a new combatant.
pub struct Recruit {
    id: CombatantId,
    name: Option<String>,
    health: i32,
    stats: Stats,
    brain: Box<dyn Combatant>,
}

impl Recruit {
    /// Creates an unnamed recruit.
    pub fn new<C: Combatant + 'static>(
        id: CombatantId,
        stats: Stats,
        health: i32,
        brain: C,
    ) -> Self {
        Self {
            id,
            name: None,
            health,
            stats,
            brain: Box::new(brain),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Identifier of the recruit.
    #[must_use]
    pub const fn id(&self) -> CombatantId {
        self.id
    }

    /// Display name, if the source gave one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (CombatantId, Option<String>, i32, Stats, Box<dyn Combatant>) {
        (self.id, self.name, self.health, self.stats, self.brain)
    }
}

impl fmt::Debug for Recruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recruit")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("health", &self.health)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Error returned by a [`CombatantSource`] that cannot produce a recruit.
pub type RecruitError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies combatants for one arena slot.
///
/// Called once when the fight starts and again each time the slot's fighter
/// is defeated. Closures returning `Result<Recruit, RecruitError>` implement
/// this trait.
pub trait CombatantSource: Send {
    /// Produces the next combatant for this slot.
    ///
    /// # Errors
    ///
    /// Any error aborts the fight.
    fn next_combatant(&mut self) -> Result<Recruit, RecruitError>;
}

impl<F> CombatantSource for F
where
    F: FnMut() -> Result<Recruit, RecruitError> + Send,
{
    fn next_combatant(&mut self) -> Result<Recruit, RecruitError> {
        self()
    }
}
