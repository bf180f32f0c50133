//! The arena: grid, two combatant slots, and the turn loop.
//!
//! An [`Arena`] owns everything a fight touches: the grid, one seeded random
//! stream, both slots, the combatant sources, listeners and the pacer.
//! Combatants and listeners see the fight only through an
//! [`ArenaView`]; the arena is the sole mutator.
//!
//! # Turn Loop
//!
//! A fight moves through three phases ([`FightPhase`]):
//!
//! 1. **Idle**: sources and listeners are registered
//! 2. **Active**: both initial combatants were recruited onto free cells and
//!    `fight_started` was fired; each [`Arena::step`] plays one macro-turn
//! 3. **Ended**: a vote, a stop request or a forfeit ended the loop
//!
//! Each macro-turn increments the tick and selects the acting slot by parity
//! (even: slot one, odd: slot two). A defeated actor is replaced by its
//! source instead of playing. Otherwise the actor gets `actions_per_turn`
//! sub-turns, each resolved and reported to listeners. After the macro-turn
//! every listener votes; the fight goes on only if all vote to continue.
//!
//! # Determinism
//!
//! All randomness (map generation, the opening toss, placement and damage
//! rolls) is drawn from one `ChaCha8Rng` seeded with
//! [`ArenaConfig::seed`]. Given the same seed and deterministic combatants a
//! fight replays identically.
//!
//! # Example
//!
//! ```
//! use duelgrid_core::action::Action;
//! use duelgrid_core::arena::Arena;
//! use duelgrid_core::combatant::{Combatant, CombatantId, Recruit, RecruitError, Stats};
//! use duelgrid_core::config::ArenaConfig;
//! use duelgrid_core::event::FightEnd;
//! use duelgrid_core::item::{HealthPotion, Item};
//! use duelgrid_core::listener::TickLimit;
//! use duelgrid_core::view::ArenaView;
//! use rand::RngCore;
//!
//! struct Idle;
//!
//! impl Combatant for Idle {
//!     fn play_turn(&mut self, _view: &ArenaView<'_>, _tick: u64, _sub_turn: u32) -> Action {
//!         Action::Skip
//!     }
//! }
//!
//! let mut catalogue = |_: &mut dyn RngCore| -> Item { Box::new(HealthPotion { amount: 10 }) };
//! let mut arena = Arena::new(ArenaConfig::sized(12, 12).with_seed(3), &mut catalogue).unwrap();
//!
//! for id in [1, 2] {
//!     let stats = Stats::new(10, 5, 10, 2);
//!     arena
//!         .add_source(move || Ok::<_, RecruitError>(Recruit::new(CombatantId::new(id), stats, 100, Idle)))
//!         .unwrap();
//! }
//! arena.add_listener(TickLimit::new(10));
//!
//! let summary = arena.fight().unwrap();
//! assert_eq!(summary.ticks, 10);
//! assert_eq!(summary.end, FightEnd::Voted);
//! ```

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use duelgrid_map::{Cell, Grid, GridError};
use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::combatant::{Combatant, CombatantSource, Fighter};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::event::{ArenaEvent, FightEnd, FightSummary};
use crate::item::{Item, ItemCatalogue};
use crate::listener::FightListener;
use crate::pacing::{FixedPacing, NoPacing, PacePhase, Pacer};
use crate::resolver::{CombatResolver, MoveOutcome, MovementResolver, TurnContext};
use crate::slot::{Slot, SlotId};
use crate::state::CombatantState;
use crate::view::{ArenaView, OpponentInfo};

// =============================================================================
// Stop Handle
// =============================================================================

/// Cloneable request to end a fight at the next vote.
///
/// Safe to trigger from another thread while [`Arena::fight`] runs. A request
/// made before the fight starts still applies to it. The fight that ends on
/// the request consumes it, so a later fight on the same arena runs normally.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests the stop.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true while a stop request is pending.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Takes the pending request, returning true if there was one.
    fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

/// Lifecycle of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightPhase {
    /// Not started; sources may still be registered.
    Idle,
    /// Turn loop running.
    Active,
    /// Turn loop finished.
    Ended,
}

// =============================================================================
// Arena
// =============================================================================

/// A fight session between two combatant slots.
pub struct Arena {
    config: ArenaConfig,
    grid: Grid<Item>,
    rng: ChaCha8Rng,
    sources: [Option<Box<dyn CombatantSource>>; 2],
    slots: [Option<Slot>; 2],
    /// Decision logic per slot, kept apart from `slots` so a combatant can
    /// decide while its view borrows the slots.
    brains: [Option<Box<dyn Combatant>>; 2],
    listeners: Vec<Box<dyn FightListener>>,
    pacer: Box<dyn Pacer>,
    stop: StopHandle,
    phase: FightPhase,
    tick: u64,
    events: Vec<ArenaEvent>,
    defeats: [u32; 2],
    movement: MovementResolver,
    combat: CombatResolver,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("tick", &self.tick)
            .field("slots", &self.slots)
            .field(
                "sources",
                &self.sources.iter().filter(|s| s.is_some()).count(),
            )
            .field("listeners", &self.listeners.len())
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Arena {
    /// Creates an arena with a freshly generated grid.
    ///
    /// The grid is drawn from the fight's random stream, so the seed fixes
    /// both the map and the fight that follows.
    ///
    /// # Arguments
    ///
    /// * `config` - Dimensions, turn budget, density, seed and pacing
    /// * `catalogue` - Source of the items scattered on the grid
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Grid`] if the dimensions are not positive.
    pub fn new<C>(config: ArenaConfig, catalogue: &mut C) -> Result<Self, ArenaError>
    where
        C: ItemCatalogue + ?Sized,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::generate(
            config.width,
            config.height,
            config.density,
            &mut rng,
            |rng| catalogue.draw(rng),
        )?;
        Ok(Self::assemble(config, grid, rng))
    }

    /// Creates an arena on a prebuilt grid.
    ///
    /// The config's dimensions and density are ignored in favour of the grid.
    #[must_use]
    pub fn with_grid(config: ArenaConfig, grid: Grid<Item>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::assemble(config, grid, rng)
    }

    fn assemble(config: ArenaConfig, grid: Grid<Item>, rng: ChaCha8Rng) -> Self {
        let pacer: Box<dyn Pacer> = match config.pace() {
            Some(delay) => Box::new(FixedPacing(delay)),
            None => Box::new(NoPacing),
        };
        Self {
            config,
            grid,
            rng,
            sources: [None, None],
            slots: [None, None],
            brains: [None, None],
            listeners: Vec::new(),
            pacer,
            stop: StopHandle::default(),
            phase: FightPhase::Idle,
            tick: 0,
            events: Vec::new(),
            defeats: [0; 2],
            movement: MovementResolver::new(),
            combat: CombatResolver::new(),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a combatant source. The first fills slot one, the second
    /// slot two.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::SlotsFull`] once both slots have a source.
    pub fn add_source<S>(&mut self, source: S) -> Result<SlotId, ArenaError>
    where
        S: CombatantSource + 'static,
    {
        let slot = SlotId::ALL
            .into_iter()
            .find(|slot| self.sources[slot.index()].is_none())
            .ok_or(ArenaError::SlotsFull)?;
        self.sources[slot.index()] = Some(Box::new(source));
        debug!(slot = %slot, "registered combatant source");
        Ok(slot)
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: FightListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the pacer chosen from the config.
    pub fn set_pacer<P>(&mut self, pacer: P)
    where
        P: Pacer + 'static,
    {
        self.pacer = Box::new(pacer);
    }

    /// Handle that ends the fight at the next vote.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    // =========================================================================
    // Fight
    // =========================================================================

    /// Runs a whole fight and returns its summary.
    ///
    /// Blocks until a listener votes to stop, the [`StopHandle`] fires or a
    /// combatant forfeits. Without listeners or a stop request the fight
    /// never ends.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::MissingSource`] if fewer than two sources are registered
    /// - [`ArenaError::Recruit`] if a source fails; the fight is abandoned
    /// - [`ArenaError::Grid`] if no free cell is left for a recruit
    pub fn fight(&mut self) -> Result<FightSummary, ArenaError> {
        self.start()?;
        loop {
            match self.step() {
                Ok(Some(end)) => return Ok(self.summary(end)),
                Ok(None) => {}
                Err(err) => {
                    self.phase = FightPhase::Ended;
                    return Err(err);
                }
            }
        }
    }

    /// Recruits both initial combatants and fires `fight_started`.
    ///
    /// Resets the tick, defeat counters and slots. The grid and random stream
    /// carry over from any earlier fight.
    ///
    /// # Errors
    ///
    /// See [`Arena::fight`].
    pub fn start(&mut self) -> Result<(), ArenaError> {
        for slot in SlotId::ALL {
            if self.sources[slot.index()].is_none() {
                return Err(ArenaError::MissingSource(slot));
            }
        }

        self.tick = 0;
        self.defeats = [0; 2];
        self.slots = [None, None];
        self.brains = [None, None];
        for slot in SlotId::ALL {
            self.recruit(slot)?;
        }

        self.phase = FightPhase::Active;
        self.events.push(ArenaEvent::FightStarted {
            seed: self.config.seed,
        });
        info!(seed = self.config.seed, "fight started");

        let view = ArenaView::new(&self.grid, &self.slots, SlotId::for_tick(0), 0)?;
        for listener in &mut self.listeners {
            listener.fight_started(&view);
        }

        let winner = if self.rng.gen_bool(0.5) {
            SlotId::One
        } else {
            SlotId::Two
        };
        debug!(winner = %winner, "opening toss");
        self.events.push(ArenaEvent::OpeningToss { winner });
        Ok(())
    }

    /// Plays one macro-turn and holds the continuation vote.
    ///
    /// Returns `Some(end)` once the fight is over.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::NotActive`] outside an active fight, or a
    /// replacement error as described in [`Arena::fight`].
    pub fn step(&mut self) -> Result<Option<FightEnd>, ArenaError> {
        if self.phase != FightPhase::Active {
            return Err(ArenaError::NotActive);
        }

        self.tick += 1;
        let tick = self.tick;
        let actor = SlotId::for_tick(tick);

        let defeated = self.slots[actor.index()]
            .as_ref()
            .ok_or(ArenaError::EmptySlot(actor))?
            .fighter
            .is_defeated();
        if defeated {
            self.replace(actor)?;
        } else if let Some(offender) = self.play_turn(actor)? {
            return Ok(Some(self.finish(FightEnd::Forfeit { offender })));
        }

        self.pacer.pause(PacePhase::Turn);

        let view = ArenaView::new(&self.grid, &self.slots, actor, tick)?;
        let mut keep_fighting = true;
        for listener in &mut self.listeners {
            keep_fighting &= listener.continue_fighting(&view);
        }

        if self.stop.take() {
            Ok(Some(self.finish(FightEnd::Stopped)))
        } else if keep_fighting {
            Ok(None)
        } else {
            Ok(Some(self.finish(FightEnd::Voted)))
        }
    }

    /// Moves a slot's fighter directly onto `pos`, bypassing movement rules.
    ///
    /// Meant for setting up scenarios between [`Arena::start`] and the first
    /// [`Arena::step`].
    ///
    /// # Errors
    ///
    /// - [`ArenaError::EmptySlot`] if the slot holds no fighter
    /// - [`ArenaError::Grid`] if `pos` is outside the grid
    /// - [`ArenaError::Placement`] if the cell is blocked
    pub fn place(&mut self, slot: SlotId, pos: IVec2) -> Result<(), ArenaError> {
        let cell = self.grid.cell_at(pos)?;
        if !cell.is_traversable() {
            return Err(ArenaError::Placement {
                slot,
                x: pos.x,
                y: pos.y,
            });
        }
        let occupant = self.slots[slot.index()]
            .as_mut()
            .ok_or(ArenaError::EmptySlot(slot))?;
        occupant.fighter.set_position(pos);
        debug!(slot = %slot, position = ?pos, "placed fighter");
        Ok(())
    }

    fn play_turn(&mut self, actor: SlotId) -> Result<Option<SlotId>, ArenaError> {
        let tick = self.tick;
        self.slots[actor.index()]
            .as_mut()
            .ok_or(ArenaError::EmptySlot(actor))?
            .state
            .start_turn();

        for sub_turn in 0..self.config.actions_per_turn {
            let action = {
                let view = ArenaView::new(&self.grid, &self.slots, actor, tick)?;
                let brain = self.brains[actor.index()]
                    .as_mut()
                    .ok_or(ArenaError::EmptySlot(actor))?;
                brain.play_turn(&view, tick, sub_turn)
            };
            debug!(tick, slot = %actor, sub_turn, action = action.name(), "resolving action");

            let forfeited = self.resolve(actor, action)?;

            let view = ArenaView::new(&self.grid, &self.slots, actor, tick)?;
            for listener in &mut self.listeners {
                listener.turn_lapsed(&view, tick, sub_turn);
            }

            if forfeited {
                return Ok(Some(actor));
            }
            self.pacer.pause(PacePhase::SubTurn);
        }
        Ok(None)
    }

    /// Dispatches one action; returns true if the actor forfeited.
    fn resolve(&mut self, actor: SlotId, action: Action) -> Result<bool, ArenaError> {
        let (mine, theirs) = split_slots(&mut self.slots, actor)?;
        let brain = self.brains[actor.index()]
            .as_deref_mut()
            .ok_or(ArenaError::EmptySlot(actor))?;
        let mut ctx = TurnContext {
            grid: &mut self.grid,
            actor: mine,
            opponent: theirs,
            brain,
            rng: &mut self.rng,
            events: &mut self.events,
            tick: self.tick,
            slot: actor,
        };

        let forfeited = match action {
            Action::Move(path) => matches!(
                self.movement.resolve(&mut ctx, &path),
                MoveOutcome::Violation { .. }
            ),
            Action::Attack(target) => {
                self.combat.resolve(&mut ctx, target);
                false
            }
            Action::Skip => false,
            Action::SelfDestruct => {
                debug!(tick = self.tick, slot = %actor, "self-destruct is reserved");
                ctx.events.push(ArenaEvent::SelfDestructReserved {
                    tick: self.tick,
                    slot: actor,
                });
                false
            }
        };
        Ok(forfeited)
    }

    fn replace(&mut self, slot: SlotId) -> Result<(), ArenaError> {
        let fallen = self.slots[slot.index()]
            .as_ref()
            .ok_or(ArenaError::EmptySlot(slot))?
            .fighter
            .id();
        self.defeats[slot.index()] += 1;
        info!(tick = self.tick, slot = %slot, combatant = %fallen, "replacing defeated combatant");
        self.events.push(ArenaEvent::Defeated {
            tick: self.tick,
            slot,
            combatant: fallen,
        });
        self.recruit(slot)
    }

    fn recruit(&mut self, slot: SlotId) -> Result<(), ArenaError> {
        let source = self.sources[slot.index()]
            .as_mut()
            .ok_or(ArenaError::MissingSource(slot))?;
        let recruit = source.next_combatant().map_err(|source| {
            warn!(slot = %slot, error = %source, "combatant source failed");
            ArenaError::Recruit { slot, source }
        })?;

        let (id, name, health, stats, brain) = recruit.into_parts();
        let name = name.unwrap_or_else(|| format!("Unnamed {}", slot.number()));
        let position = self.grid.free_cell(&mut self.rng)?.position();

        info!(
            tick = self.tick,
            slot = %slot,
            combatant = %id,
            name = %name,
            position = ?position,
            "combatant entered the arena"
        );
        self.events.push(ArenaEvent::Spawned {
            tick: self.tick,
            slot,
            combatant: id,
            name: name.clone(),
            position,
        });
        self.slots[slot.index()] = Some(Slot::new(Fighter::new(id, name, position, health, stats)));
        self.brains[slot.index()] = Some(brain);
        Ok(())
    }

    fn finish(&mut self, end: FightEnd) -> FightEnd {
        self.phase = FightPhase::Ended;
        self.events.push(ArenaEvent::FightEnded {
            tick: self.tick,
            end,
        });
        info!(tick = self.tick, end = ?end, defeats = ?self.defeats, "fight ended");
        end
    }

    fn summary(&self, end: FightEnd) -> FightSummary {
        FightSummary {
            seed: self.config.seed,
            ticks: self.tick,
            end,
            defeats: self.defeats,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current macro-turn (0 before the first step).
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FightPhase {
        self.phase
    }

    /// Seed of the random stream.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.config.seed
    }

    /// The configuration the arena was built with.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid<Item> {
        &self.grid
    }

    /// The fighter in `slot`, if recruited.
    #[must_use]
    pub fn fighter(&self, slot: SlotId) -> Option<&Fighter> {
        self.slots[slot.index()].as_ref().map(Slot::fighter)
    }

    /// Step bookkeeping of `slot`, if recruited.
    #[must_use]
    pub fn state(&self, slot: SlotId) -> Option<&CombatantState> {
        self.slots[slot.index()].as_ref().map(Slot::state)
    }

    /// Both current fighters, slot one first. Empty slots are skipped.
    #[must_use]
    pub fn combatants(&self) -> Vec<&Fighter> {
        self.slots.iter().flatten().map(Slot::fighter).collect()
    }

    /// Replacements recruited for `slot` in the current fight.
    #[must_use]
    pub const fn defeats(&self, slot: SlotId) -> u32 {
        self.defeats[slot.index()]
    }

    /// View oriented around the slot that acts on the current tick.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::EmptySlot`] before both combatants are recruited.
    pub fn view(&self) -> Result<ArenaView<'_>, ArenaError> {
        ArenaView::new(&self.grid, &self.slots, SlotId::for_tick(self.tick), self.tick)
    }

    /// Snapshot of the opponent of the slot acting on the current tick.
    ///
    /// # Errors
    ///
    /// See [`Arena::view`].
    pub fn opponent(&self) -> Result<OpponentInfo, ArenaError> {
        Ok(self.view()?.opponent())
    }

    /// Bounds-checked cell lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell<Item>, GridError> {
        self.grid.cell(x, y)
    }

    /// In-bounds neighbours of `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `pos` is outside the grid.
    pub fn adjacent_cells(&self, pos: IVec2) -> Result<Vec<&Cell<Item>>, GridError> {
        self.grid.adjacent_cells(pos)
    }

    /// Cells currently holding an item.
    #[must_use]
    pub fn special_item_cells(&self) -> Vec<&Cell<Item>> {
        self.grid.special_item_cells()
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<ArenaEvent> {
        mem::take(&mut self.events)
    }
}

/// Borrows the acting slot and its opponent mutably at once.
fn split_slots(
    slots: &mut [Option<Slot>; 2],
    actor: SlotId,
) -> Result<(&mut Slot, &mut Slot), ArenaError> {
    let [one, two] = slots;
    let (mine, theirs) = match actor {
        SlotId::One => (one, two),
        SlotId::Two => (two, one),
    };
    let mine = mine.as_mut().ok_or(ArenaError::EmptySlot(actor))?;
    let theirs = theirs
        .as_mut()
        .ok_or(ArenaError::EmptySlot(actor.opponent()))?;
    Ok((mine, theirs))
}
