//! Test helpers: grids, scripted combatants, sources and recording listeners.
//!
//! This module provides factory functions and doubles that make writing
//! arena tests more ergonomic and consistent.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use duelgrid_map::{CellKind, Grid};
use glam::IVec2;
use rand::RngCore;

use crate::action::Action;
use crate::arena::Arena;
use crate::combatant::{
    within_range, Combatant, CombatantId, CombatantSource, Recruit, RecruitError, Stats,
};
use crate::config::ArenaConfig;
use crate::item::{HealthPotion, Item, SpecialItem};
use crate::listener::FightListener;
use crate::slot::SlotId;
use crate::view::ArenaView;

// =============================================================================
// Grids
// =============================================================================

/// Fully open grid without items.
pub fn open_grid(width: i32, height: i32) -> Grid<Item> {
    Grid::from_fn(width, height, |_| (CellKind::Normal, None)).unwrap()
}

/// Open grid with blocked cells and health potions at fixed spots.
pub fn grid_with(
    width: i32,
    height: i32,
    blocked: &[IVec2],
    potions: &[(IVec2, i32)],
) -> Grid<Item> {
    Grid::from_fn(width, height, |pos| {
        if blocked.contains(&pos) {
            return (CellKind::Blocked, None);
        }
        let item = potions
            .iter()
            .find(|(at, _)| *at == pos)
            .map(|&(_, amount)| Box::new(HealthPotion { amount }) as Item);
        (CellKind::Normal, item)
    })
    .unwrap()
}

/// Catalogue that always draws a small potion.
pub fn potion_catalogue(rng: &mut dyn RngCore) -> Item {
    let amount = 5 + i32::try_from(rng.next_u32() % 10).unwrap();
    Box::new(HealthPotion { amount })
}

// =============================================================================
// Combatants
// =============================================================================

/// Replays a fixed list of actions, then skips forever.
pub struct Scripted {
    actions: VecDeque<Action>,
    accept_items: bool,
}

impl Scripted {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            accept_items: true,
        }
    }

    pub fn idle() -> Self {
        Self::new([])
    }

    pub fn refusing_items(mut self) -> Self {
        self.accept_items = false;
        self
    }
}

impl Combatant for Scripted {
    fn play_turn(&mut self, _view: &ArenaView<'_>, _tick: u64, _sub_turn: u32) -> Action {
        self.actions.pop_front().unwrap_or(Action::Skip)
    }

    fn use_special_item(&mut self, _item: &dyn SpecialItem) -> bool {
        self.accept_items
    }
}

/// Attacks when the opponent is in range, otherwise takes one step toward it.
///
/// Among the open neighbours the one closest to the opponent wins; ties go to
/// the first neighbour in lookup order.
pub struct Chaser;

impl Combatant for Chaser {
    fn play_turn(&mut self, view: &ArenaView<'_>, _tick: u64, _sub_turn: u32) -> Action {
        let them = view.opponent();
        if them.in_range {
            return Action::Attack(them.position);
        }

        let here = view.me().position();
        let distance = |pos: IVec2| (them.position - pos).length_squared();
        let best = view
            .adjacent_cells(here)
            .unwrap_or_default()
            .into_iter()
            .filter(|cell| cell.is_traversable())
            .map(|cell| cell.position())
            .min_by_key(|&pos| distance(pos));

        match best {
            Some(step) if distance(step) < distance(here) => Action::Move(vec![step]),
            _ => Action::Skip,
        }
    }
}

/// Stats used by most scenarios: three steps per turn, reach of one cell.
pub const fn brawler() -> Stats {
    Stats::new(30, 5, 15, 1)
}

// =============================================================================
// Sources
// =============================================================================

/// Source recruiting `make(n)` for the n-th call, with ids `base + n`.
///
/// The returned counter tracks how many recruits were handed out.
pub fn counted_source<F>(base: u64, mut make: F) -> (impl CombatantSource, Arc<AtomicUsize>)
where
    F: FnMut(usize) -> (i32, Stats, Scripted) + Send + 'static,
{
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let source = move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let (health, stats, brain) = make(n);
        Ok::<_, RecruitError>(Recruit::new(
            CombatantId::new(base + n as u64),
            stats,
            health,
            brain,
        ))
    };
    (source, count)
}

/// Source of idle brawlers.
pub fn idle_source(base: u64) -> impl CombatantSource {
    counted_source(base, |_| (100, brawler(), Scripted::idle())).0
}

/// Source whose first recruit follows `actions`; later ones idle.
pub fn scripted_source(base: u64, stats: Stats, actions: Vec<Action>) -> impl CombatantSource {
    let mut actions = Some(actions);
    counted_source(base, move |_| {
        let brain = actions.take().map_or_else(Scripted::idle, Scripted::new);
        (100, stats, brain)
    })
    .0
}

/// Source of chasers sharing one stat block.
pub fn chaser_source(base: u64, stats: Stats, health: i32) -> impl CombatantSource {
    let mut next = base;
    move || {
        next += 1;
        Ok::<_, RecruitError>(
            Recruit::new(CombatantId::new(next), stats, health, Chaser).named(format!("chaser {next}")),
        )
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// A listener call, as recorded by [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Started,
    Lapsed {
        tick: u64,
        sub_turn: u32,
        actor: SlotId,
    },
    Vote {
        tick: u64,
    },
}

/// Records every call and votes to continue for `ticks` macro-turns.
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
    ticks: u64,
}

impl Recorder {
    pub fn new(ticks: u64) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
                ticks,
            },
            calls,
        )
    }
}

impl FightListener for Recorder {
    fn fight_started(&mut self, _view: &ArenaView<'_>) {
        self.calls.lock().unwrap().push(Call::Started);
    }

    fn turn_lapsed(&mut self, view: &ArenaView<'_>, tick: u64, sub_turn: u32) {
        self.calls.lock().unwrap().push(Call::Lapsed {
            tick,
            sub_turn,
            actor: view.actor(),
        });
    }

    fn continue_fighting(&mut self, view: &ArenaView<'_>) -> bool {
        self.calls.lock().unwrap().push(Call::Vote { tick: view.tick() });
        view.tick() < self.ticks
    }
}

/// Always casts the same vote and counts how often it was asked.
pub struct Voter {
    vote: bool,
    asked: Arc<AtomicUsize>,
}

impl Voter {
    pub fn new(vote: bool) -> (Self, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        (
            Self {
                vote,
                asked: Arc::clone(&asked),
            },
            asked,
        )
    }
}

impl FightListener for Voter {
    fn continue_fighting(&mut self, _view: &ArenaView<'_>) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.vote
    }
}

/// Records `(tick, health one, health two)` at every vote.
pub struct HealthTrace {
    trace: Arc<Mutex<Vec<(u64, i32, i32)>>>,
}

impl HealthTrace {
    pub fn new() -> (Self, Arc<Mutex<Vec<(u64, i32, i32)>>>) {
        let trace = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                trace: Arc::clone(&trace),
            },
            trace,
        )
    }
}

impl FightListener for HealthTrace {
    fn continue_fighting(&mut self, view: &ArenaView<'_>) -> bool {
        self.trace.lock().unwrap().push((
            view.tick(),
            view.fighter(SlotId::One).health(),
            view.fighter(SlotId::Two).health(),
        ));
        true
    }
}

// =============================================================================
// Arena Setup
// =============================================================================

/// Arena on `grid` with both sources registered, started, and fighters placed.
pub fn staged_arena(
    grid: Grid<Item>,
    actions_per_turn: u32,
    one: (impl CombatantSource + 'static, IVec2),
    two: (impl CombatantSource + 'static, IVec2),
) -> Arena {
    let config = ArenaConfig::sized(grid.width(), grid.height())
        .with_seed(17)
        .with_actions_per_turn(actions_per_turn);
    let mut arena = Arena::with_grid(config, grid);
    arena.add_source(one.0).unwrap();
    arena.add_source(two.0).unwrap();
    arena.start().unwrap();
    arena.place(SlotId::One, one.1).unwrap();
    arena.place(SlotId::Two, two.1).unwrap();
    arena
}

/// Returns true if the two fighters of `arena` can reach each other.
pub fn in_reach(arena: &Arena) -> bool {
    let one = arena.fighter(SlotId::One).unwrap();
    let two = arena.fighter(SlotId::Two).unwrap();
    within_range(one.position(), two.position(), one.stats().range)
}
