//! Movement resolver.
//!
//! A `Move` carries a path. Each entry is one step and is checked in order:
//!
//! 1. The step counter is bumped; past `speed / 5` steps the rest of the path
//!    is dropped.
//! 2. A step that differs from the previous path cell must be one of its
//!    neighbours. A jump ends the move as a rule violation.
//! 3. Any item on the cell is removed, and applied if the combatant wants it.
//! 4. The fighter moves only if the cell is in bounds and `Normal`; other
//!    steps are skipped without ending the move.

use glam::IVec2;
use tracing::{debug, warn};

use crate::event::ArenaEvent;

use super::TurnContext;

/// How a move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Every step of the path was processed.
    Completed,
    /// The turn's step budget ran out before the path did.
    Exhausted,
    /// The path jumped from `from` to a non-adjacent `to`.
    Violation {
        /// Last accepted path cell.
        from: IVec2,
        /// Offending path cell.
        to: IVec2,
    },
}

/// Resolves `Action::Move` paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementResolver;

impl MovementResolver {
    /// Creates a new movement resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn resolve(&self, ctx: &mut TurnContext<'_>, path: &[IVec2]) -> MoveOutcome {
        let max_steps = ctx.actor.fighter.stats().max_steps();
        let mut previous = ctx.actor.fighter.position();

        for &step in path {
            ctx.actor.state.do_step();
            if ctx.actor.state.steps() > max_steps {
                debug!(tick = ctx.tick, slot = %ctx.slot, max_steps, "step budget exhausted");
                return MoveOutcome::Exhausted;
            }

            if step != previous && !ctx.grid.is_adjacent(previous, step) {
                warn!(
                    tick = ctx.tick,
                    slot = %ctx.slot,
                    combatant = %ctx.actor.fighter.id(),
                    from = ?previous,
                    to = ?step,
                    "non-adjacent step in move path"
                );
                ctx.events.push(ArenaEvent::RuleViolation {
                    tick: ctx.tick,
                    slot: ctx.slot,
                    from: previous,
                    to: step,
                });
                return MoveOutcome::Violation {
                    from: previous,
                    to: step,
                };
            }
            previous = step;

            Self::pick_up(ctx, step);

            let open = ctx
                .grid
                .cell_at(step)
                .is_ok_and(duelgrid_map::Cell::is_traversable);
            if open {
                let from = ctx.actor.fighter.position();
                ctx.actor.fighter.set_position(step);
                if from != step {
                    ctx.events.push(ArenaEvent::Moved {
                        tick: ctx.tick,
                        slot: ctx.slot,
                        from,
                        to: step,
                    });
                }
            } else {
                debug!(tick = ctx.tick, slot = %ctx.slot, to = ?step, "skipping closed cell");
            }
        }

        MoveOutcome::Completed
    }

    fn pick_up(ctx: &mut TurnContext<'_>, position: IVec2) {
        let Ok(Some(item)) = ctx.grid.take_item(position) else {
            return;
        };

        let used = ctx.brain.use_special_item(&*item);
        if used {
            item.apply(&mut ctx.actor.fighter);
        }
        debug!(
            tick = ctx.tick,
            slot = %ctx.slot,
            item = item.name(),
            used,
            "picked up item"
        );
        ctx.events.push(ArenaEvent::ItemPickedUp {
            tick: ctx.tick,
            slot: ctx.slot,
            item: item.name().to_string(),
            position,
            used,
        });
    }
}
