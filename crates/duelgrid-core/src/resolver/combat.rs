//! Combat resolver for attacks.
//!
//! An attack names a cell. The live combatant standing there is the target:
//! the opponent if it is on the cell, otherwise the attacker itself. The cell
//! must lie within the attacker's circular range, which always holds for its
//! own cell. Two uniform rolls
//! `U, V` in `[0, 1)` are then drawn from the fight's random stream:
//!
//! ```text
//! damage  = strength * U
//! defense = defense * (V / 0.75 + 0.25)
//! net     = damage - defense
//! ```
//!
//! A positive `net` is truncated and subtracted from the target's health,
//! which never drops below zero.

use glam::IVec2;
use rand::Rng;
use tracing::debug;

use crate::event::ArenaEvent;
use crate::slot::Slot;

use super::TurnContext;

/// How an attack ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Nobody attackable stands on the target cell.
    NoTarget,
    /// The target is there but beyond reach.
    OutOfRange,
    /// The rolls were made.
    Hit {
        /// Health removed, zero when defence won.
        damage: i32,
        /// Target health after the hit.
        health_after: i32,
    },
}

/// Computes the damage of one attack from its two rolls.
///
/// # Arguments
///
/// * `strength` - Attacker strength
/// * `defense` - Target defence
/// * `attack_roll` - Uniform sample in `[0, 1)` scaling strength
/// * `defense_roll` - Uniform sample in `[0, 1)` scaling defence
///
/// # Example
///
/// ```
/// use duelgrid_core::resolver::roll_damage;
///
/// // 20 * 0.5 - 4 * (0.0 / 0.75 + 0.25) = 10 - 1 = 9
/// assert_eq!(roll_damage(20, 4, 0.5, 0.0), 9);
/// assert_eq!(roll_damage(5, 100, 0.9, 0.9), 0);
/// ```
#[must_use]
pub fn roll_damage(strength: u32, defense: u32, attack_roll: f64, defense_roll: f64) -> i32 {
    let damage = f64::from(strength) * attack_roll;
    let defense = f64::from(defense) * (defense_roll / 0.75 + 0.25);
    let net = damage - defense;
    if net > 0.0 {
        // Clamped to i32::MAX first; the cast only drops the fraction.
        #[allow(clippy::cast_possible_truncation)]
        let net = net.min(f64::from(i32::MAX)).floor() as i32;
        net
    } else {
        0
    }
}

/// Resolves `Action::Attack`.
///
/// # Example
///
/// ```
/// use duelgrid_core::resolver::CombatResolver;
///
/// let _resolver = CombatResolver::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a new combat resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn resolve(&self, ctx: &mut TurnContext<'_>, target: IVec2) -> AttackOutcome {
        let occupies = |slot: &Slot| {
            slot.fighter.position() == target && !slot.fighter.is_defeated()
        };
        let self_hit = if occupies(&*ctx.opponent) {
            false
        } else if occupies(&*ctx.actor) {
            true
        } else {
            debug!(tick = ctx.tick, slot = %ctx.slot, target = ?target, "attack hit nothing");
            return AttackOutcome::NoTarget;
        };
        if !ctx.actor.fighter.reaches(target) {
            debug!(tick = ctx.tick, slot = %ctx.slot, target = ?target, "target out of range");
            return AttackOutcome::OutOfRange;
        }

        let strength = ctx.actor.fighter.stats().strength;
        let (defender, defender_slot) = if self_hit {
            (&mut ctx.actor.fighter, ctx.slot)
        } else {
            (&mut ctx.opponent.fighter, ctx.slot.opponent())
        };

        let attack_roll: f64 = ctx.rng.gen();
        let defense_roll: f64 = ctx.rng.gen();
        let damage = roll_damage(strength, defender.stats().defense, attack_roll, defense_roll);

        defender.reduce_health(damage);
        let health_after = defender.health();
        debug!(
            tick = ctx.tick,
            slot = %ctx.slot,
            target = %defender_slot,
            damage,
            health_after,
            "attack resolved"
        );
        ctx.events.push(ArenaEvent::Attacked {
            tick: ctx.tick,
            slot: ctx.slot,
            target: defender_slot,
            damage,
            health_after,
        });

        AttackOutcome::Hit {
            damage,
            health_after,
        }
    }
}
