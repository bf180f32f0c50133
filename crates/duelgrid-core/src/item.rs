//! Special items: pickable payloads resting on grid cells.
//!
//! The arena only knows the [`SpecialItem`] trait. Concrete effects come from
//! an [`ItemCatalogue`] supplied when the arena is built.

use std::fmt;

use rand::RngCore;

use crate::combatant::Fighter;

/// A pickable item whose effect targets the fighter that picks it up.
pub trait SpecialItem: fmt::Debug + Send {
    /// Display name for logs and events.
    fn name(&self) -> &str;

    /// Applies the item's effect.
    fn apply(&self, fighter: &mut Fighter);
}

/// Item payload stored in the arena grid.
pub type Item = Box<dyn SpecialItem>;

/// Produces items while the grid is generated.
///
/// Any `FnMut(&mut dyn RngCore) -> Item` closure is a catalogue.
pub trait ItemCatalogue {
    /// Draws the next item.
    fn draw(&mut self, rng: &mut dyn RngCore) -> Item;
}

impl<F> ItemCatalogue for F
where
    F: FnMut(&mut dyn RngCore) -> Item,
{
    fn draw(&mut self, rng: &mut dyn RngCore) -> Item {
        self(rng)
    }
}

/// Restores a fixed amount of health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPotion {
    /// Health restored on use.
    pub amount: i32,
}

impl SpecialItem for HealthPotion {
    fn name(&self) -> &str {
        "health potion"
    }

    fn apply(&self, fighter: &mut Fighter) {
        fighter.heal(self.amount);
    }
}

/// Permanently raises strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whetstone {
    /// Strength added on use.
    pub bonus: u32,
}

impl SpecialItem for Whetstone {
    fn name(&self) -> &str {
        "whetstone"
    }

    fn apply(&self, fighter: &mut Fighter) {
        let stats = fighter.stats_mut();
        stats.strength = stats.strength.saturating_add(self.bonus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, Stats};
    use glam::IVec2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn fighter() -> Fighter {
        Fighter::new(
            CombatantId::new(1),
            "tester".into(),
            IVec2::ZERO,
            50,
            Stats::new(10, 5, 10, 1),
        )
    }

    #[test]
    fn potion_heals() {
        let mut f = fighter();
        HealthPotion { amount: 20 }.apply(&mut f);
        assert_eq!(f.health(), 70);
    }

    #[test]
    fn whetstone_sharpens() {
        let mut f = fighter();
        Whetstone { bonus: 4 }.apply(&mut f);
        assert_eq!(f.stats().strength, 14);
    }

    #[test]
    fn closure_catalogue_uses_rng() {
        let mut catalogue = |rng: &mut dyn RngCore| -> Item {
            Box::new(HealthPotion {
                amount: rng.gen_range(1..=10),
            })
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let item = catalogue.draw(&mut rng);
        assert_eq!(item.name(), "health potion");
    }
}
