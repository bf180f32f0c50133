//! Combat statistics of a fighter.

use serde::{Deserialize, Serialize};

/// Divisor turning speed into the number of path steps allowed per turn.
pub const SPEED_PER_STEP: u32 = 5;

/// Fixed statistics supplied with every recruit.
///
/// Items may adjust these through [`Fighter::stats_mut`](super::Fighter::stats_mut).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    /// Upper bound of the attack roll.
    pub strength: u32,
    /// Base of the defence roll.
    pub defense: u32,
    /// Movement budget; every [`SPEED_PER_STEP`] points allow one path step per turn.
    pub speed: u32,
    /// Attack radius in cells (Euclidean).
    pub range: u32,
}

impl Stats {
    /// Creates a stat block.
    #[must_use]
    pub const fn new(strength: u32, defense: u32, speed: u32, range: u32) -> Self {
        Self {
            strength,
            defense,
            speed,
            range,
        }
    }

    /// Path steps a fighter may take in one turn, `floor(speed / 5)`.
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.speed / SPEED_PER_STEP
    }
}
