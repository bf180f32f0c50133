//! Arena configuration.

use std::time::Duration;

use duelgrid_map::Density;
use serde::{Deserialize, Serialize};

/// Parameters read once when an [`Arena`](crate::arena::Arena) is built.
///
/// Missing fields fall back to [`ArenaConfig::default`] when deserialized.
///
/// # Example
///
/// ```
/// use duelgrid_core::config::ArenaConfig;
///
/// let config: ArenaConfig = serde_json::from_str(r#"{ "width": 12, "seed": 9 }"#).unwrap();
/// assert_eq!(config.width, 12);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.seed, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Grid columns.
    pub width: i32,
    /// Grid rows.
    pub height: i32,
    /// Sub-turns each combatant gets per macro-turn.
    pub actions_per_turn: u32,
    /// Obstacle and item thresholds for grid generation.
    pub density: Density,
    /// Seed for every random draw in the fight.
    pub seed: u64,
    /// Pause after each sub-turn and macro-turn, in milliseconds. Zero disables pacing.
    pub pace_millis: u64,
}

impl ArenaConfig {
    /// Configuration for a `width x height` grid with other fields defaulted.
    #[must_use]
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replaces the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the sub-turn count.
    #[must_use]
    pub const fn with_actions_per_turn(mut self, actions: u32) -> Self {
        self.actions_per_turn = actions;
        self
    }

    /// Pacing delay, or `None` when pacing is off.
    #[must_use]
    pub const fn pace(&self) -> Option<Duration> {
        if self.pace_millis == 0 {
            None
        } else {
            Some(Duration::from_millis(self.pace_millis))
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            actions_per_turn: 3,
            density: Density::default(),
            seed: 0,
            pace_millis: 0,
        }
    }
}
