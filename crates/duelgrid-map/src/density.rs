//! Terrain and item density knobs for grid generation.

use serde::{Deserialize, Serialize};

/// Thresholds applied to standard-normal samples during generation.
///
/// A cell is blocked when `|sample| > block_threshold` and carries an item
/// when `|sample| > item_threshold`. Larger thresholds give sparser fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Density {
    /// Threshold for marking a cell `Blocked`.
    pub block_threshold: f64,
    /// Threshold for placing an item on a `Normal` cell.
    pub item_threshold: f64,
}

impl Density {
    /// Density that produces no obstacles and no items.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            block_threshold: f64::INFINITY,
            item_threshold: f64::INFINITY,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self {
            block_threshold: 2.1,
            item_threshold: 2.5,
        }
    }
}
