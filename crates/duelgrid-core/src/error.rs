//! Error types for the arena engine.

use duelgrid_map::GridError;
use thiserror::Error;

use crate::combatant::RecruitError;
use crate::slot::SlotId;

/// Errors raised while setting up or running a fight.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// A grid lookup or placement search failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Both slots already have a source.
    #[error("both combatant slots already have a source")]
    SlotsFull,

    /// The fight cannot start without a source for this slot.
    #[error("no combatant source registered for {0}")]
    MissingSource(SlotId),

    /// A source failed to produce a combatant.
    #[error("combatant source for {slot} failed")]
    Recruit {
        /// Slot being filled.
        slot: SlotId,
        /// Error returned by the source.
        #[source]
        source: RecruitError,
    },

    /// Direct placement onto a cell that cannot hold a combatant.
    #[error("cannot place {slot} on ({x}, {y}): cell is blocked")]
    Placement {
        /// Slot being moved.
        slot: SlotId,
        /// Target column.
        x: i32,
        /// Target row.
        y: i32,
    },

    /// The slot holds no combatant yet.
    #[error("{0} is empty")]
    EmptySlot(SlotId),

    /// Operation requires a fight in progress.
    #[error("no fight in progress")]
    NotActive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn grid_errors_convert() {
        let err: ArenaError = GridError::NoFreeCell.into();
        assert!(matches!(err, ArenaError::Grid(GridError::NoFreeCell)));
    }

    #[test]
    fn recruit_error_keeps_source() {
        let err = ArenaError::Recruit {
            slot: SlotId::Two,
            source: "out of fighters".into(),
        };
        assert_eq!(err.to_string(), "combatant source for slot 2 failed");
        assert_eq!(err.source().unwrap().to_string(), "out of fighters");
    }

    #[test]
    fn messages_name_the_slot() {
        assert_eq!(
            ArenaError::MissingSource(SlotId::One).to_string(),
            "no combatant source registered for slot 1"
        );
        assert_eq!(
            ArenaError::Placement {
                slot: SlotId::One,
                x: 2,
                y: 3
            }
            .to_string(),
            "cannot place slot 1 on (2, 3): cell is blocked"
        );
    }
}
