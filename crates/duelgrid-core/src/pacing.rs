//! Pacing between turns, for watching a fight unfold.

use std::thread;
use std::time::Duration;

/// Point in the turn loop at which the arena pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacePhase {
    /// After a sub-turn has been resolved and reported.
    SubTurn,
    /// After a whole macro-turn, before the vote.
    Turn,
}

/// Decides how long the turn loop waits at each [`PacePhase`].
pub trait Pacer: Send {
    /// Blocks the turn loop for this phase.
    fn pause(&mut self, phase: PacePhase);
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _phase: PacePhase) {}
}

/// Sleeps for the same duration at every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPacing(pub Duration);

impl Pacer for FixedPacing {
    fn pause(&mut self, _phase: PacePhase) {
        thread::sleep(self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn fixed_pacing_sleeps() {
        let mut pacer = FixedPacing(Duration::from_millis(5));
        let start = Instant::now();
        pacer.pause(PacePhase::SubTurn);
        pacer.pause(PacePhase::Turn);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn no_pacing_returns_immediately() {
        let mut pacer = NoPacing;
        let start = Instant::now();
        for _ in 0..1000 {
            pacer.pause(PacePhase::Turn);
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
