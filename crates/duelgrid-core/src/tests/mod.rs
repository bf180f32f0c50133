//! Test module for determinism and integration tests.
//!
//! This module exercises the whole arena rather than single resolvers:
//! - **Determinism tests**: Verify the same seed replays the same fight
//! - **Integration tests**: Drive the turn loop end to end
//! - **Helper functions**: Scripted combatants, sources and recording listeners
//!
//! # Test Structure
//!
//! - `determinism.rs`: Golden runs and seed reproducibility
//! - `integration.rs`: Turn order, replacement, forfeits and actions
//! - `helpers.rs`: Test setup utilities and factory functions

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
