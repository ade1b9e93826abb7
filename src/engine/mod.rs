//! Assignment engine orchestration.
//!
//! Ties the other components together: template expansion, one global
//! matching problem per question kind, reassembly into presentation
//! order, and the configured shuffle passes. All randomness flows
//! through a single generator built from the configured seed, so a
//! seeded run is reproducible end to end.

mod config;
mod runner;

pub use config::{EngineConfig, MAX_MISMATCH_PENALTY};
pub use runner::Engine;
