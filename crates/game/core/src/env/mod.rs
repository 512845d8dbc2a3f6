//! Environment collaborators consumed by the rules.
//!
//! The only collaborator the rules need is a source of dice rolls.

pub mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng, shuffle};
