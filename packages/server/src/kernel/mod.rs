//! Shared server dependencies.

pub mod deps;

pub use deps::{ServerDeps, SpawnTrigger};
