//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per displayed frame, no wall-clock time
//! - Randomness only through an injected [`RandomSource`]
//! - No rendering, input or storage dependencies

pub mod collision;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod step;

pub use collision::{collides, effective_radius};
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use scheduler::{DifficultyScheduler, Scheduler, SpawnDecision, ramp, should_spawn};
pub use state::{
    Difficulty, GamePhase, Obstacle, ObstacleView, Player, SimState, Snapshot,
};
pub use step::{Intent, StepOutcome, step};
