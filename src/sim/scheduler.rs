//! Difficulty progression and spawn policy
//!
//! Each frame the scheduler answers two questions: does a meteor spawn now,
//! and what are next frame's spawn interval and speed floor. Inserting the
//! obstacle into the live set is left to the stepper.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Difficulty, Obstacle};
use crate::tuning::Tuning;

/// Outcome of one scheduling decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDecision {
    pub spawn: bool,
    /// Difficulty to carry into the next frame
    pub next: Difficulty,
}

/// Spawn policy consulted once per frame
pub trait Scheduler {
    /// Decide for `frame_count` given this frame's difficulty
    fn plan(&mut self, frame_count: u64, current: Difficulty) -> SpawnDecision;

    /// Build a new obstacle guaranteed at least `speed_floor`
    fn spawn(&mut self, speed_floor: f64) -> Obstacle;
}

/// The game's standard scheduler: steady ramp plus randomized meteors
#[derive(Debug, Clone)]
pub struct DifficultyScheduler<R> {
    tuning: Tuning,
    rng: R,
}

impl<R: RandomSource> DifficultyScheduler<R> {
    pub fn new(tuning: Tuning, rng: R) -> Self {
        Self { tuning, rng }
    }
}

impl<R: RandomSource> Scheduler for DifficultyScheduler<R> {
    fn plan(&mut self, frame_count: u64, current: Difficulty) -> SpawnDecision {
        let t = &self.tuning;
        SpawnDecision {
            spawn: should_spawn(frame_count, current.spawn_interval, t.spawn_interval_min),
            next: ramp(current, t),
        }
    }

    fn spawn(&mut self, speed_floor: f64) -> Obstacle {
        let t = &self.tuning;
        let radius =
            t.obstacle_min_radius + self.rng.next_f32() * (t.obstacle_max_radius - t.obstacle_min_radius);
        // Keep the whole circle inside the playfield width
        let x = self.rng.next_f32() * (t.playfield_width - radius * 2.0) + radius;
        let speed = (speed_floor + (self.rng.next_f32() * t.speed_bonus) as f64) as f32;
        Obstacle {
            pos: Vec2::new(x, -radius),
            radius,
            speed,
        }
    }
}

/// `frame_count mod floor(interval) == 0`, with the interval clamped to `min_interval`
/// (and never below one frame) so the modulo is always defined
pub fn should_spawn(frame_count: u64, interval: f32, min_interval: f32) -> bool {
    let period = interval.max(min_interval).floor().max(1.0) as u64;
    frame_count % period == 0
}

/// One frame of difficulty growth: interval shrinks toward its minimum,
/// the speed floor rises without bound
pub fn ramp(current: Difficulty, tuning: &Tuning) -> Difficulty {
    Difficulty {
        spawn_interval: (current.spawn_interval - tuning.spawn_interval_decrement)
            .max(tuning.spawn_interval_min),
        speed_floor: current.speed_floor + tuning.speed_increment as f64,
    }
}
