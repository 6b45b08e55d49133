//! Meteor Dodge - an arcade survival game core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (state, spawning, difficulty, collisions)
//! - `game`: Game phase state machine (NotStarted / Running / Ended)
//! - `driver`: Frame loop, cancellation and intent sources
//! - `autopilot`: Demo intent source that dodges on its own
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-score leaderboard persisted as JSON

pub mod autopilot;
pub mod driver;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Distance from the craft's top edge to the playfield bottom at spawn
    pub const PLAYER_START_OFFSET: f32 = 80.0;
    /// Translation per tick per active direction
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Shrinks the circular hitbox so near-misses don't count
    pub const HITBOX_MARGIN: f32 = 5.0;

    /// Obstacle speed floor at session start (units per frame)
    pub const INITIAL_OBSTACLE_SPEED: f32 = 3.0;
    /// Speed floor growth per frame (unbounded)
    pub const SPEED_INCREMENT: f32 = 0.0005;
    /// Upper bound (exclusive) of the random per-obstacle speed bonus
    pub const SPEED_BONUS: f32 = 2.0;

    /// Obstacle radius range [min, max)
    pub const OBSTACLE_MIN_RADIUS: f32 = 15.0;
    pub const OBSTACLE_MAX_RADIUS: f32 = 35.0;

    /// Spawn interval in frames
    pub const SPAWN_INTERVAL_INITIAL: f32 = 60.0;
    pub const SPAWN_INTERVAL_MIN: f32 = 20.0;
    pub const SPAWN_INTERVAL_DECREMENT: f32 = 0.01;

    /// Score accumulated per surviving frame
    pub const SCORE_PER_FRAME: f64 = 0.1;
}
