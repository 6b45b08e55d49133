//! Simulation state and core entity types
//!
//! A single [`SimState`] exists per session and is mutated in place by
//! [`super::step`]. Rendering reads it through [`SimState::snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session yet; only a start command is accepted
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen at the moment of collision
    Ended,
}

/// The player's craft (axis-aligned box, `pos` is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Spawn centered horizontally near the bottom of the playfield
    pub fn spawn(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let pos = Vec2::new(
            tuning.playfield_width / 2.0 - size.x / 2.0,
            tuning.playfield_height - tuning.player_start_offset,
        );
        let mut player = Self { pos, size };
        player.clamp_to(Vec2::new(tuning.playfield_width, tuning.playfield_height));
        player
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Keep the whole box inside `[0, bounds - size]`
    pub fn clamp_to(&mut self, bounds: Vec2) {
        self.pos = self.pos.clamp(Vec2::ZERO, (bounds - self.size).max(Vec2::ZERO));
    }
}

/// A falling meteor (`pos` is the circle center)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward speed in units per frame, fixed at spawn
    pub speed: f32,
}

impl Obstacle {
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the whole circle is below the playfield bottom edge
    pub fn is_below(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height + self.radius
    }
}

/// Difficulty scalars carried from frame to frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Frames between spawn opportunities (fractional, floored when used)
    pub spawn_interval: f32,
    /// Minimum speed given to newly spawned obstacles. Kept in f64 so the
    /// per-frame increment keeps registering as the floor grows.
    pub speed_floor: f64,
}

impl Difficulty {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            spawn_interval: tuning.spawn_interval_initial,
            speed_floor: tuning.initial_obstacle_speed as f64,
        }
    }
}

/// Complete state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles; order carries no meaning
    pub obstacles: Vec<Obstacle>,
    /// Accumulated score (floored for display)
    pub score: f64,
    /// Frames stepped since session start
    pub frame_count: u64,
    pub difficulty: Difficulty,
    /// Playfield size the player is clamped to
    pub bounds: Vec2,
}

impl SimState {
    /// Fresh running session
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::spawn(tuning),
            obstacles: Vec::new(),
            score: 0.0,
            frame_count: 0,
            difficulty: Difficulty::initial(tuning),
            bounds: Vec2::new(tuning.playfield_width, tuning.playfield_height),
        }
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    radius: o.radius,
                })
                .collect(),
            score: self.display_score(),
            frame_count: self.frame_count,
        }
    }
}

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Read-only view of a session for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub frame_count: u64,
}
