//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror [`crate::consts`];
//! a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_start_offset: f32,
    pub player_speed: f32,
    pub hitbox_margin: f32,

    pub initial_obstacle_speed: f32,
    pub speed_increment: f32,
    pub speed_bonus: f32,
    pub obstacle_min_radius: f32,
    pub obstacle_max_radius: f32,

    pub spawn_interval_initial: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_decrement: f32,

    pub score_per_frame: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_start_offset: PLAYER_START_OFFSET,
            player_speed: PLAYER_SPEED,
            hitbox_margin: HITBOX_MARGIN,

            initial_obstacle_speed: INITIAL_OBSTACLE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_bonus: SPEED_BONUS,
            obstacle_min_radius: OBSTACLE_MIN_RADIUS,
            obstacle_max_radius: OBSTACLE_MAX_RADIUS,

            spawn_interval_initial: SPAWN_INTERVAL_INITIAL,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_decrement: SPAWN_INTERVAL_DECREMENT,

            score_per_frame: SCORE_PER_FRAME,
        }
    }
}

impl Tuning {
    /// Parse from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_min_radius", self.obstacle_min_radius),
            ("initial_obstacle_speed", self.initial_obstacle_speed),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("player_start_offset", self.player_start_offset),
            ("player_speed", self.player_speed),
            ("hitbox_margin", self.hitbox_margin),
            ("speed_increment", self.speed_increment),
            ("speed_bonus", self.speed_bonus),
            ("spawn_interval_decrement", self.spawn_interval_decrement),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.player_width > self.playfield_width || self.player_height > self.playfield_height {
            return Err(TuningError::Invalid("player does not fit in the playfield".into()));
        }
        if self.obstacle_max_radius < self.obstacle_min_radius {
            return Err(TuningError::Invalid(format!(
                "obstacle radius range is empty ({}..{})",
                self.obstacle_min_radius, self.obstacle_max_radius
            )));
        }
        if self.obstacle_max_radius * 2.0 > self.playfield_width {
            return Err(TuningError::Invalid("largest obstacle is wider than the playfield".into()));
        }
        // Spawn decision is `frame % floor(interval)`, so the floor must stay >= 1
        if self.spawn_interval_min < 1.0 {
            return Err(TuningError::Invalid(format!(
                "spawn_interval_min must be at least 1 frame, got {}",
                self.spawn_interval_min
            )));
        }
        if self.spawn_interval_initial < self.spawn_interval_min {
            return Err(TuningError::Invalid(
                "spawn_interval_initial is below spawn_interval_min".into(),
            ));
        }
        if self.score_per_frame <= 0.0 {
            return Err(TuningError::Invalid("score_per_frame must be positive".into()));
        }
        Ok(())
    }

    /// Every numeric field by name, widened to f64
    fn fields(&self) -> [(&'static str, f64); 16] {
        [
            ("playfield_width", self.playfield_width as f64),
            ("playfield_height", self.playfield_height as f64),
            ("player_width", self.player_width as f64),
            ("player_height", self.player_height as f64),
            ("player_start_offset", self.player_start_offset as f64),
            ("player_speed", self.player_speed as f64),
            ("hitbox_margin", self.hitbox_margin as f64),
            ("initial_obstacle_speed", self.initial_obstacle_speed as f64),
            ("speed_increment", self.speed_increment as f64),
            ("speed_bonus", self.speed_bonus as f64),
            ("obstacle_min_radius", self.obstacle_min_radius as f64),
            ("obstacle_max_radius", self.obstacle_max_radius as f64),
            ("spawn_interval_initial", self.spawn_interval_initial as f64),
            ("spawn_interval_min", self.spawn_interval_min as f64),
            ("spawn_interval_decrement", self.spawn_interval_decrement as f64),
            ("score_per_frame", self.score_per_frame),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_non_finite_fields_rejected() {
        let setters: [fn(&mut Tuning, f32); 15] = [
            |t, v| t.playfield_width = v,
            |t, v| t.playfield_height = v,
            |t, v| t.player_width = v,
            |t, v| t.player_height = v,
            |t, v| t.player_start_offset = v,
            |t, v| t.player_speed = v,
            |t, v| t.hitbox_margin = v,
            |t, v| t.initial_obstacle_speed = v,
            |t, v| t.speed_increment = v,
            |t, v| t.speed_bonus = v,
            |t, v| t.obstacle_min_radius = v,
            |t, v| t.obstacle_max_radius = v,
            |t, v| t.spawn_interval_initial = v,
            |t, v| t.spawn_interval_min = v,
            |t, v| t.spawn_interval_decrement = v,
        ];
        for (i, set) in setters.iter().enumerate() {
            for bad in [f32::NAN, f32::INFINITY] {
                let mut tuning = Tuning::default();
                set(&mut tuning, bad);
                assert!(
                    matches!(tuning.validate(), Err(TuningError::Invalid(_))),
                    "field #{i} accepted {bad}"
                );
            }
        }

        let mut tuning = Tuning::default();
        tuning.score_per_frame = f64::NAN;
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_negative_start_offset_rejected() {
        let result = Tuning::from_json(r#"{ "player_start_offset": -10.0 }"#);
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 5.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.spawn_interval_initial, SPAWN_INTERVAL_INITIAL);
        assert_eq!(tuning.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_zero_spawn_floor_rejected() {
        let result = Tuning::from_json(r#"{ "spawn_interval_min": 0.0, "spawn_interval_initial": 10.0 }"#);
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_initial_interval_below_min_rejected() {
        let result = Tuning::from_json(r#"{ "spawn_interval_initial": 10.0 }"#);
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Tuning::load("/definitely/not/here/tuning.json");
        assert!(matches!(result, Err(TuningError::Io(_))));
    }
}
