//! Demo/attract mode: an intent source that dodges on its own
//!
//! Looks at meteors falling through the craft's column and sidesteps the one
//! that will arrive first. With nothing threatening it drifts back home.

use glam::Vec2;

use crate::driver::IntentSource;
use crate::sim::{Intent, Obstacle, Player, SimState};
use crate::tuning::Tuning;

/// Frames of warning before a meteor counts as a threat
const LOOKAHEAD_FRAMES: f32 = 45.0;
/// Extra horizontal clearance kept around the craft
const CLEARANCE: f32 = 6.0;
/// Dead zone around the home position to avoid jitter
const HOME_SLACK: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    home: Vec2,
}

impl Autopilot {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            home: Player::spawn(tuning).pos,
        }
    }

    /// Frames until `obstacle` reaches the craft's top edge, if it is in our column
    fn time_to_impact(player: &Player, obstacle: &Obstacle) -> Option<f32> {
        let half_width = player.size.x / 2.0;
        let dx = (obstacle.pos.x - player.center().x).abs();
        if dx > obstacle.radius + half_width + CLEARANCE {
            return None;
        }
        let bottom = player.pos.y + player.size.y;
        if obstacle.pos.y - obstacle.radius > bottom {
            return None;
        }
        let gap = player.pos.y - (obstacle.pos.y + obstacle.radius);
        Some((gap / obstacle.speed.max(f32::EPSILON)).max(0.0))
    }
}

impl IntentSource for Autopilot {
    fn sample(&mut self, state: &SimState) -> Intent {
        let player = &state.player;
        let mut intent = Intent::IDLE;

        let threat = state
            .obstacles
            .iter()
            .filter_map(|o| Self::time_to_impact(player, o).map(|t| (t, o)))
            .filter(|(t, _)| *t < LOOKAHEAD_FRAMES)
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some((_, meteor)) = threat {
            let cx = player.center().x;
            let at_left_wall = player.pos.x <= 0.0;
            let at_right_wall = player.pos.x >= state.bounds.x - player.size.x;
            let go_left = if at_left_wall {
                false
            } else if at_right_wall {
                true
            } else {
                meteor.pos.x >= cx
            };
            intent.left = go_left;
            intent.right = !go_left;
            // Back off downward to buy time while sidestepping
            intent.down = true;
            return intent;
        }

        let offset = self.home - player.pos;
        intent.left = offset.x < -HOME_SLACK;
        intent.right = offset.x > HOME_SLACK;
        intent.up = offset.y < -HOME_SLACK;
        intent.down = offset.y > HOME_SLACK;
        intent
    }
}
