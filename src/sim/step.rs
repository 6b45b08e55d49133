//! Per-frame simulation step
//!
//! Order within a frame: move the craft, consult the scheduler, let every
//! meteor fall, test collisions, prune meteors that left the playfield,
//! then award the survival score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::scheduler::Scheduler;
use super::state::{GamePhase, SimState};
use crate::tuning::Tuning;

/// Directional intent sampled once per step; flags are independent so
/// diagonals (and opposing pairs, which cancel) are allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Intent {
    pub const IDLE: Intent = Intent {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Unit-per-axis displacement direction (screen coords, +y is down)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Result of stepping a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Frame completed, keep scheduling
    Continue,
    /// A meteor hit the craft; carries the displayed score at impact
    Collided { final_score: u64 },
    /// State was not Running; nothing changed
    Ignored,
}

/// Advance a running session by one frame.
///
/// Calls on a state that isn't [`GamePhase::Running`] are ignored.
pub fn step<S: Scheduler + ?Sized>(
    state: &mut SimState,
    intent: Intent,
    scheduler: &mut S,
    tuning: &Tuning,
) -> StepOutcome {
    if state.phase != GamePhase::Running {
        return StepOutcome::Ignored;
    }

    // Clamping makes a flag held against a wall a no-op for that axis
    state.player.pos += intent.direction() * tuning.player_speed;
    state.player.clamp_to(state.bounds);

    state.frame_count += 1;
    let decision = scheduler.plan(state.frame_count, state.difficulty);
    if decision.spawn {
        let obstacle = scheduler.spawn(state.difficulty.speed_floor);
        log::trace!(
            "frame {}: spawned meteor r={:.1} x={:.1} v={:.2}",
            state.frame_count,
            obstacle.radius,
            obstacle.pos.x,
            obstacle.speed
        );
        state.obstacles.push(obstacle);
    }
    state.difficulty = decision.next;

    for obstacle in &mut state.obstacles {
        obstacle.fall();
    }

    let player = state.player;
    if let Some(hit) = state
        .obstacles
        .iter()
        .position(|o| collides(&player, o, tuning.hitbox_margin))
    {
        state.obstacles.swap_remove(hit);
        state.phase = GamePhase::Ended;
        return StepOutcome::Collided {
            final_score: state.display_score(),
        };
    }

    let bottom = state.bounds.y;
    state.obstacles.retain(|o| !o.is_below(bottom));

    // Derived from the frame count so the floored display never drifts
    state.score = state.frame_count as f64 * tuning.score_per_frame;

    StepOutcome::Continue
}
