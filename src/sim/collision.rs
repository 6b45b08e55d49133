//! Player/meteor collision test
//!
//! The craft is drawn as a triangle inside a `width x height` box, but for
//! collisions it is approximated by a circle at the box center with radius
//! `min(width, height) / 2 - margin`. The margin shrinks the hitbox so
//! grazing passes don't count. Because the box is taller than it is wide, the
//! circle is tight horizontally and generous vertically. This is the one place
//! where visual and logical shape diverge.

use super::state::{Obstacle, Player};

/// Radius of the circle standing in for the player box
#[inline]
pub fn effective_radius(player: &Player, margin: f32) -> f32 {
    player.size.x.min(player.size.y) / 2.0 - margin
}

/// True iff the circles strictly overlap (touching is a miss)
pub fn collides(player: &Player, obstacle: &Obstacle, margin: f32) -> bool {
    let distance = player.center().distance(obstacle.pos);
    distance < obstacle.radius + effective_radius(player, margin)
}
