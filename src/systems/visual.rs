//! Visual position smoothing.
//!
//! The rendered position trails the logical position at a constant speed in
//! world units per second, snapping once it is within one step. The step is
//! scaled by the actual frame delta, so the smoothing behaves the same at
//! any frame rate.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::character::PixelCharacter;
use crate::components::mapposition::{MapPosition, VisualPosition};
use crate::resources::worldtime::WorldTime;

/// Move `current` toward `target` by at most `step`.
pub(crate) fn move_towards(current: Vec2, target: Vec2, step: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= step || distance == 0.0 {
        target
    } else {
        current + delta / distance * step
    }
}

pub fn smooth_visual_positions(
    time: Res<WorldTime>,
    mut query: Query<(&PixelCharacter, &MapPosition, &mut VisualPosition)>,
) {
    for (character, target, mut visual) in query.iter_mut() {
        let step = character.tuning.visual_speed * time.delta;
        visual.pos = move_towards(visual.pos, target.pos, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_towards_advances_by_step() {
        let next = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
        assert!((next.x - 1.0).abs() < 1e-6);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn test_move_towards_snaps_within_one_step() {
        let target = Vec2::new(0.5, 0.0);
        assert_eq!(move_towards(Vec2::ZERO, target, 1.0), target);
    }

    #[test]
    fn test_move_towards_is_stationary_at_target() {
        let target = Vec2::new(3.0, 4.0);
        assert_eq!(move_towards(target, target, 1.0), target);
    }

    #[test]
    fn test_step_scales_with_distance_direction() {
        let next = move_towards(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        // One unit along the normalized direction (0.6, 0.8).
        assert!((next.x - 0.6).abs() < 1e-6);
        assert!((next.y - 0.8).abs() < 1e-6);
    }
}
