//! Normalized per-tick input state.
//!
//! The core consumes already-normalized input: discrete key-held booleans
//! for left/right/jump and a continuous analog axis pair with a dead zone.
//! Whatever drives the simulation (the demo loop in `main`, or a test)
//! writes this resource before each tick; no hardware is polled here.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Boolean key state with edge detection across ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolState {
    /// Whether the key is held this tick.
    pub active: bool,
    /// Whether the key went down this tick.
    pub just_pressed: bool,
    /// Whether the key went up this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Record the held state for the new tick, deriving the edge flags from
    /// the previous tick's state.
    pub fn update(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }
}

/// Raw analog axis pair plus its dead zone.
#[derive(Debug, Clone, Copy)]
pub struct AxisInput {
    pub x: f32,
    pub y: f32,
    /// Magnitude below which the stick reads as centered.
    pub deadzone: f32,
}

impl Default for AxisInput {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            deadzone: 0.2,
        }
    }
}

impl AxisInput {
    /// Dead-zone-normalized axis value.
    ///
    /// Zero inside the dead zone; outside it, the input direction scaled by
    /// `(magnitude - deadzone) / (1 - deadzone)` so the usable range maps
    /// smoothly onto the unit disc.
    pub fn smoothed(&self) -> Vec2 {
        let raw = Vec2::new(self.x, self.y);
        let magnitude = raw.length();
        if magnitude < self.deadzone {
            return Vec2::ZERO;
        }
        raw.normalize() * ((magnitude - self.deadzone) / (1.0 - self.deadzone))
    }
}

/// Resource holding the per-tick input relevant to the character.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub axis: AxisInput,
}

impl InputState {
    /// Discrete horizontal multiplier: -1, 0 or +1 from the held keys.
    pub fn keyboard_direction(&self) -> f32 {
        let mut direction = 0.0;
        if self.move_left.active {
            direction -= 1.0;
        }
        if self.move_right.active {
            direction += 1.0;
        }
        direction
    }

    /// True when any discrete horizontal key is held. Keyboard input takes
    /// priority over the analog axis when both are present.
    pub fn keyboard_active(&self) -> bool {
        self.move_left.active || self.move_right.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_boolstate_edges_across_ticks() {
        let mut state = BoolState::default();
        state.update(true);
        assert!(state.active && state.just_pressed && !state.just_released);
        state.update(true);
        assert!(state.active && !state.just_pressed);
        state.update(false);
        assert!(!state.active && state.just_released);
        state.update(false);
        assert!(!state.just_released);
    }

    #[test]
    fn test_axis_inside_deadzone_reads_zero() {
        let axis = AxisInput {
            x: 0.1,
            y: 0.1,
            deadzone: 0.2,
        };
        assert_eq!(axis.smoothed(), Vec2::ZERO);
    }

    #[test]
    fn test_axis_full_deflection_reads_unit() {
        let axis = AxisInput {
            x: 1.0,
            y: 0.0,
            deadzone: 0.2,
        };
        let smoothed = axis.smoothed();
        assert!((smoothed.x - 1.0).abs() < EPSILON);
        assert!(smoothed.y.abs() < EPSILON);
    }

    #[test]
    fn test_axis_rescales_past_the_deadzone() {
        let axis = AxisInput {
            x: 0.6,
            y: 0.0,
            deadzone: 0.2,
        };
        // (0.6 - 0.2) / (1 - 0.2) = 0.5 along +x.
        assert!((axis.smoothed().x - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_keyboard_direction_and_priority() {
        let mut input = InputState::default();
        assert_eq!(input.keyboard_direction(), 0.0);
        assert!(!input.keyboard_active());

        input.move_right.update(true);
        assert_eq!(input.keyboard_direction(), 1.0);
        assert!(input.keyboard_active());

        input.move_left.update(true);
        // Both held cancel out but the keyboard still has priority.
        assert_eq!(input.keyboard_direction(), 0.0);
        assert!(input.keyboard_active());
    }
}
