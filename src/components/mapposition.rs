//! World-space positions.
//!
//! [`MapPosition`] is the logical world position written back from the
//! integer pixel position each tick. [`VisualPosition`] is the smoothed
//! position a renderer would consume; it trails the logical position at a
//! bounded speed (see [`crate::systems::visual::smooth_visual_positions`]).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Logical world-space position (in grid cells) of an entity's pivot.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Render-facing position, moved toward [`MapPosition`] at constant speed.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct VisualPosition {
    pub pos: Vec2,
}

impl VisualPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
