use bevy_ecs::prelude::Component;
use glam::Vec2;

/// 2D visual scale written by the tile alignment pass.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub scale: Vec2,
}

impl Scale {
    pub fn new(sx: f32, sy: f32) -> Self {
        Self {
            scale: Vec2::new(sx, sy),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
