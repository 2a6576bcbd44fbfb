//! Pixel-precise character state.
//!
//! A character owns one [`PixelTile`](crate::components::tile::PixelTile) as
//! its physical footprint and carries the integer pixel position, velocity,
//! jump state and per-obstacle contact bookkeeping advanced every tick by
//! [`crate::systems::character::update_characters`].

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;
use rustc_hash::FxHashMap;

/// Sides of the character currently touching an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ContactNormals(u8);

impl ContactNormals {
    pub const NONE: ContactNormals = ContactNormals(0);
    pub const LEFT_WALL: ContactNormals = ContactNormals(1 << 0);
    pub const RIGHT_WALL: ContactNormals = ContactNormals(1 << 1);
    pub const CEILING: ContactNormals = ContactNormals(1 << 2);
    pub const GROUND: ContactNormals = ContactNormals(1 << 3);

    pub fn contains(self, other: ContactNormals) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: ContactNormals) {
        self.0 |= other.0;
    }

    #[must_use]
    pub fn union(self, other: ContactNormals) -> ContactNormals {
        ContactNormals(self.0 | other.0)
    }

    /// Bits in `other` that are not yet set in `self`.
    #[must_use]
    pub fn added_by(self, other: ContactNormals) -> ContactNormals {
        ContactNormals(other.0 & !self.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Projectile-motion-matched jump profile.
///
/// The arc is derived from the run speed and two fixed constants so the jump
/// reaches the same peak height at the same horizontal distance regardless
/// of speed tuning. Vertical velocity at time `t` since the jump started is
/// `gravity * t + initial_velocity`.
#[derive(Clone, Copy, Debug)]
pub struct JumpArc {
    pub time_to_peak: f32,
    pub initial_velocity: f32,
    pub gravity: f32,
}

impl JumpArc {
    pub fn derive(run_speed: f32, peak_height: f32, peak_distance: f32) -> Self {
        let time_to_peak = (2.0 * peak_distance) / run_speed;
        let initial_velocity = (2.0 * peak_height) / time_to_peak;
        let gravity = -(2.0 * peak_height) / (time_to_peak * time_to_peak);
        Self {
            time_to_peak,
            initial_velocity,
            gravity,
        }
    }

    pub fn velocity_at(&self, t: f32) -> f32 {
        self.gravity * t + self.initial_velocity
    }
}

/// Tunable character constants, all in pixel units.
#[derive(Clone, Copy, Debug)]
pub struct CharacterTuning {
    /// Horizontal speed in pixels per second.
    pub run_speed: f32,
    /// Fixed jump peak height in pixels.
    pub jump_peak_height: f32,
    /// Fixed horizontal distance to the jump peak in pixels.
    pub jump_peak_distance: f32,
    /// Visual smoothing speed in world units per second.
    pub visual_speed: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            run_speed: 100.0,
            jump_peak_height: 48.0,
            jump_peak_distance: 48.0,
            visual_speed: 60.0,
        }
    }
}

/// Per-character simulation state.
#[derive(Component, Clone, Debug)]
pub struct PixelCharacter {
    /// Sub-cell pixel-space position, integrated every tick.
    pub pixel_pos_x: i32,
    pub pixel_pos_y: i32,
    /// Current velocity in pixels per second.
    pub velocity: Vec2,

    /// True from a jump command (or ledge fall) until a GROUND resolution.
    pub is_jumping: bool,
    /// Seconds since the jump arc started.
    pub jump_timer: f32,
    /// Horizontal velocity latched at jump start; airborne movement may not
    /// change speed or direction.
    pub locked_velocity_x: f32,

    /// Union of all bits in `contact_map`.
    pub contact_normals: ContactNormals,
    /// Normal bits each touching obstacle last contributed. A bit is only
    /// retracted when that specific obstacle stops touching.
    pub contact_map: FxHashMap<Entity, ContactNormals>,

    pub tuning: CharacterTuning,
}

impl PixelCharacter {
    pub fn new(pixel_pos_x: i32, pixel_pos_y: i32, tuning: CharacterTuning) -> Self {
        Self {
            pixel_pos_x,
            pixel_pos_y,
            velocity: Vec2::ZERO,
            is_jumping: false,
            jump_timer: 0.0,
            locked_velocity_x: 0.0,
            contact_normals: ContactNormals::NONE,
            contact_map: FxHashMap::default(),
            tuning,
        }
    }

    pub fn jump_arc(&self) -> JumpArc {
        JumpArc::derive(
            self.tuning.run_speed,
            self.tuning.jump_peak_height,
            self.tuning.jump_peak_distance,
        )
    }

    pub fn is_grounded(&self) -> bool {
        self.contact_normals.contains(ContactNormals::GROUND)
    }

    /// Recompute the aggregate normal flags from the per-obstacle map.
    pub fn rebuild_contact_normals(&mut self) {
        self.contact_normals = self
            .contact_map
            .values()
            .fold(ContactNormals::NONE, |acc, n| acc.union(*n));
    }
}
