use bevy_ecs::prelude::Resource;

/// Simulation clock, advanced once per tick by
/// [`crate::systems::time::update_world_time`].
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Seconds since the simulation started.
    pub elapsed: f32,
    /// Seconds covered by the current tick.
    pub delta: f32,
    pub time_scale: f32,
    /// Ticks completed so far.
    pub tick: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            tick: 0,
        }
    }
}
