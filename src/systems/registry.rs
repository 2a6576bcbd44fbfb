//! Obstacle registry refresh.
//!
//! Runs once per tick, before any character processing, so every character
//! in the same tick sees the same obstacle list. The rebuild itself is lazy:
//! [`LevelContext::refresh`] rescans only when the total tile count changed.

use bevy_ecs::prelude::*;

use crate::components::tile::PixelTile;
use crate::resources::levelcontext::LevelContext;

pub fn refresh_obstacle_registry(
    mut context: ResMut<LevelContext>,
    tiles: Query<(Entity, &PixelTile)>,
) {
    let total = tiles.iter().count();
    let rebuilt = context.refresh(total, tiles.iter().map(|(entity, tile)| (entity, tile.flags)));
    if rebuilt {
        log::debug!(
            "Obstacle registry rebuilt: {} obstacles out of {} tiles",
            context.obstacles.len(),
            total
        );
    }
}
