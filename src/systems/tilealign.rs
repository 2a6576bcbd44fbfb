//! Tile-to-grid alignment.
//!
//! Snaps a tile's free-form world position onto the level's pixel grid,
//! records the grid-relative integer position, and overwrites the visual
//! scale so the rendered size always matches the source asset's native
//! resolution at the level's pixel scale.
//!
//! The pass runs for newly added tiles and re-runs for every tile whenever
//! the level topology changes, so no tile keeps a stale alignment after
//! origin or scale edits.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashSet;

use crate::components::levelspace::LevelSpace;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::SpriteInfo;
use crate::components::tile::PixelTile;

/// Result of snapping one tile onto the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAlignment {
    pub rel_x: u32,
    pub rel_y: u32,
    /// Exact aligned world position (origin + relative + half size).
    pub world_pos: Vec2,
}

/// Snap a world position to the level grid.
///
/// The absolute cell position is the nearest integer to the tile's min
/// corner (`world_pos - tile_size/2`, ties away from zero). The relative
/// position is clamped to 0: tiles off the negative edge snap to the edge.
/// Applying the result's `world_pos` to the same call yields the same
/// alignment again.
pub fn align_to_grid(
    world_pos: Vec2,
    tile_size_x: u32,
    tile_size_y: u32,
    level: &LevelSpace,
) -> GridAlignment {
    let half_x = tile_size_x as f32 * 0.5;
    let half_y = tile_size_y as f32 * 0.5;
    let (origin_x, origin_y) = level.origin_cells();

    let abs_x = (world_pos.x - half_x).round() as i64;
    let abs_y = (world_pos.y - half_y).round() as i64;
    let rel_x = (abs_x - origin_x as i64).max(0) as u32;
    let rel_y = (abs_y - origin_y as i64).max(0) as u32;

    GridAlignment {
        rel_x,
        rel_y,
        world_pos: Vec2::new(
            (origin_x + rel_x) as f32 + half_x,
            (origin_y + rel_y) as f32 + half_y,
        ),
    }
}

/// Visual scale coupling the tile's cell size to the asset's resolution.
pub fn visual_scale(tile: &PixelTile, sprite: &SpriteInfo) -> Vec2 {
    let ppu = sprite.pixels_per_unit as f32;
    Vec2::new(
        tile.tile_size_x as f32 * (ppu / sprite.texture_width as f32),
        tile.tile_size_y as f32 * (ppu / sprite.texture_height as f32),
    )
}

/// Align newly added tiles, or every tile after a level topology change.
pub fn align_tiles(
    level_changed: Query<(), Changed<LevelSpace>>,
    levels: Query<&LevelSpace>,
    added: Query<Entity, Added<PixelTile>>,
    mut tiles: Query<(
        Entity,
        &mut PixelTile,
        &mut MapPosition,
        &mut Scale,
        Option<&SpriteInfo>,
    )>,
) {
    // No level space in the scene: partially constructed scenes no-op.
    let Ok(level) = levels.single() else {
        return;
    };

    let realign_all = !level_changed.is_empty();
    let added: FxHashSet<Entity> = added.iter().collect();
    if !realign_all && added.is_empty() {
        return;
    }

    for (entity, mut tile, mut position, mut scale, sprite) in tiles.iter_mut() {
        if !realign_all && !added.contains(&entity) {
            continue;
        }

        let Some(sprite) = sprite else {
            log::error!("Tile {:?} has no sprite assigned, skipping alignment", entity);
            continue;
        };
        if sprite.pixels_per_unit != level.pixels_per_unit {
            log::error!(
                "Tile {:?}: sprite '{}' is {} pixels per unit but the level is {}",
                entity,
                sprite.tex_key,
                sprite.pixels_per_unit,
                level.pixels_per_unit
            );
            continue;
        }

        let alignment = align_to_grid(position.pos, tile.tile_size_x, tile.tile_size_y, level);
        tile.aligned_rel_x = alignment.rel_x;
        tile.aligned_rel_y = alignment.rel_y;
        position.pos = alignment.world_pos;
        scale.scale = visual_scale(&tile, sprite);
    }
}
