//! Scene setup from a JSON level layout.
//!
//! A level layout is an ASCII grid plus a legend mapping characters to tile
//! descriptions, in the spirit of:
//!
//! ```json
//! {
//!   "pixels_per_unit": 8,
//!   "origin": [0, 0],
//!   "pixel_width": 96,
//!   "pixel_height": 96,
//!   "grid": ["#........#", "#...@....#", "##########"],
//!   "legend": {
//!     "#": { "role": "obstacle", "sprite": { "tex_key": "block", ... } },
//!     "@": { "role": "character", "sprite": { "tex_key": "hero", ... } }
//!   }
//! }
//! ```
//!
//! Grid rows are listed top to bottom; the bottom row sits at cell y = 0.
//! [`setup`] spawns the single level entity, one entity per tile and the
//! character(s); configuration errors abort setup with an `Err`.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::components::character::PixelCharacter;
use crate::components::levelgrid::LevelGrid;
use crate::components::levelspace::LevelSpace;
use crate::components::mapposition::{MapPosition, VisualPosition};
use crate::components::scale::Scale;
use crate::components::sprite::SpriteInfo;
use crate::components::tile::{PixelTile, TileFlags};
use crate::resources::levelcontext::LevelContext;
use crate::resources::simconfig::SimConfig;
use crate::systems::tilealign::align_to_grid;

/// Role a legend entry assigns to its tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileRole {
    Obstacle,
    Character,
}

fn default_tile_size() -> [u32; 2] {
    [1, 1]
}

/// One legend entry: role, footprint in cells, optional sprite metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TileSpec {
    pub role: TileRole,
    #[serde(default = "default_tile_size")]
    pub size: [u32; 2],
    #[serde(default)]
    pub sprite: Option<SpriteInfo>,
}

fn default_line_thickness() -> f32 {
    0.1
}

/// Parsed level layout.
#[derive(Debug, Deserialize)]
pub struct LevelLayout {
    pub pixels_per_unit: i64,
    pub origin: [i64; 2],
    pub pixel_width: i64,
    pub pixel_height: i64,
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f32,
    pub grid: Vec<String>,
    pub legend: FxHashMap<String, TileSpec>,
}

impl LevelLayout {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read level layout: {}", e))?;
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse level layout: {}", e))
    }

    /// Built-in layout used when no level file is given: a walled box with
    /// a floor, one ledge and the character.
    pub fn demo() -> Self {
        let json = r#############"{
            "pixels_per_unit": 8,
            "origin": [0, 0],
            "pixel_width": 96,
            "pixel_height": 96,
            "grid": [
                "#..........#",
                "#..........#",
                "#...@......#",
                "#.......####",
                "#..........#",
                "############"
            ],
            "legend": {
                "#": {
                    "role": "obstacle",
                    "sprite": {
                        "tex_key": "block",
                        "texture_width": 8,
                        "texture_height": 8,
                        "pixels_per_unit": 8
                    }
                },
                "@": {
                    "role": "character",
                    "sprite": {
                        "tex_key": "hero",
                        "texture_width": 8,
                        "texture_height": 8,
                        "pixels_per_unit": 8
                    }
                }
            }
        }"#############;
        serde_json::from_str(json).expect("built-in demo layout is valid")
    }

    /// Iterate non-empty cells as (cell_x, cell_y, spec). The bottom grid
    /// row has cell y = 0. Unknown characters yield an error.
    pub fn cells(&self) -> Result<Vec<(u32, u32, &TileSpec)>, String> {
        let rows = self.grid.len() as u32;
        let mut cells = Vec::new();
        for (row_index, row) in self.grid.iter().enumerate() {
            for (col, ch) in row.chars().enumerate() {
                if ch == '.' || ch == ' ' {
                    continue;
                }
                let spec = self
                    .legend
                    .get(&ch.to_string())
                    .ok_or_else(|| format!("Grid character '{}' is not in the legend", ch))?;
                let cell_y = rows - 1 - row_index as u32;
                cells.push((col as u32, cell_y, spec));
            }
        }
        Ok(cells)
    }
}

/// Spawn the level, its tiles and the character(s) into the world.
///
/// Requires [`SimConfig`] and [`LevelContext`] resources to be present.
/// Fails if the scene already contains a `LevelSpace`: the level is a
/// singleton per scene.
pub fn setup(world: &mut World, layout: &LevelLayout) -> Result<(), String> {
    let mut levels = world.query::<&LevelSpace>();
    if levels.iter(world).next().is_some() {
        return Err("Cannot create more than one LevelSpace per scene".to_string());
    }

    let level = LevelSpace::new(
        layout.pixels_per_unit,
        layout.origin[0],
        layout.origin[1],
        layout.pixel_width,
        layout.pixel_height,
    );
    let tuning = world.resource::<SimConfig>().character;

    let level_entity = world
        .spawn((level, LevelGrid::new(layout.line_thickness)))
        .id();
    world.resource_mut::<LevelContext>().level = Some(level_entity);

    let (origin_x, origin_y) = level.origin_cells();
    let mut character_count = 0usize;
    let mut tile_count = 0usize;

    for (cell_x, cell_y, spec) in layout.cells()? {
        let half_x = spec.size[0] as f32 * 0.5;
        let half_y = spec.size[1] as f32 * 0.5;
        let world_pos = Vec2::new(
            (origin_x + cell_x) as f32 + half_x,
            (origin_y + cell_y) as f32 + half_y,
        );

        match spec.role {
            TileRole::Obstacle => {
                let entity = world
                    .spawn((
                        PixelTile::new(spec.size[0], spec.size[1], TileFlags::OBSTACLE),
                        MapPosition { pos: world_pos },
                        Scale::default(),
                    ))
                    .id();
                if let Some(sprite) = &spec.sprite {
                    world.entity_mut(entity).insert(sprite.clone());
                }
                tile_count += 1;
            }
            TileRole::Character => {
                // The spawn pixel position comes from the tile's aligned
                // grid position at the level's scale.
                let alignment = align_to_grid(world_pos, spec.size[0], spec.size[1], &level);
                let mut tile = PixelTile::new(spec.size[0], spec.size[1], TileFlags::CHARACTER);
                tile.aligned_rel_x = alignment.rel_x;
                tile.aligned_rel_y = alignment.rel_y;

                let ppu = level.pixels_per_unit;
                let pixel_x = (level.aligned_origin_x + alignment.rel_x * ppu) as i32;
                let pixel_y = (level.aligned_origin_y + alignment.rel_y * ppu) as i32;

                let entity = world
                    .spawn((
                        tile,
                        MapPosition {
                            pos: alignment.world_pos,
                        },
                        VisualPosition {
                            pos: alignment.world_pos,
                        },
                        Scale::default(),
                        PixelCharacter::new(pixel_x, pixel_y, tuning),
                    ))
                    .id();
                if let Some(sprite) = &spec.sprite {
                    world.entity_mut(entity).insert(sprite.clone());
                }
                character_count += 1;
                tile_count += 1;
            }
        }
    }

    log::info!(
        "Scene ready: {} tiles, {} character(s), {}x{} cells",
        tile_count,
        character_count,
        level.horizontal_cells,
        level.vertical_cells
    );
    Ok(())
}
