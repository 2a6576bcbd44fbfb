//! Grid-aligned tile component.
//!
//! A [`PixelTile`] is the physical footprint of a renderable object on the
//! level grid: its size in cells, its role flags and the grid-cell position
//! recorded by the last alignment pass
//! ([`crate::systems::tilealign::align_tiles`]).

use bevy_ecs::prelude::Component;

/// Role bits a tile can carry on the level grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TileFlags(u8);

impl TileFlags {
    pub const NONE: TileFlags = TileFlags(0);
    pub const OBSTACLE: TileFlags = TileFlags(1 << 0);
    pub const CHARACTER: TileFlags = TileFlags(1 << 1);

    pub fn contains(self, other: TileFlags) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[must_use]
    pub fn with(self, other: TileFlags) -> TileFlags {
        TileFlags(self.0 | other.0)
    }
}

/// Tile footprint on the pixel grid.
///
/// `aligned_rel_x/y` are grid-cell coordinates relative to the level's
/// aligned origin, clamped to 0 when alignment would go negative (tiles off
/// the negative edge snap to the edge).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelTile {
    pub tile_size_x: u32,
    pub tile_size_y: u32,
    pub flags: TileFlags,
    pub aligned_rel_x: u32,
    pub aligned_rel_y: u32,
}

impl PixelTile {
    pub fn new(tile_size_x: u32, tile_size_y: u32, flags: TileFlags) -> Self {
        Self {
            tile_size_x,
            tile_size_y,
            flags,
            aligned_rel_x: 0,
            aligned_rel_y: 0,
        }
    }

    /// Footprint in pixels for a given level scale.
    pub fn pixel_size(&self, pixels_per_unit: u32) -> (i32, i32) {
        (
            (self.tile_size_x * pixels_per_unit) as i32,
            (self.tile_size_y * pixels_per_unit) as i32,
        )
    }
}
