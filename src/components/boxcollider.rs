//! Axis-aligned pixel-space collision boxes.
//!
//! Character-versus-tile collision works on integer pixel bounds derived
//! each tick from a tile's aligned grid position and the level scale, so the
//! box itself is plain data rather than a stored component.

use crate::components::levelspace::LevelSpace;
use crate::components::tile::PixelTile;

/// Integer pixel-space AABB with exclusive max edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelBox {
    pub fn new(min_x: i32, min_y: i32, width: i32, height: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x: min_x + width,
            max_y: min_y + height,
        }
    }

    /// Bounds of a tile sitting at its aligned grid position.
    pub fn from_tile(tile: &PixelTile, level: &LevelSpace) -> Self {
        let ppu = level.pixels_per_unit;
        let (width, height) = tile.pixel_size(ppu);
        Self::new(
            (level.aligned_origin_x + tile.aligned_rel_x * ppu) as i32,
            (level.aligned_origin_y + tile.aligned_rel_y * ppu) as i32,
            width,
            height,
        )
    }

    /// Strict overlap test: boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &PixelBox) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tile::TileFlags;

    #[test]
    fn test_overlap_is_strict_at_shared_edges() {
        let a = PixelBox::new(0, 0, 1, 1);
        let above = PixelBox::new(0, 1, 1, 1);
        let beside = PixelBox::new(1, 0, 1, 1);
        assert!(!a.overlaps(&above));
        assert!(!a.overlaps(&beside));
    }

    #[test]
    fn test_overlap_detects_penetration() {
        let a = PixelBox::new(0, 0, 4, 4);
        let b = PixelBox::new(3, 3, 4, 4);
        let c = PixelBox::new(4, 4, 4, 4);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_from_tile_uses_aligned_position_and_scale() {
        let level = LevelSpace::new(8, 16, 0, 96, 96);
        let mut tile = PixelTile::new(2, 1, TileFlags::OBSTACLE);
        tile.aligned_rel_x = 3;
        tile.aligned_rel_y = 2;
        let bounds = PixelBox::from_tile(&tile, &level);
        assert_eq!(bounds.min_x, 16 + 3 * 8);
        assert_eq!(bounds.min_y, 2 * 8);
        assert_eq!(bounds.max_x, bounds.min_x + 16);
        assert_eq!(bounds.max_y, bounds.min_y + 8);
    }
}
