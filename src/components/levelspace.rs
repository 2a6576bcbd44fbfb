//! Pixel-space level description and its grid-aligned geometry.
//!
//! A scene carries exactly one [`LevelSpace`] entity; scene setup in
//! [`crate::game`] rejects layouts that would create more than one. The raw
//! pixel configuration is treated as live-editable, so
//! [`crate::systems::levelspace::update_level_space`] re-derives the aligned
//! bounds every tick.

use bevy_ecs::prelude::Component;

use crate::mathutil::find_closest_multiple_of;

/// Pixel-space origin, extent and scale of the level, plus the derived
/// grid-aligned geometry consumed by rendering and tile placement.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSpace {
    /// Pixels per world unit (one grid cell). Always >= 1.
    pub pixels_per_unit: u32,
    pub pixel_origin_x: u32,
    pub pixel_origin_y: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,

    /// Origin snapped down to the nearest multiple of `pixels_per_unit`.
    pub aligned_origin_x: u32,
    pub aligned_origin_y: u32,
    /// Extent snapped down to the nearest multiple of `pixels_per_unit`.
    pub aligned_width: u32,
    pub aligned_height: u32,
    /// Cell counts: aligned extent divided (exactly) by `pixels_per_unit`.
    pub horizontal_cells: u32,
    pub vertical_cells: u32,
}

impl LevelSpace {
    /// Build a level space from raw configuration values.
    ///
    /// Degenerate input is coerced rather than rejected: a non-positive
    /// scale becomes 1, negative origins and extents become 0.
    pub fn new(pixels_per_unit: i64, origin_x: i64, origin_y: i64, width: i64, height: i64) -> Self {
        let mut level = Self {
            pixels_per_unit: pixels_per_unit.max(1) as u32,
            pixel_origin_x: origin_x.max(0) as u32,
            pixel_origin_y: origin_y.max(0) as u32,
            pixel_width: width.max(0) as u32,
            pixel_height: height.max(0) as u32,
            aligned_origin_x: 0,
            aligned_origin_y: 0,
            aligned_width: 0,
            aligned_height: 0,
            horizontal_cells: 0,
            vertical_cells: 0,
        };
        level.recompute();
        level
    }

    /// Re-derive the aligned geometry from the current raw values.
    ///
    /// Runs every tick since the raw fields may have been edited in place.
    pub fn recompute(&mut self) {
        self.pixels_per_unit = self.pixels_per_unit.max(1);
        let ppu = self.pixels_per_unit;

        self.aligned_origin_x = find_closest_multiple_of(self.pixel_origin_x, ppu);
        self.aligned_origin_y = find_closest_multiple_of(self.pixel_origin_y, ppu);
        self.aligned_width = find_closest_multiple_of(self.pixel_width, ppu);
        self.aligned_height = find_closest_multiple_of(self.pixel_height, ppu);

        // Exact by construction: the aligned extent is a multiple of ppu.
        self.horizontal_cells = self.aligned_width / ppu;
        self.vertical_cells = self.aligned_height / ppu;
    }

    /// Aligned origin expressed in grid cells.
    pub fn origin_cells(&self) -> (u32, u32) {
        (
            self.aligned_origin_x / self.pixels_per_unit,
            self.aligned_origin_y / self.pixels_per_unit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_width_and_cell_count() {
        // ppu=8 with a raw width of 100 snaps to 96 pixels, 12 cells.
        let level = LevelSpace::new(8, 0, 0, 100, 60);
        assert_eq!(level.aligned_width, 96);
        assert_eq!(level.horizontal_cells, 12);
        assert_eq!(level.aligned_height, 56);
        assert_eq!(level.vertical_cells, 7);
    }

    #[test]
    fn test_aligned_origin_never_exceeds_raw_origin() {
        let level = LevelSpace::new(8, 13, 21, 64, 64);
        assert!(level.aligned_origin_x <= level.pixel_origin_x);
        assert!(level.aligned_origin_y <= level.pixel_origin_y);
        assert_eq!(level.aligned_origin_x, 8);
        assert_eq!(level.aligned_origin_y, 16);
    }

    #[test]
    fn test_degenerate_input_is_coerced() {
        let level = LevelSpace::new(0, -5, -5, -100, -100);
        assert_eq!(level.pixels_per_unit, 1);
        assert_eq!(level.pixel_origin_x, 0);
        assert_eq!(level.pixel_width, 0);
        assert_eq!(level.horizontal_cells, 0);
    }

    #[test]
    fn test_recompute_after_live_edit() {
        let mut level = LevelSpace::new(8, 0, 0, 96, 96);
        assert_eq!(level.horizontal_cells, 12);
        level.pixel_width = 100;
        level.pixels_per_unit = 0; // degenerate live edit
        level.recompute();
        assert_eq!(level.pixels_per_unit, 1);
        assert_eq!(level.aligned_width, 100);
        assert_eq!(level.horizontal_cells, 100);
    }

    #[test]
    fn test_origin_cells() {
        let level = LevelSpace::new(8, 16, 24, 64, 64);
        assert_eq!(level.origin_cells(), (2, 3));
    }
}
