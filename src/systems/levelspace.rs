//! Per-tick level space reconfiguration.
//!
//! The raw pixel configuration on [`LevelSpace`] is live-editable, so every
//! tick the aligned geometry is re-derived and pushed into the grid mesh
//! inputs. The component is only written when something actually changed, so
//! `Changed<LevelSpace>` fires exactly on real edits and drives the
//! full tile re-snap in [`crate::systems::tilealign::align_tiles`].

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::levelgrid::LevelGrid;
use crate::components::levelspace::LevelSpace;

pub fn update_level_space(mut query: Query<(&mut LevelSpace, &mut LevelGrid)>) {
    for (mut level, mut grid) in query.iter_mut() {
        let mut recomputed = *level;
        recomputed.recompute();
        if *level != recomputed {
            *level = recomputed;
        }

        let ppu = recomputed.pixels_per_unit as f32;
        let origin = Vec2::new(
            recomputed.aligned_origin_x as f32 / ppu,
            recomputed.aligned_origin_y as f32 / ppu,
        );
        if grid.origin != origin
            || grid.horizontal_cells != recomputed.horizontal_cells
            || grid.vertical_cells != recomputed.vertical_cells
        {
            grid.origin = origin;
            grid.cell_size = Vec2::ONE;
            grid.horizontal_cells = recomputed.horizontal_cells;
            grid.vertical_cells = recomputed.vertical_cells;
        }
    }
}
