//! Grid mesh regeneration.
//!
//! Rebuilds the line-grid geometry from the current [`LevelGrid`] inputs
//! once per tick, after the level space reconfiguration has run.

use bevy_ecs::prelude::*;

use crate::components::levelgrid::LevelGrid;
use crate::grid::GridMesh;

pub fn regenerate_grid_mesh(mut query: Query<&mut LevelGrid>) {
    for mut grid in query.iter_mut() {
        grid.mesh = GridMesh::generate(
            grid.origin,
            grid.cell_size,
            grid.horizontal_cells,
            grid.vertical_cells,
            grid.line_thickness,
        );
    }
}
