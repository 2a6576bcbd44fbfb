//! Grid line-mesh component.
//!
//! Lives on the same entity as the
//! [`LevelSpace`](crate::components::levelspace::LevelSpace). The level
//! space system pushes the aligned geometry into the input fields every
//! tick, and [`crate::systems::gridmesh::regenerate_grid_mesh`] rebuilds
//! `mesh` from them.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::grid::GridMesh;

#[derive(Component, Clone, Debug, Default)]
pub struct LevelGrid {
    /// Grid origin in world units.
    pub origin: Vec2,
    /// Cell size per axis in world units.
    pub cell_size: Vec2,
    pub horizontal_cells: u32,
    pub vertical_cells: u32,
    /// Line thickness as a fraction of a cell, clamped to [0, 1] when the
    /// mesh is generated.
    pub line_thickness: f32,

    /// Geometry produced from the fields above.
    pub mesh: GridMesh,
}

impl LevelGrid {
    pub fn new(line_thickness: f32) -> Self {
        Self {
            cell_size: Vec2::ONE,
            line_thickness,
            ..Self::default()
        }
    }
}
