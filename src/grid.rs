//! Procedural line-grid mesh generation.
//!
//! [`GridMesh::generate`] builds the vertex and triangle-index buffers for a
//! rectangular grid of thin line quads: one vertical quad per column
//! boundary and one horizontal quad per row boundary. Both passes share a
//! single contiguous index space, so the row pass receives the vertex offset
//! where the column pass ended.
//!
//! The mesh is regenerated every tick by
//! [`crate::systems::gridmesh::regenerate_grid_mesh`]; it carries no
//! persistent identity of its own.

use glam::Vec2;

/// Vertices emitted per line quad.
const VERTICES_PER_LINE: u32 = 4;
/// Indices emitted per line quad (two triangles).
const INDICES_PER_LINE: u32 = 6;

/// Index layout of one line quad inside the shared vertex buffer.
///
/// The four vertices of a quad are consecutive, starting at
/// `position + offset` where `offset` is the first index owned by the
/// emitting pass.
struct LineQuad {
    top_left: u32,
    top_right: u32,
    bottom_right: u32,
    bottom_left: u32,
}

impl LineQuad {
    fn new(position: u32, offset: u32) -> Self {
        let bottom_left = position + offset;
        let bottom_right = bottom_left + 1;
        let top_right = bottom_right + 1;
        let top_left = top_right + 1;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

/// Generated line-grid geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridMesh {
    pub vertices: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl GridMesh {
    /// Build the grid mesh for `horizontal_cells x vertical_cells` cells.
    ///
    /// `line_thickness` is a fraction of a cell and is clamped to `[0, 1]`.
    /// A cell count of 0 on an axis still emits the boundary line, so the
    /// mesh always contains at least a border frame.
    pub fn generate(
        origin: Vec2,
        cell_size: Vec2,
        horizontal_cells: u32,
        vertical_cells: u32,
        line_thickness: f32,
    ) -> Self {
        let half_line_width = line_thickness.clamp(0.0, 1.0) * 0.5;
        let column_lines = horizontal_cells + 1;
        let row_lines = vertical_cells + 1;
        let vertex_count = (column_lines + row_lines) * VERTICES_PER_LINE;
        let index_count = (column_lines + row_lines) * INDICES_PER_LINE;

        let mut mesh = Self {
            vertices: Vec::with_capacity(vertex_count as usize),
            indices: Vec::with_capacity(index_count as usize),
        };

        mesh.push_column_vertices(origin, cell_size, column_lines, vertical_cells, half_line_width);
        mesh.push_line_indices(0, column_lines);

        let row_offset = mesh.vertices.len() as u32;
        mesh.push_row_vertices(origin, cell_size, row_lines, horizontal_cells, half_line_width);
        mesh.push_line_indices(row_offset, row_lines);

        mesh
    }

    /// One thin vertical quad per column boundary, spanning the full grid
    /// height plus a half line width at the top.
    fn push_column_vertices(
        &mut self,
        origin: Vec2,
        cell_size: Vec2,
        column_lines: u32,
        vertical_cells: u32,
        half_line_width: f32,
    ) {
        let top = vertical_cells as f32 * cell_size.y + half_line_width;
        for i in 0..column_lines {
            let left = i as f32 * cell_size.x - half_line_width;
            let right = i as f32 * cell_size.x + half_line_width;

            self.vertices.push(origin + Vec2::new(left, top));
            self.vertices.push(origin + Vec2::new(left, 0.0));
            self.vertices.push(origin + Vec2::new(right, 0.0));
            self.vertices.push(origin + Vec2::new(right, top));
        }
    }

    /// One thin horizontal quad per row boundary, spanning the full grid
    /// width plus a half line width on both sides.
    fn push_row_vertices(
        &mut self,
        origin: Vec2,
        cell_size: Vec2,
        row_lines: u32,
        horizontal_cells: u32,
        half_line_width: f32,
    ) {
        let right = horizontal_cells as f32 * cell_size.x + half_line_width;
        for i in 0..row_lines {
            let bottom = i as f32 * cell_size.y - half_line_width;
            let top = i as f32 * cell_size.y + half_line_width;

            self.vertices.push(origin + Vec2::new(-half_line_width, bottom));
            self.vertices.push(origin + Vec2::new(right, bottom));
            self.vertices.push(origin + Vec2::new(right, top));
            self.vertices.push(origin + Vec2::new(-half_line_width, top));
        }
    }

    /// Two counter-clockwise triangles per line quad, with every index
    /// shifted by the pass's starting `offset` into the shared vertex range.
    fn push_line_indices(&mut self, offset: u32, line_count: u32) {
        for i in 0..line_count {
            let quad = LineQuad::new(i * VERTICES_PER_LINE, offset);

            self.indices.push(quad.top_left);
            self.indices.push(quad.top_right);
            self.indices.push(quad.bottom_right);

            self.indices.push(quad.top_left);
            self.indices.push(quad.bottom_right);
            self.indices.push(quad.bottom_left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_vertex_count(w: u32, h: u32) -> usize {
        (4 * ((w + 1) + (h + 1))) as usize
    }

    #[test]
    fn test_buffer_sizes_match_cell_counts() {
        for (w, h) in [(0, 0), (1, 1), (12, 7), (100, 3)] {
            let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, w, h, 0.1);
            assert_eq!(mesh.vertices.len(), expected_vertex_count(w, h));
            assert_eq!(mesh.indices.len(), mesh.vertices.len() * 3 / 2);
        }
    }

    #[test]
    fn test_every_index_is_in_vertex_range() {
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, 12, 7, 0.25);
        let vertex_count = mesh.vertices.len() as u32;
        for &index in &mesh.indices {
            assert!(index < vertex_count);
        }
    }

    #[test]
    fn test_no_degenerate_triangles() {
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, 5, 9, 0.5);
        for triangle in mesh.indices.chunks(3) {
            assert_ne!(triangle[0], triangle[1]);
            assert_ne!(triangle[1], triangle[2]);
            assert_ne!(triangle[0], triangle[2]);
        }
    }

    #[test]
    fn test_zero_cells_still_emit_border_lines() {
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, 0, 0, 0.1);
        // One column line and one row line, four vertices each.
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);
    }

    #[test]
    fn test_row_pass_indices_start_after_column_pass() {
        let w = 3;
        let h = 2;
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, w, h, 0.1);
        let column_vertices = (4 * (w + 1)) as u32;
        let column_indices = (6 * (w + 1)) as usize;

        for &index in &mesh.indices[..column_indices] {
            assert!(index < column_vertices);
        }
        for &index in &mesh.indices[column_indices..] {
            assert!(index >= column_vertices);
        }
    }

    #[test]
    fn test_column_quads_span_full_height() {
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::new(1.0, 1.0), 2, 4, 0.2);
        // First column quad: x = -0.1..0.1, y = 0..4.1.
        assert_eq!(mesh.vertices[0], Vec2::new(-0.1, 4.1));
        assert_eq!(mesh.vertices[1], Vec2::new(-0.1, 0.0));
        assert_eq!(mesh.vertices[2], Vec2::new(0.1, 0.0));
        assert_eq!(mesh.vertices[3], Vec2::new(0.1, 4.1));
    }

    #[test]
    fn test_row_quads_span_full_width() {
        let w = 2;
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::new(1.0, 1.0), w, 4, 0.2);
        let first_row = (4 * (w + 1)) as usize;
        // First row quad: x = -0.1..2.1, y = -0.1..0.1.
        assert_eq!(mesh.vertices[first_row], Vec2::new(-0.1, -0.1));
        assert_eq!(mesh.vertices[first_row + 1], Vec2::new(2.1, -0.1));
        assert_eq!(mesh.vertices[first_row + 2], Vec2::new(2.1, 0.1));
        assert_eq!(mesh.vertices[first_row + 3], Vec2::new(-0.1, 0.1));
    }

    #[test]
    fn test_origin_offsets_every_vertex() {
        let origin = Vec2::new(10.0, -3.0);
        let base = GridMesh::generate(Vec2::ZERO, Vec2::ONE, 3, 3, 0.1);
        let moved = GridMesh::generate(origin, Vec2::ONE, 3, 3, 0.1);
        for (a, b) in base.vertices.iter().zip(moved.vertices.iter()) {
            assert_eq!(*a + origin, *b);
        }
        assert_eq!(base.indices, moved.indices);
    }

    #[test]
    fn test_line_thickness_is_clamped() {
        let mesh = GridMesh::generate(Vec2::ZERO, Vec2::ONE, 1, 1, 4.0);
        // Clamped to 1.0, so the first column quad starts at x = -0.5.
        assert_eq!(mesh.vertices[0].x, -0.5);
    }
}
