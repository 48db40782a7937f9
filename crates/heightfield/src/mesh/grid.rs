//! Segmented plane layout.

use serde::{Deserialize, Serialize};

/// A flat rectangle split into `segments_x * segments_y` cells, centered on
/// the origin in the XY plane.
///
/// Vertices are ordered row by row starting at `y = +depth / 2`, each row
/// running from `x = -width / 2` to `x = +width / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneGrid {
    pub width: f64,
    pub depth: f64,
    pub segments_x: u32,
    pub segments_y: u32,
}

impl PlaneGrid {
    pub const fn new(width: f64, depth: f64, segments_x: u32, segments_y: u32) -> Self {
        Self {
            width,
            depth,
            segments_x,
            segments_y,
        }
    }

    /// Vertices per row.
    pub fn columns(&self) -> usize {
        self.segments_x as usize + 1
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.segments_y as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn triangle_count(&self) -> usize {
        self.segments_x as usize * self.segments_y as usize * 2
    }

    /// Position of vertex `(ix, iy)` in the XY plane, rounded to `f32` the
    /// way it is stored in a vertex buffer.
    pub fn vertex_xy(&self, ix: usize, iy: usize) -> [f32; 2] {
        let segment_width = self.width / self.segments_x as f64;
        let segment_depth = self.depth / self.segments_y as f64;
        let x = ix as f64 * segment_width - self.width / 2.0;
        let y = -(iy as f64 * segment_depth - self.depth / 2.0);
        [x as f32, y as f32]
    }

    /// Triangle list, two counter-clockwise triangles per cell.
    pub fn indices(&self) -> Vec<u32> {
        let columns = self.columns() as u32;
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);

        for iy in 0..self.segments_y {
            for ix in 0..self.segments_x {
                let a = ix + columns * iy;
                let b = ix + columns * (iy + 1);
                let c = (ix + 1) + columns * (iy + 1);
                let d = (ix + 1) + columns * iy;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        indices
    }
}

impl Default for PlaneGrid {
    fn default() -> Self {
        Self::new(400.0, 400.0, 256, 256)
    }
}
