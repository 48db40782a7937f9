//! Terrain mesh construction.
//!
//! [`MeshBuilder`] lays out a [`PlaneGrid`], displaces every vertex with a
//! [`HeightProfile`], then computes smooth normals. Rows are independent,
//! so displacement can be spread across a rayon pool.

mod grid;

pub use grid::PlaneGrid;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TerrainConfig;
use crate::errors::Result;
use crate::noise::Perlin;
use crate::terrain::HeightProfile;

/// Which axis carries height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// As generated: the plane lies in XY and height is Z.
    ZUp,
    /// Rotated -90 degrees about X: the plane lies in XZ and height is Y.
    YUp,
}

impl Orientation {
    fn height_axis(self) -> usize {
        match self {
            Orientation::ZUp => 2,
            Orientation::YUp => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// Indexed triangle mesh of a displaced plane.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub grid: PlaneGrid,
    pub orientation: Orientation,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Height of grid vertex `(ix, iy)`, if it exists.
    pub fn height_at_vertex(&self, ix: usize, iy: usize) -> Option<f32> {
        let columns = self.grid.columns();
        if ix >= columns || iy >= self.grid.rows() {
            return None;
        }
        let axis = self.orientation.height_axis();
        self.positions.get(iy * columns + ix).map(|p| p[axis])
    }

    /// Heights in grid order, independent of orientation.
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        let axis = self.orientation.height_axis();
        self.positions.iter().map(move |p| p[axis])
    }

    pub fn height_stats(&self) -> HeightStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;

        for h in self.heights() {
            min = min.min(h);
            max = max.max(h);
            sum += f64::from(h);
        }

        let mean = if self.positions.is_empty() {
            0.0
        } else {
            (sum / self.positions.len() as f64) as f32
        };

        HeightStats { min, max, mean }
    }

    /// Recomputes vertex normals by summing area-weighted face normals.
    ///
    /// Vertices that touch no triangle, or only degenerate ones, get a zero
    /// normal.
    pub fn compute_normals(&mut self) {
        let mut accumulated = vec![[0.0f64; 3]; self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let pa = widen(self.positions[a]);
            let pb = widen(self.positions[b]);
            let pc = widen(self.positions[c]);

            let face = cross(sub(pc, pb), sub(pa, pb));
            for vertex in [a, b, c] {
                for axis in 0..3 {
                    accumulated[vertex][axis] += face[axis];
                }
            }
        }

        self.normals = accumulated.into_iter().map(normalize).collect();
    }

    /// Rotates the mesh -90 degrees about X so that height runs along +Y.
    ///
    /// Does nothing if the mesh is already Y-up.
    pub fn rotate_to_y_up(&mut self) {
        if self.orientation == Orientation::YUp {
            return;
        }
        for p in self.positions.iter_mut().chain(self.normals.iter_mut()) {
            *p = [p[0], p[2], -p[1]];
        }
        self.orientation = Orientation::YUp;
    }
}

fn widen(p: [f32; 3]) -> [f64; 3] {
    p.map(f64::from)
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        v.map(|c| (c / length) as f32)
    } else {
        [0.0; 3]
    }
}

/// Builds terrain meshes from a [`TerrainConfig`].
pub struct MeshBuilder {
    config: TerrainConfig,
    source: Perlin,
}

impl MeshBuilder {
    pub fn new(config: TerrainConfig) -> Self {
        let source = config.noise_source();
        Self { config, source }
    }

    /// Replaces the noise source chosen from the config seed.
    pub fn with_source(mut self, source: Perlin) -> Self {
        self.source = source;
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn build(&self) -> Result<TerrainMesh> {
        self.config.validate()?;

        let grid = self.config.grid;
        debug!(
            vertices = grid.vertex_count(),
            triangles = grid.triangle_count(),
            parallel = self.config.parallel,
            "Laying out terrain grid"
        );

        let mut positions = vec![[0.0f32; 3]; grid.vertex_count()];
        self.displace(&grid, &mut positions)?;

        let mut mesh = TerrainMesh {
            grid,
            orientation: Orientation::ZUp,
            positions,
            normals: Vec::new(),
            indices: grid.indices(),
        };
        mesh.compute_normals();
        debug!("Computed vertex normals");

        if self.config.y_up {
            mesh.rotate_to_y_up();
        }

        let stats = mesh.height_stats();
        info!(
            "Built terrain: {} vertices, {} triangles, height {:.2}..{:.2} (mean {:.2})",
            mesh.vertex_count(),
            mesh.triangle_count(),
            stats.min,
            stats.max,
            stats.mean
        );

        Ok(mesh)
    }

    fn displace(&self, grid: &PlaneGrid, positions: &mut [[f32; 3]]) -> Result<()> {
        let columns = grid.columns();
        let profile = &self.config.profile;
        let source = &self.source;

        if !self.config.parallel {
            for (iy, row) in positions.chunks_mut(columns).enumerate() {
                displace_row(grid, profile, source, iy, row);
            }
            return Ok(());
        }

        let run = |positions: &mut [[f32; 3]]| {
            positions
                .par_chunks_mut(columns)
                .enumerate()
                .for_each(|(iy, row)| displace_row(grid, profile, source, iy, row));
        };

        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                debug!(threads, "Displacing rows on dedicated pool");
                pool.install(|| run(positions));
            }
            None => run(positions),
        }

        Ok(())
    }
}

fn displace_row(
    grid: &PlaneGrid,
    profile: &HeightProfile,
    source: &Perlin,
    iy: usize,
    row: &mut [[f32; 3]],
) {
    for (ix, vertex) in row.iter_mut().enumerate() {
        let [x, y] = grid.vertex_xy(ix, iy);
        let z = profile.height_at(source, f64::from(x), f64::from(y));
        *vertex = [x, y, z as f32];
    }
}
