//! Procedural mountain terrain.
//!
//! This crate generates the displaced plane used as the mountain in the
//! landing-page scenes: a gradient noise height field, layered into octaves,
//! shaped by a central peak and a sharpening curve, and baked into an
//! indexed triangle mesh with smooth normals.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use heightfield::prelude::*;
//!
//! let height = heightfield::noise::sample(0.5, 0.5);
//! assert_eq!(height, -0.5);
//!
//! let mesh = MeshBuilder::new(TerrainConfig::default()).build()?;
//! save(&mesh, "mountain.obj")?;
//! # Ok::<(), TerrainError>(())
//! ```

pub mod config;
pub mod errors;
pub mod export;
pub mod mesh;
pub mod noise;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::TerrainConfig;
    pub use crate::errors::TerrainError;
    pub use crate::export::{save, write_heightmap_json, write_obj};
    pub use crate::mesh::{HeightStats, MeshBuilder, Orientation, PlaneGrid, TerrainMesh};
    pub use crate::noise::{FractalSum, Octave, PermutationTable, Perlin};
    pub use crate::terrain::{BaseField, CenterPeak, HeightProfile, Sharpening, SineTerm};
}
