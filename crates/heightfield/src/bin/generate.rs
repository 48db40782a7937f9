//! Generates a terrain mesh and writes it to disk.
//!
//! Run with:
//! ```
//! TERRAIN_OUTPUT=mountain.obj cargo run -p heightfield --bin generate
//! ```
//!
//! `TERRAIN_CONFIG` may point at a JSON config; missing fields use the
//! mountain defaults. Output format follows the extension (`.obj` or `.json`).

use std::time::Instant;

use heightfield::config::TerrainConfig;
use heightfield::export;
use heightfield::mesh::MeshBuilder;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("TERRAIN_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            TerrainConfig::load(&path)?
        }
        Err(_) => TerrainConfig::default(),
    };

    let output = std::env::var("TERRAIN_OUTPUT").unwrap_or_else(|_| "terrain.obj".to_string());

    let started = Instant::now();
    let mesh = MeshBuilder::new(config).build()?;
    tracing::info!("Generated in {:.1?}", started.elapsed());

    export::save(&mesh, &output)?;

    let stats = mesh.height_stats();
    tracing::info!("Terrain written!");
    tracing::info!("  Vertices: {}", mesh.vertex_count());
    tracing::info!("  Triangles: {}", mesh.triangle_count());
    tracing::info!("  Height range: {:.2} to {:.2}", stats.min, stats.max);
    tracing::info!("  Mean height: {:.2}", stats.mean);

    Ok(())
}
