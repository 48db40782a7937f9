//! Example: Print a coarse ASCII rendering of the mountain.
//!
//! Run with:
//! ```
//! cargo run -p heightfield --example ascii_heightmap
//! ```

use heightfield::prelude::*;
use tracing_subscriber::EnvFilter;

const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = TerrainConfig {
        grid: PlaneGrid::new(400.0, 400.0, 64, 32),
        ..Default::default()
    };
    let mesh = MeshBuilder::new(config).build()?;
    let stats = mesh.height_stats();
    let span = (stats.max - stats.min).max(f32::EPSILON);

    for iy in 0..mesh.grid.rows() {
        let line: String = (0..mesh.grid.columns())
            .filter_map(|ix| mesh.height_at_vertex(ix, iy))
            .map(|h| {
                let level = ((h - stats.min) / span * (SHADES.len() - 1) as f32).round() as usize;
                SHADES[level.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{line}");
    }

    Ok(())
}
