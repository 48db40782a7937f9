//! Writing terrain meshes to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::errors::{Result, TerrainError};
use crate::mesh::{HeightStats, PlaneGrid, TerrainMesh};

/// Row-major heightmap as written by [`write_heightmap_json`].
#[derive(Debug, Serialize)]
pub struct Heightmap<'a> {
    pub grid: &'a PlaneGrid,
    pub columns: usize,
    pub rows: usize,
    pub stats: HeightStats,
    pub heights: Vec<f32>,
}

impl<'a> Heightmap<'a> {
    pub fn from_mesh(mesh: &'a TerrainMesh) -> Self {
        Self {
            grid: &mesh.grid,
            columns: mesh.grid.columns(),
            rows: mesh.grid.rows(),
            stats: mesh.height_stats(),
            heights: mesh.heights().collect(),
        }
    }
}

/// Writes a Wavefront OBJ with positions, normals and 1-based faces.
pub fn write_obj<W: Write>(mesh: &TerrainMesh, mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "# terrain {}x{} segments, {} vertices",
        mesh.grid.segments_x,
        mesh.grid.segments_y,
        mesh.vertex_count()
    )?;

    for [x, y, z] in &mesh.positions {
        writeln!(writer, "v {x} {y} {z}")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(writer, "vn {x} {y} {z}")?;
    }
    for face in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (face[0] + 1, face[1] + 1, face[2] + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_heightmap_json<W: Write>(mesh: &TerrainMesh, writer: W) -> Result<()> {
    serde_json::to_writer(writer, &Heightmap::from_mesh(mesh))?;
    Ok(())
}

/// Saves `mesh` to `path`, choosing the format from the extension
/// (`.obj` or `.json`).
pub fn save(mesh: &TerrainMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("obj") => {
            let writer = BufWriter::new(File::create(path)?);
            write_obj(mesh, writer)?;
        }
        Some("json") => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_heightmap_json(mesh, &mut writer)?;
            writer.flush()?;
        }
        _ => {
            return Err(TerrainError::UnsupportedFormat(path.display().to_string()));
        }
    }

    info!("Wrote terrain to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::mesh::MeshBuilder;

    fn tiny_mesh() -> TerrainMesh {
        MeshBuilder::new(TerrainConfig {
            grid: PlaneGrid::new(400.0, 400.0, 2, 2),
            ..Default::default()
        })
        .build()
        .unwrap()
    }

    #[test]
    fn test_obj_line_counts() {
        let mesh = tiny_mesh();
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 9);
        assert_eq!(count("vn "), 9);
        assert_eq!(count("f "), 8);
        assert!(text.lines().any(|l| l == "f 1//1 4//4 2//2"));
    }

    #[test]
    fn test_heightmap_json() {
        let mesh = tiny_mesh();
        let mut out = Vec::new();
        write_heightmap_json(&mesh, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["columns"], 3);
        assert_eq!(value["rows"], 3);
        assert_eq!(value["heights"].as_array().unwrap().len(), 9);
        assert_eq!(value["heights"][4], 100.0);
        assert_eq!(value["stats"]["max"], 100.0);
        assert_eq!(value["grid"]["segments_x"], 2);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let mesh = tiny_mesh();
        let path = std::env::temp_dir().join("heightfield-export-test.png");
        assert!(matches!(
            save(&mesh, &path),
            Err(TerrainError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_obj() {
        let mesh = tiny_mesh();
        let path = std::env::temp_dir().join(format!(
            "heightfield-export-test-{}.obj",
            std::process::id()
        ));
        save(&mesh, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.starts_with("# terrain 2x2 segments"));
    }
}
