//! Configuration for terrain generation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{Result, TerrainError};
use crate::mesh::PlaneGrid;
use crate::noise::{PermutationTable, Perlin};
use crate::terrain::{BaseField, HeightProfile};

/// Everything needed to build a terrain mesh.
///
/// Missing fields fall back to the defaults, which reproduce the main
/// mountain scene: a 400x400 plane with 256x256 segments, three noise
/// octaves, a central peak and sharpened summits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub grid: PlaneGrid,
    pub profile: HeightProfile,
    /// Seed for a shuffled permutation table. `None` uses the canonical table.
    pub seed: Option<u64>,
    /// Displace rows in parallel.
    pub parallel: bool,
    /// Size of a dedicated thread pool. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Rotate the finished mesh so height runs along +Y.
    pub y_up: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid: PlaneGrid::default(),
            profile: HeightProfile::mountain(),
            seed: None,
            parallel: true,
            threads: None,
            y_up: true,
        }
    }
}

impl TerrainConfig {
    /// Lower-resolution rolling hills used by the lighter scenes.
    pub fn rolling() -> Self {
        Self {
            grid: PlaneGrid::new(400.0, 400.0, 128, 128),
            profile: HeightProfile::rolling(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The noise source selected by `seed`.
    pub fn noise_source(&self) -> Perlin {
        match self.seed {
            Some(seed) => Perlin::seeded(seed),
            None => Perlin::new(&PermutationTable::CANONICAL),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !(grid.width.is_finite() && grid.width > 0.0) {
            return Err(invalid(format!("grid width must be positive, got {}", grid.width)));
        }
        if !(grid.depth.is_finite() && grid.depth > 0.0) {
            return Err(invalid(format!("grid depth must be positive, got {}", grid.depth)));
        }
        if grid.segments_x == 0 || grid.segments_y == 0 {
            return Err(invalid("grid needs at least one segment per axis".to_string()));
        }
        let vertices = (grid.segments_x as u64 + 1) * (grid.segments_y as u64 + 1);
        if vertices > u32::MAX as u64 {
            return Err(invalid(format!(
                "{vertices} vertices cannot be addressed with 32-bit indices"
            )));
        }

        match &self.profile.base {
            BaseField::Perlin(sum) => {
                for octave in &sum.octaves {
                    if !(octave.frequency.is_finite() && octave.amplitude.is_finite()) {
                        return Err(invalid(format!("non-finite octave {octave:?}")));
                    }
                }
                if sum.max_amplitude() == 0.0 {
                    warn!("noise amplitude is zero, terrain will be flat apart from the peak");
                }
            }
            BaseField::Sinusoid { terms } => {
                for term in terms {
                    if !(term.frequency.is_finite() && term.amplitude.is_finite()) {
                        return Err(invalid(format!("non-finite sine term {term:?}")));
                    }
                }
            }
        }

        if let Some(peak) = &self.profile.peak {
            if !(peak.height.is_finite() && peak.falloff.is_finite()) {
                return Err(invalid(format!("non-finite center peak {peak:?}")));
            }
        }

        if let Some(sharpening) = &self.profile.sharpening {
            if !(sharpening.exponent.is_finite() && sharpening.exponent > 0.0) {
                return Err(invalid(format!(
                    "sharpening exponent must be positive, got {}",
                    sharpening.exponent
                )));
            }
            if !(sharpening.reference.is_finite() && sharpening.reference > 0.0) {
                return Err(invalid(format!(
                    "sharpening reference must be positive, got {}",
                    sharpening.reference
                )));
            }
        }

        if let Some(floor) = self.profile.floor {
            if !floor.is_finite() {
                return Err(invalid(format!("floor must be finite, got {floor}")));
            }
        }

        if self.threads == Some(0) {
            return Err(invalid("threads must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> TerrainError {
    TerrainError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Sharpening;

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
        assert!(TerrainConfig::rolling().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = TerrainConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TerrainConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "grid": { "width": 100.0, "depth": 50.0, "segments_x": 10, "segments_y": 5 },
            "seed": 99,
            "parallel": false
        }"#;
        let config = TerrainConfig::from_json_str(json).unwrap();
        assert_eq!(config.grid, PlaneGrid::new(100.0, 50.0, 10, 5));
        assert_eq!(config.seed, Some(99));
        assert!(!config.parallel);
        assert_eq!(config.profile, HeightProfile::mountain());
    }

    #[test]
    fn test_json_round_trip() {
        let config = TerrainConfig::rolling();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TerrainConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_segments() {
        let mut config = TerrainConfig::default();
        config.grid.segments_y = 0;
        assert!(matches!(
            config.validate(),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut config = TerrainConfig::default();
        config.grid.width = -1.0;
        assert!(config.validate().is_err());

        let mut config = TerrainConfig::default();
        config.grid.depth = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_sharpening() {
        let mut config = TerrainConfig::default();
        config.profile.sharpening = Some(Sharpening {
            exponent: 1.3,
            reference: 0.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_threads() {
        let config = TerrainConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TerrainConfig::from_json_str("{ not json"),
            Err(TerrainError::Json(_))
        ));
    }

    #[test]
    fn test_noise_source_follows_seed() {
        let canonical = TerrainConfig::default().noise_source();
        assert_eq!(canonical.sample(0.5, 0.5), -0.5);

        let seeded = TerrainConfig {
            seed: Some(3),
            ..Default::default()
        };
        assert_eq!(
            seeded.noise_source().sample(0.3, 0.6),
            Perlin::seeded(3).sample(0.3, 0.6)
        );
    }
}
