//! Fractal sums of gradient noise octaves.

use serde::{Deserialize, Serialize};

use super::perlin::Perlin;

/// One layer of noise at a given frequency and amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Octave {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Sum of noise octaves, evaluated in order.
///
/// Octaves are listed explicitly rather than derived from a lacunarity so
/// that irregular frequency steps (the mountain uses x2 then x3) are
/// representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalSum {
    pub octaves: Vec<Octave>,
}

impl FractalSum {
    pub fn new(octaves: Vec<Octave>) -> Self {
        Self { octaves }
    }

    /// Classic fractal Brownian motion: each octave multiplies frequency by
    /// `lacunarity` and amplitude by `gain`.
    pub fn fbm(frequency: f64, amplitude: f64, count: usize, lacunarity: f64, gain: f64) -> Self {
        let mut octaves = Vec::with_capacity(count);
        let mut frequency = frequency;
        let mut amplitude = amplitude;

        for _ in 0..count {
            octaves.push(Octave::new(frequency, amplitude));
            frequency *= lacunarity;
            amplitude *= gain;
        }

        Self { octaves }
    }

    /// Three octaves tuned for a 400-unit mountain: large masses, medium
    /// detail, then fine ridges.
    pub fn mountain() -> Self {
        let mut amplitude = 60.0;
        let mut frequency = 0.005;
        let large = Octave::new(frequency, amplitude);

        amplitude *= 0.5;
        frequency *= 2.0;
        let medium = Octave::new(frequency, amplitude);

        amplitude *= 0.5;
        frequency *= 3.0;
        let ridges = Octave::new(frequency, amplitude);

        Self::new(vec![large, medium, ridges])
    }

    pub fn sample(&self, source: &Perlin, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        for octave in &self.octaves {
            total += source.sample(x * octave.frequency, y * octave.frequency) * octave.amplitude;
        }
        total
    }

    /// Sum of absolute amplitudes. `|sample|` stays below 1.5 times this.
    pub fn max_amplitude(&self) -> f64 {
        self.octaves.iter().map(|o| o.amplitude.abs()).sum()
    }
}

impl Default for FractalSum {
    fn default() -> Self {
        Self::mountain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mountain_octaves() {
        let sum = FractalSum::mountain();
        assert_eq!(sum.octaves.len(), 3);
        assert_eq!(sum.octaves[0], Octave::new(0.005, 60.0));
        assert_eq!(sum.octaves[1], Octave::new(0.01, 30.0));
        assert!((sum.octaves[2].frequency - 0.03).abs() < 1e-15);
        assert_eq!(sum.octaves[2].amplitude, 15.0);
        assert_eq!(sum.max_amplitude(), 105.0);
    }

    #[test]
    fn test_fbm_progression() {
        let sum = FractalSum::fbm(1.0, 1.0, 4, 2.0, 0.5);
        let frequencies: Vec<f64> = sum.octaves.iter().map(|o| o.frequency).collect();
        let amplitudes: Vec<f64> = sum.octaves.iter().map(|o| o.amplitude).collect();
        assert_eq!(frequencies, vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(amplitudes, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_single_octave_scales_source() {
        let perlin = Perlin::default();
        let sum = FractalSum::new(vec![Octave::new(1.0, 10.0)]);
        let expected = perlin.sample(0.5, 0.5) * 10.0;
        assert_eq!(sum.sample(&perlin, 0.5, 0.5), expected);
    }

    #[test]
    fn test_empty_sum_is_flat() {
        let sum = FractalSum::new(Vec::new());
        assert_eq!(sum.sample(&Perlin::default(), 12.3, 4.5), 0.0);
        assert_eq!(sum.max_amplitude(), 0.0);
    }

    #[test]
    fn test_origin_is_zero() {
        // Every octave samples the lattice point (0, 0).
        assert_eq!(FractalSum::mountain().sample(&Perlin::default(), 0.0, 0.0), 0.0);
    }
}
