//! Height composition: base field, center peak, sharpening and floor.

use serde::{Deserialize, Serialize};

use crate::noise::{FractalSum, Perlin};

/// One `sin(x * f) * cos(y * f) * a` term of a sinusoid field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineTerm {
    pub frequency: f64,
    pub amplitude: f64,
}

/// The undulating field the peak and sharpening are applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseField {
    /// Fractal sum of gradient noise octaves.
    Perlin(FractalSum),
    /// Sum of separable sine/cosine products; cheap and smooth.
    Sinusoid { terms: Vec<SineTerm> },
}

impl BaseField {
    pub fn sample(&self, source: &Perlin, x: f64, y: f64) -> f64 {
        match self {
            BaseField::Perlin(sum) => sum.sample(source, x, y),
            BaseField::Sinusoid { terms } => terms
                .iter()
                .map(|t| (x * t.frequency).sin() * (y * t.frequency).cos() * t.amplitude)
                .sum(),
        }
    }

    pub fn rolling_hills() -> Self {
        BaseField::Sinusoid {
            terms: vec![
                SineTerm {
                    frequency: 0.01,
                    amplitude: 50.0,
                },
                SineTerm {
                    frequency: 0.02,
                    amplitude: 25.0,
                },
                SineTerm {
                    frequency: 0.05,
                    amplitude: 10.0,
                },
            ],
        }
    }
}

/// Cone added around the origin: `max(0, height - distance * falloff)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPeak {
    pub height: f64,
    pub falloff: f64,
}

impl CenterPeak {
    pub fn at(&self, x: f64, y: f64) -> f64 {
        let distance = (x * x + y * y).sqrt();
        (self.height - distance * self.falloff).max(0.0)
    }
}

impl Default for CenterPeak {
    fn default() -> Self {
        Self {
            height: 100.0,
            falloff: 0.3,
        }
    }
}

/// Sign-preserving power curve: `(|h| / reference)^exponent * reference * sign(h)`.
///
/// With `exponent > 1` heights above `reference` grow and those below it
/// shrink, which sharpens summits and flattens foothills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sharpening {
    pub exponent: f64,
    pub reference: f64,
}

impl Sharpening {
    pub fn apply(&self, height: f64) -> f64 {
        if height == 0.0 {
            return 0.0;
        }
        (height.abs() / self.reference).powf(self.exponent) * self.reference * height.signum()
    }
}

impl Default for Sharpening {
    fn default() -> Self {
        Self {
            exponent: 1.3,
            reference: 100.0,
        }
    }
}

/// Full height function applied to every mesh vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightProfile {
    pub base: BaseField,
    pub peak: Option<CenterPeak>,
    pub sharpening: Option<Sharpening>,
    /// Lowest allowed height; `None` leaves valleys below zero.
    pub floor: Option<f64>,
}

impl HeightProfile {
    /// Noise-driven mountain with a sharpened central summit.
    pub fn mountain() -> Self {
        Self {
            base: BaseField::Perlin(FractalSum::mountain()),
            peak: Some(CenterPeak::default()),
            sharpening: Some(Sharpening::default()),
            floor: Some(0.0),
        }
    }

    /// Smooth sinusoid hills around an unsharpened peak.
    pub fn rolling() -> Self {
        Self {
            base: BaseField::rolling_hills(),
            peak: Some(CenterPeak::default()),
            sharpening: None,
            floor: Some(0.0),
        }
    }

    pub fn height_at(&self, source: &Perlin, x: f64, y: f64) -> f64 {
        let mut height = self.base.sample(source, x, y);

        if let Some(peak) = &self.peak {
            height += peak.at(x, y);
        }

        if let Some(sharpening) = &self.sharpening {
            height = sharpening.apply(height);
        }

        match self.floor {
            Some(floor) => height.max(floor),
            None => height,
        }
    }
}

impl Default for HeightProfile {
    fn default() -> Self {
        Self::mountain()
    }
}
