//! Two-dimensional gradient noise over a 256-periodic lattice.

use ::noise::NoiseFn;

use super::permutation::PermutationTable;

/// Gradient noise generator.
///
/// Holds a doubled copy of its permutation table and nothing else, so a
/// single instance can be shared across threads and sampled concurrently.
#[derive(Debug, Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Perlin {
    /// Generator over the canonical table.
    pub const CANONICAL: Perlin = Perlin::new(&PermutationTable::CANONICAL);

    pub const fn new(table: &PermutationTable) -> Self {
        Self {
            perm: table.doubled(),
        }
    }

    /// Generator over a table shuffled with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&PermutationTable::shuffled(seed))
    }

    /// Samples the field at `(x, y)`.
    ///
    /// Continuous everywhere, zero at integer lattice points, periodic with
    /// period 256 on both axes. Behavior for non-finite input is unspecified.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();

        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;

        let fx = x - x_floor;
        let fy = y - y_floor;

        let u = fade(fx);
        let v = fade(fy);

        let a = self.perm[xi] as usize + yi;
        let b = self.perm[xi + 1] as usize + yi;

        lerp(
            v,
            lerp(
                u,
                grad(self.perm[a], fx, fy),
                grad(self.perm[b], fx - 1.0, fy),
            ),
            lerp(
                u,
                grad(self.perm[a + 1], fx, fy - 1.0),
                grad(self.perm[b + 1], fx - 1.0, fy - 1.0),
            ),
        )
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl NoiseFn<f64, 2> for Perlin {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Samples the canonical field.
pub fn sample(x: f64, y: f64) -> f64 {
    Perlin::CANONICAL.sample(x, y)
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub(crate) fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub(crate) fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the offset `(x, y)` with one of four gradients picked by
/// the low two bits of `hash`: `(1, 2)`, `(-1, 2)`, `(-2, 1)`, `(-2, -1)`.
#[inline]
pub(crate) fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { 2.0 * v } else { -2.0 * v };
    u + v
}
