//! Gradient noise primitives.
//!
//! [`Perlin`] is the height-field generator; [`FractalSum`] layers several
//! octaves of it.

pub mod fractal;
pub mod perlin;
pub mod permutation;

pub use fractal::{FractalSum, Octave};
pub use perlin::{Perlin, sample};
pub use permutation::PermutationTable;
