//! Terrain height composition.
//!
//! A [`HeightProfile`] turns a noise source into final vertex heights by
//! layering a base field, a central peak, a sharpening curve and a floor.

mod profile;

pub use profile::{BaseField, CenterPeak, HeightProfile, Sharpening, SineTerm};
