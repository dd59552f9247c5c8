//! Longitude transformations for web-map rendering.
//!
//! Ice-chart polygons straddle the antimeridian in the Bering Sea. Web
//! mapping libraries draw such polygons as bands wrapping the whole globe
//! when their longitudes stay in [-180, 180], so every vertex is shifted
//! into the [-360, 0] band before rendering.

pub mod antimeridian;

pub use antimeridian::{convert_to_360_transform, reproject_to_360, shift_position};
