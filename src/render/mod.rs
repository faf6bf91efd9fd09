//! Sky map rendering module
//!
//! This module contains:
//! - Marker geometry shared between drawing and hit-testing
//! - Sky map drawing onto a tiny-skia surface

pub mod geometry;
pub mod sky_map;

pub use sky_map::{RenderInput, SkySurface, draw_sky_map};
