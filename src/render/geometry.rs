//! Shared marker geometry
//!
//! Constants and math shared between drawing (tiny-skia) and the hit tester,
//! so that what is clickable matches what is drawn.

/// Field star marker geometry
pub mod star {
    /// Smallest star radius in pixels
    pub const MIN_RADIUS: f64 = 0.8;
    /// Radius of a magnitude 0 star in pixels
    pub const BASE_RADIUS: f64 = 3.5;
    /// Magnitudes per pixel of radius lost
    pub const MAG_PER_PIXEL: f64 = 4.0;
    /// Faintest drawn opacity
    pub const MIN_OPACITY: f64 = 0.4;
    /// Magnitude span over which opacity falls from 1 to 0
    pub const OPACITY_MAG_SPAN: f64 = 20.0;
    /// Extra hover tolerance beyond the drawn radius
    pub const HIT_SLOP: f64 = 3.0;
    /// Glow halo extent beyond the drawn radius
    pub const GLOW: f32 = 2.0;
    /// Glow halo alpha (0-255)
    pub const GLOW_ALPHA: u8 = 64;

    /// Drawn radius for a star of the given magnitude. Brighter stars are bigger.
    #[inline]
    pub fn radius(mag: f64) -> f64 {
        (BASE_RADIUS - mag / MAG_PER_PIXEL).max(MIN_RADIUS)
    }

    /// Drawn opacity for a star of the given magnitude
    #[inline]
    pub fn opacity(mag: f64) -> f64 {
        (1.0 - mag / OPACITY_MAG_SPAN).max(MIN_OPACITY)
    }
}

/// Anomaly marker geometry
pub mod anomaly {
    /// Side of the square marker in pixels
    pub const SIZE: f64 = 12.0;
    /// Hover tolerance on each axis from the marker center
    pub const HIT_TOLERANCE: f64 = 7.0;
    /// Stroke width of a normal marker
    pub const THICKNESS: f32 = 2.0;
    /// Stroke width of the highlighted marker
    pub const HIGHLIGHT_THICKNESS: f32 = 3.0;
    /// Glow stroke width beyond the marker stroke
    pub const GLOW: f32 = 4.0;
    /// Glow alpha of a normal marker (0-255)
    pub const GLOW_ALPHA: u8 = 70;
    /// Glow alpha of the highlighted marker (0-255)
    pub const HIGHLIGHT_GLOW_ALPHA: u8 = 140;
}

/// Selection rectangle outline
pub mod selection {
    pub const THICKNESS: f32 = 1.5;
    /// Dash and gap length in pixels
    pub const DASH: f32 = 5.0;
}
