//! Flat linear projection between equatorial coordinates and screen space
//!
//! Valid only for small fields of view: there is no handling of the
//! 0/360 degree RA seam and no polar distortion correction. Callers must
//! keep the view away from the RA seam.

use crate::domain::{ScreenPoint, Size, SkyCoord, View};

/// Margin factor so objects at the view radius do not touch the surface edge
pub const MARGIN_FACTOR: f64 = 2.2;

/// Pixels per degree for a view drawn on a surface of the given size
#[inline]
pub fn scale(view: &View, size: Size) -> f64 {
    size.min_side() / (view.radius_deg() * MARGIN_FACTOR)
}

/// Map a sky coordinate to a screen point. RA increases leftward and Dec upward.
pub fn project(coord: SkyCoord, view: &View, size: Size) -> ScreenPoint {
    Projection::new(view, size).project(coord)
}

/// Inverse of [`project`]
pub fn unproject(point: ScreenPoint, view: &View, size: Size) -> SkyCoord {
    Projection::new(view, size).unproject(point)
}

/// A projection bound to one view and one surface size
///
/// Build a fresh one for every render or hit-test pass; the surface may
/// have been resized since the last one.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    center: SkyCoord,
    origin: ScreenPoint,
    scale: f64,
}

impl Projection {
    pub fn new(view: &View, size: Size) -> Self {
        Self {
            center: view.center(),
            origin: size.center(),
            scale: scale(view, size),
        }
    }

    /// Pixels per degree
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn project(&self, coord: SkyCoord) -> ScreenPoint {
        ScreenPoint {
            x: (coord.ra - self.center.ra) * self.scale * -1.0 + self.origin.x,
            y: (coord.dec - self.center.dec) * self.scale * -1.0 + self.origin.y,
        }
    }

    pub fn unproject(&self, point: ScreenPoint) -> SkyCoord {
        SkyCoord {
            ra: self.center.ra + ((point.x - self.origin.x) / self.scale) * -1.0,
            dec: self.center.dec + ((point.y - self.origin.y) / self.scale) * -1.0,
        }
    }
}
