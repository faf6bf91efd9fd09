//! Screen-space geometry: points, sizes and selection rectangles

/// A point on the drawing surface or viewport, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate the point by the given offset
    pub fn translate(&self, dx: f64, dy: f64) -> ScreenPoint {
        ScreenPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel dimensions of a surface, viewport or measured element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter of the two sides
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Center point of an area of this size anchored at the origin
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether the size has no drawable area
    pub fn is_empty(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }
}

/// Axis-aligned rectangle drawn by a selection gesture
///
/// Always normalized: `x`/`y` is the top-left corner and both
/// dimensions are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    /// Zero-size rectangle located at a point
    pub fn at(point: ScreenPoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Bounding box of two arbitrary corner points
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Center of the rectangle
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The longer of the two sides
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }
}
