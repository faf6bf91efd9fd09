//! Tooltip placement for hovered sky objects

use crate::domain::{ScreenPoint, Size};

/// Gap between the pointer and the tooltip on each axis
pub const POINTER_OFFSET: f64 = 15.0;

/// Measures the rendered size of tooltip content
///
/// The hosting UI owns the tooltip element; placement only needs its size.
pub trait TooltipMeasure {
    fn measure(&self, content: &str) -> Size;
}

/// Fixed-pitch text measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f64,
    pub line_height: f64,
    /// Padding on each side
    pub padding: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
            padding: 8.0,
        }
    }
}

impl TooltipMeasure for MonospaceMeasure {
    fn measure(&self, content: &str) -> Size {
        let lines = content.lines().count().max(1);
        let widest = content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        Size::new(
            widest as f64 * self.char_width + self.padding * 2.0,
            lines as f64 * self.line_height + self.padding * 2.0,
        )
    }
}

/// Place a tooltip of `tooltip` size next to the pointer inside `viewport`
///
/// Prefers down-right of the pointer. Each axis independently flips to the
/// other side of the pointer when the tooltip would cross the viewport's
/// right or bottom edge.
pub fn place(pointer: ScreenPoint, tooltip: Size, viewport: Size) -> ScreenPoint {
    let mut x = pointer.x + POINTER_OFFSET;
    let mut y = pointer.y + POINTER_OFFSET;

    if x + tooltip.width > viewport.width {
        x = pointer.x - tooltip.width - POINTER_OFFSET;
    }
    if y + tooltip.height > viewport.height {
        y = pointer.y - tooltip.height - POINTER_OFFSET;
    }

    ScreenPoint::new(x, y)
}
