//! Interaction modes and pointer events for the sky map surface

use super::geometry::ScreenPoint;

/// What pointer movement over the map does
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Pointer movement hit-tests objects and shows tooltips
    #[default]
    Hover,
    /// Pointer drags draw a selection rectangle that triggers a rescan
    Select,
}

impl InteractionMode {
    /// Whether selection gestures are accepted in this mode
    pub fn is_selecting(self) -> bool {
        matches!(self, InteractionMode::Select)
    }
}

/// Pointer input, positioned in viewport (client) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(ScreenPoint),
    Move(ScreenPoint),
    Up(ScreenPoint),
    /// Pointer left the drawing surface
    Leave,
}
