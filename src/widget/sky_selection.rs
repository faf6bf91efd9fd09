//! Rectangle selection on the sky map
//!
//! A press starts a drag at an anchor point, moves stretch a normalized
//! rectangle from the anchor, and a release converts the rectangle into a
//! new view. Leaving the surface mid-drag discards the rectangle.

use crate::domain::{ScreenPoint, SelectionRect, Size, View};
use crate::projection::Projection;

/// Smallest radius a committed selection can produce, in degrees
pub const MIN_RADIUS_DEG: f64 = 0.1;
/// Decimal places kept for a committed center
pub const CENTER_DECIMALS: i32 = 6;
/// Decimal places kept for a committed radius
pub const RADIUS_DECIMALS: i32 = 4;

/// Drag state of the selection gesture
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        anchor: ScreenPoint,
        rect: SelectionRect,
    },
}

#[derive(Default, Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// The rectangle being dragged, if any
    pub fn rect(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Dragging { rect, .. } => Some(rect),
            SelectionState::Idle => None,
        }
    }

    /// Start a drag at `point`
    ///
    /// Ignored unless selection is enabled and no scan is running.
    /// Returns whether a drag started.
    pub fn press(&mut self, point: ScreenPoint, enabled: bool, scan_in_flight: bool) -> bool {
        if !enabled || scan_in_flight {
            return false;
        }
        self.state = SelectionState::Dragging {
            anchor: point,
            rect: SelectionRect::at(point),
        };
        true
    }

    /// Stretch the rectangle to `point`
    pub fn drag(&mut self, point: ScreenPoint) -> Option<SelectionRect> {
        match &mut self.state {
            SelectionState::Dragging { anchor, rect } => {
                *rect = SelectionRect::from_corners(*anchor, point);
                Some(*rect)
            }
            SelectionState::Idle => None,
        }
    }

    /// Finish the drag and compute the view covering the rectangle
    pub fn release(&mut self, view: &View, size: Size) -> Option<View> {
        let rect = self.rect()?;
        self.state = SelectionState::Idle;
        commit_view(rect, view, size)
    }

    /// Abort the drag without producing a view
    pub fn leave(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = SelectionState::Idle;
        was_dragging
    }
}

/// Round half away from zero at `decimals` places
///
/// Works on the binary value scaled by `10^decimals`, so an exact decimal
/// tie can land one unit in the last place away from a decimal-string
/// rounding of the same number. Both agree well within 1e-6.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Convert a selection rectangle drawn over `view` into a new view
///
/// The center is the rectangle's center mapped back to the sky. The radius
/// is half the longer side in degrees, never below [`MIN_RADIUS_DEG`].
pub fn commit_view(rect: SelectionRect, view: &View, size: Size) -> Option<View> {
    let projection = Projection::new(view, size);
    let center = projection.unproject(rect.center());
    let radius = (rect.max_side() / projection.scale() / 2.0).max(MIN_RADIUS_DEG);

    match View::new(
        round_to(center.ra, CENTER_DECIMALS),
        round_to(center.dec, CENTER_DECIMALS),
        round_to(radius, RADIUS_DECIMALS),
    ) {
        Ok(view) => Some(view),
        Err(err) => {
            log::warn!("Discarding selection {:?}: {}", rect, err);
            None
        }
    }
}
