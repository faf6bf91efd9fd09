//! Message types for a sky map session
//!
//! Everything that can change the session arrives as one of these, and is
//! processed one at a time by [`crate::core::app::App::update`].

use crate::core::scan::ScanError;
use crate::domain::{InteractionMode, ObjectId, PointerEvent, ScanResult, ScreenPoint, Size, View};
use crate::session::state::ScanTicket;

#[derive(Debug, Clone)]
pub enum Msg {
    /// Pointer input over the drawing surface, in viewport coordinates
    Pointer(PointerEvent),
    /// Switch between hovering and region selection
    SetMode(InteractionMode),
    /// A validated view from the manual input form
    SubmitView(View),
    /// The drawing surface moved or changed size within the viewport
    SurfaceResized { origin: ScreenPoint, size: Size },
    /// The viewport hosting surface and tooltip changed size
    ViewportResized(Size),
    /// Highlight an anomaly, e.g. picked from the anomaly list
    HighlightAnomaly(Option<ObjectId>),
    /// A scan issued earlier has resolved
    ScanFinished {
        seq: u64,
        outcome: Result<ScanResult, ScanError>,
    },
}

/// Work the host must perform after an update
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Command {
    #[default]
    None,
    /// Run this scan and report back with [`Msg::ScanFinished`]
    Scan(ScanTicket),
}
