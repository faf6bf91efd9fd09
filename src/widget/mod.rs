//! Interactive pieces of the sky map
//!
//! - Drag-to-select state machine that turns a rectangle into a new view
//! - Tooltip placement for hovered objects

pub mod sky_selection;
pub mod tooltip;

pub use sky_selection::{SelectionController, SelectionState};
pub use tooltip::{MonospaceMeasure, TooltipMeasure};
