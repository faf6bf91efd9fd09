//! Sky map projection and interaction engine
//!
//! Projects catalog scan results onto a drawing surface, hit-tests the
//! pointer for hover tooltips and turns drag-selected rectangles into new
//! scan requests.

pub mod config;
pub mod core;
pub mod domain;
pub mod projection;
pub mod render;
pub mod session;
pub mod widget;
