//! Pure domain types with minimal dependencies
//!
//! This module contains the sky and screen types used throughout the crate.
//! Types here should have no rendering or transport dependencies
//! to avoid circular dependencies.

pub mod geometry;
pub mod interaction;
pub mod sky;

pub use geometry::*;
pub use interaction::*;
pub use sky::*;
