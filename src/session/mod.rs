//! Sky map session management module
//!
//! This module contains:
//! - The view/result store
//! - Message types for session interactions

pub mod messages;
pub mod state;

pub use messages::{Command, Msg};
pub use state::{ScanStatus, ScanTicket, SkyMapState, Tooltip};
