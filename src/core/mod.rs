//! Core application module
//!
//! This module contains:
//! - The sky map application state machine
//! - The async session driver that runs scans
//! - The scan backend interface and HTTP client

pub mod app;
pub mod runtime;
pub mod scan;
