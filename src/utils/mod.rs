//! Utility modules for common functionality.
//!
//! Logging setup, clipboard access and the terminal restore guard.

pub mod clipboard;
pub mod context;
pub mod logger;
