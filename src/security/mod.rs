//! Security verdict types for analyzed commands.
//!
//! This module holds the structured analysis produced for a command and the
//! coarse severity used to colour it in the UI.

mod analysis;

pub use analysis::{CommandAnalysis, SafetyLevel};

/// Coarse classification of a [`SafetyLevel`] label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Safe,
    Caution,  // potentially dangerous
    Critical, // extremely dangerous
}
