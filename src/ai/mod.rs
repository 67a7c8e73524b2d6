//! AI module for command safety analysis.
//!
//! This module builds the analysis prompt, talks to the completion provider,
//! normalizes the model's reply and tracks the request in flight.

pub mod checker;
pub mod client;
pub mod parser;
pub mod prompt;

pub use checker::{CheckerManager, analyze};
pub use client::{AiClient, CompletionInvoker};
pub use parser::normalize;
