//! RustyGuard - check how safe a shell command is before running it
//!
//! The command is sent to an LLM with a fixed prompt; the model's free-form
//! reply is normalized into a [`CommandAnalysis`] (explanation, safety level,
//! risks and recommendations) or a diagnosed [`CheckError`].
//!
//! This library provides:
//! - Prompt building and the completion client
//! - The response normalizer (tolerant extraction, strict validation)
//! - Settings persistence
//! - The TUI form and a one-shot CLI
//!
//! # Example
//!
//! ```
//! use rusty_guard::ai::normalize;
//!
//! let reply = "Sure! ```json\n{\"explanation\":\"Lists files.\",\"safety\":\"Safe\",\"risks\":[],\"recommendations\":[]}\n```";
//! let analysis = normalize(reply).unwrap();
//! assert_eq!(analysis.safety_level.as_str(), "Safe");
//! ```

pub mod ai;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod security;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use ai::{AiClient, CheckerManager, CompletionInvoker};
pub use app::App;
pub use config::{Settings, Theme, Tier};
pub use error::{CheckError, ParseError, ProviderError, ValidationError};
pub use security::{CommandAnalysis, SafetyLevel};
