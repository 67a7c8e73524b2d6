//! Event handling for the application.
//!
//! User input (keyboard, resize) is read on a dedicated thread so the UI
//! stays responsive while a check is in flight. Finished checks arrive on a
//! separate channel owned by [`crate::ai::CheckerManager`].
//!
//! # Submodules
//!
//! - `checker`: Key event handling for the command form
//! - `settings`: Key event handling for the settings popup

pub mod checker;
pub mod settings;

use std::io::Result;
use std::thread;

use tokio::sync::mpsc::{self, Receiver};

use crate::ai::checker::RequestId;
use crate::error::CheckError;
use crate::security::CommandAnalysis;

/// Type alias for user input events from the terminal.
pub type UserEvent = crossterm::event::Event;

/// Initializes the user event stream.
///
/// Spawns a thread that blocks on `crossterm::event::read()` and forwards
/// every event. The thread ends once the receiver is dropped.
pub fn init_user_event() -> Receiver<Result<UserEvent>> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || {
        loop {
            if tx.blocking_send(crossterm::event::read()).is_err() {
                break;
            }
        }
    });
    rx
}

// =============================================================================
// Check results
// =============================================================================

/// Result of a spawned check, sent back to the manager.
#[derive(Debug)]
pub struct CheckData {
    pub request_id: RequestId,
    pub command: String,
    pub model: String,
    pub result: std::result::Result<CommandAnalysis, CheckError>,
}

/// Finished check, as forwarded to the UI.
#[derive(Debug)]
pub enum CheckUpdate {
    Completed {
        command: String,
        model: String,
        analysis: CommandAnalysis,
    },
    Failed {
        error: CheckError,
        message: String,
    },
}
