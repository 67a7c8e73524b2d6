use arboard::Clipboard;
use tracing::error;

/// Copy text to system clipboard.
/// Returns true if successful.
pub fn copy_to_clipboard(text: &str) -> bool {
    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to copy to clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            error!("Failed to access clipboard: {}", e);
            false
        }
    }
}
