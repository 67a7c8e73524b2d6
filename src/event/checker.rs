//! Key event handling for the command form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::ai::checker::{CheckerManager, Submission};
use crate::config::Settings;
use crate::error::CheckError;
use crate::ui::checker::TuiChecker;

/// Handle key events for the command form.
///
/// Global shortcuts (quit, settings, theme, copy) are handled by the app
/// before this is called.
pub fn handle_key_event(
    form: &mut TuiChecker,
    checker: &mut CheckerManager,
    settings: &Settings,
    key_evt: KeyEvent,
) {
    let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);

    match key_evt.code {
        // Submit; ignored while a request is outstanding
        KeyCode::Enter => {
            if checker.is_busy() {
                return;
            }
            submit(form, checker, settings);
        }

        // Reset form and forget any pending reply
        KeyCode::Esc => reset(form, checker),
        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => reset(form, checker),

        // Ctrl+U: clear input only
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => form.input_mut().clear(),

        KeyCode::Tab | KeyCode::BackTab => form.toggle_tier(),

        KeyCode::Char(c) if !ctrl => form.input_mut().insert_char(c),
        KeyCode::Backspace => form.input_mut().delete_char(),
        KeyCode::Delete => form.input_mut().delete_char_forward(),
        KeyCode::Left => form.input_mut().move_cursor(-1),
        KeyCode::Right => form.input_mut().move_cursor(1),
        KeyCode::Home => form.input_mut().move_cursor_to_start(),
        KeyCode::End => form.input_mut().move_cursor_to_end(),

        // Result scrolling
        KeyCode::Up => form.scroll(-1),
        KeyCode::Down => form.scroll(1),
        KeyCode::PageUp => form.scroll(-10),
        KeyCode::PageDown => form.scroll(10),

        _ => {}
    }
}

fn submit(form: &mut TuiChecker, checker: &mut CheckerManager, settings: &Settings) {
    let command = form.input().text().to_string();

    match checker.submit(&command, form.tier(), settings) {
        Ok(Submission::Started(id)) => {
            debug!(request_id = id, "Check started");
            form.start_loading();
        }
        Ok(Submission::Busy) => {}
        Err(e) => form.show_error(CheckError::from(e).user_message()),
    }
}

fn reset(form: &mut TuiChecker, checker: &mut CheckerManager) {
    checker.reset();
    form.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tier;
    use crate::ui::checker::CheckStatus;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_on_blank_input_shows_validation_error() {
        let mut form = TuiChecker::new(Tier::Fast);
        let mut checker = CheckerManager::new();
        let settings = Settings::default();

        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Char(' ')));
        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Enter));

        match form.status() {
            CheckStatus::Failed(message) => assert_eq!(message, "Please enter a command to analyze."),
            other => panic!("unexpected status: {:?}", other),
        }
        assert!(!checker.is_busy());
    }

    #[test]
    fn test_missing_key_blocks_submission() {
        let mut form = TuiChecker::new(Tier::Fast);
        let mut checker = CheckerManager::with_key_source(|| None);
        let settings = Settings::default();

        for c in "ls".chars() {
            handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Enter));

        match form.status() {
            CheckStatus::Failed(message) => assert_eq!(
                message,
                "No API key configured. Set OPENAI_API_KEY or add a key in settings (Ctrl+S)."
            ),
            other => panic!("unexpected status: {:?}", other),
        }
        assert!(!checker.is_busy());
    }

    #[test]
    fn test_tab_toggles_tier_and_esc_resets() {
        let mut form = TuiChecker::new(Tier::Fast);
        let mut checker = CheckerManager::new();
        let settings = Settings::default();

        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Tab));
        assert_eq!(form.tier(), Tier::Accurate);

        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Char('x')));
        handle_key_event(&mut form, &mut checker, &settings, key(KeyCode::Esc));
        assert!(form.input().is_empty());
    }
}
