//! Key event handling for the settings popup.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::settings::TuiSettings;

/// What the app should do after a key in the settings popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    Save,
    Cancel,
}

pub fn handle_key_event(panel: &mut TuiSettings, key_evt: KeyEvent) -> SettingsAction {
    let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);

    match key_evt.code {
        KeyCode::Enter => return SettingsAction::Save,
        KeyCode::Esc => return SettingsAction::Cancel,

        KeyCode::Tab | KeyCode::BackTab => panel.toggle_default_tier(),
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => panel.api_key_mut().clear(),
        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => panel.toggle_reveal(),

        KeyCode::Char(c) if !ctrl => panel.api_key_mut().insert_char(c),
        KeyCode::Backspace => panel.api_key_mut().delete_char(),
        KeyCode::Delete => panel.api_key_mut().delete_char_forward(),
        KeyCode::Left => panel.api_key_mut().move_cursor(-1),
        KeyCode::Right => panel.api_key_mut().move_cursor(1),
        KeyCode::Home => panel.api_key_mut().move_cursor_to_start(),
        KeyCode::End => panel.api_key_mut().move_cursor_to_end(),
        _ => {}
    }

    SettingsAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, Tier};

    #[test]
    fn test_typing_then_save() {
        let mut settings = Settings::default();
        let mut panel = TuiSettings::new();
        panel.open(&settings);

        for c in "sk-1".chars() {
            let action = handle_key_event(&mut panel, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
            assert_eq!(action, SettingsAction::None);
        }
        handle_key_event(&mut panel, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));

        let action = handle_key_event(&mut panel, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(action, SettingsAction::Save);

        panel.apply(&mut settings);
        assert_eq!(settings.api_key.as_deref(), Some("sk-1"));
        assert_eq!(settings.default_tier, Tier::Accurate);
    }

    #[test]
    fn test_escape_cancels() {
        let mut panel = TuiSettings::new();
        let action = handle_key_event(&mut panel, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(action, SettingsAction::Cancel);
    }
}
