//! Application state management.
//!
//! This module defines the main App struct that holds the global state: the
//! check manager, the loaded settings and the form widgets. It runs the
//! event loop and routes keys to the form or the settings popup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::Receiver;
use tracing::{error, info};

use crate::ai::checker::CheckerManager;
use crate::config::{Settings, persistence};
use crate::event::settings::SettingsAction;
use crate::event::{UserEvent, checker as checker_event, init_user_event, settings as settings_event};
use crate::ui::checker::TuiChecker;
use crate::ui::layout::FormLayout;
use crate::ui::settings::TuiSettings;
use crate::ui::theme::Palette;
use crate::utils::clipboard;

/// Redraw interval while a check is in flight (drives the spinner).
const TICK: Duration = Duration::from_millis(120);

pub struct App {
    // backend
    checker: CheckerManager,
    settings: Settings,
    settings_path: PathBuf,

    // frontend widgets
    pub(crate) tui_checker: TuiChecker,
    pub(crate) tui_settings: TuiSettings,

    exit: bool,
    layout: FormLayout,

    // events sources
    user_events: Receiver<std::io::Result<UserEvent>>,
}

impl App {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            checker: CheckerManager::new(),
            tui_checker: TuiChecker::new(settings.default_tier),
            tui_settings: TuiSettings::new(),
            settings,
            settings_path,
            exit: false,
            layout: FormLayout::default(),
            user_events: init_user_event(),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut tick = tokio::time::interval(TICK);
        loop {
            if self.exit {
                break Ok(());
            }
            tokio::select! {
                res = self.user_events.recv() => {
                    let usr_evt = res.with_context(|| anyhow::anyhow!("User event stream is ended."))?;
                    self.handle_user_event(usr_evt?);
                }
                // Stale replies come back as None and are ignored
                update = self.checker.recv_update() => {
                    if let Some(update) = update {
                        self.tui_checker.handle_update(update);
                    }
                }
                _ = tick.tick(), if self.tui_checker.is_loading() => {}
            }
            self.draw(terminal)?;
        }
    }

    pub fn draw(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            if self.layout.full_area != area {
                self.layout = FormLayout::new(area);
            }

            use ratatui::widgets::Widget;
            (&*self).render(area, frame.buffer_mut());
        })?;

        self.update_cursor_position(terminal)?;
        Ok(())
    }

    fn update_cursor_position(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        if self.tui_settings.is_open() {
            let popup = TuiSettings::popup_area(self.layout.full_area);
            terminal.show_cursor()?;
            terminal.set_cursor_position(self.tui_settings.cursor_position(popup))?;
            return Ok(());
        }

        if self.tui_checker.is_loading() {
            terminal.hide_cursor()?;
            return Ok(());
        }

        let column = self.tui_checker.input().cursor_column();
        terminal.show_cursor()?;
        terminal.set_cursor_position(self.layout.input_cursor(column))?;
        Ok(())
    }
}

impl App {
    fn handle_user_event(&mut self, event: UserEvent) {
        // Resize and others just trigger the redraw after this returns
        let UserEvent::Key(key_evt) = event else {
            return;
        };
        if !matches!(key_evt.kind, KeyEventKind::Press) {
            return;
        }

        let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key_evt.code, KeyCode::Char('c') | KeyCode::Char('C')) {
            self.exit = true;
            return;
        }

        if self.tui_settings.is_open() {
            self.handle_settings_key(key_evt);
            return;
        }

        if ctrl {
            match key_evt.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.exit = true;
                    return;
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    self.tui_settings.open(&self.settings);
                    return;
                }
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.settings.theme = self.settings.theme.toggle();
                    self.save_settings();
                    return;
                }
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.copy_report();
                    return;
                }
                _ => {}
            }
        }

        checker_event::handle_key_event(
            &mut self.tui_checker,
            &mut self.checker,
            &self.settings,
            key_evt,
        );
    }

    fn handle_settings_key(&mut self, key_evt: KeyEvent) {
        match settings_event::handle_key_event(&mut self.tui_settings, key_evt) {
            SettingsAction::None => {}
            SettingsAction::Cancel => self.tui_settings.close(),
            SettingsAction::Save => {
                self.tui_settings.apply(&mut self.settings);
                self.tui_settings.close();
                if self.save_settings() {
                    self.tui_checker.set_notice("Settings saved");
                }
            }
        }
    }

    /// Persist current settings. Failures are logged and shown, not fatal.
    fn save_settings(&mut self) -> bool {
        match persistence::save(&self.settings_path, &self.settings) {
            Ok(()) => {
                info!("Settings saved to {}", self.settings_path.display());
                true
            }
            Err(e) => {
                error!("Failed to save settings: {:#}", e);
                self.tui_checker.set_notice("Could not save settings (see log)");
                false
            }
        }
    }

    fn copy_report(&mut self) {
        let Some(report) = self.tui_checker.report() else {
            self.tui_checker.set_notice("Nothing to copy yet");
            return;
        };

        if clipboard::copy_to_clipboard(&report) {
            self.tui_checker.set_notice("Analysis copied to clipboard");
        } else {
            self.tui_checker.set_notice("Clipboard unavailable");
        }
    }
}
