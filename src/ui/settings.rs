//! Settings popup: API key override and default analysis mode.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::config::{Settings, Tier};

use super::input::InputLine;
use super::theme::Palette;

#[derive(Debug, Default)]
pub struct TuiSettings {
    open: bool,
    api_key: InputLine,
    default_tier: Tier,
    /// Show the key in clear text instead of masked.
    reveal: bool,
}

impl TuiSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the panel, pre-filled from `settings`.
    pub fn open(&mut self, settings: &Settings) {
        self.api_key = InputLine::with_text(settings.api_key.clone().unwrap_or_default());
        self.default_tier = settings.default_tier;
        self.reveal = false;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.api_key.clear();
    }

    pub fn api_key_mut(&mut self) -> &mut InputLine {
        &mut self.api_key
    }

    pub fn toggle_default_tier(&mut self) {
        self.default_tier = self.default_tier.toggle();
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    /// Write the edited values into `settings`. A blank key removes the
    /// override.
    pub fn apply(&self, settings: &mut Settings) {
        let key = self.api_key.text().trim();
        settings.api_key = (!key.is_empty()).then(|| key.to_string());
        settings.default_tier = self.default_tier;
    }

    fn masked_key(&self) -> String {
        if self.reveal {
            self.api_key.text().to_string()
        } else {
            "*".repeat(self.api_key.text().chars().count())
        }
    }

    /// Popup area centered in `area`.
    pub fn popup_area(area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(10),
                Constraint::Fill(1),
            ])
            .split(area);
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Max(64),
                Constraint::Fill(1),
            ])
            .split(vertical[1])[1]
    }

    /// Screen position of the key field cursor for a popup at `popup`.
    pub fn cursor_position(&self, popup: Rect) -> (u16, u16) {
        let label_width = "API key: ".len() as u16;
        let column = if self.reveal {
            self.api_key.cursor_column()
        } else {
            // Masked chars are one column each
            u16::try_from(self.api_key.cursor()).unwrap_or(u16::MAX)
        };
        // Stay inside the right border
        let max_x = popup.x.saturating_add(popup.width.saturating_sub(2));
        let x = popup
            .x
            .saturating_add(2 + label_width)
            .saturating_add(column)
            .min(max_x);
        (x, popup.y.saturating_add(2))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.background))
            .title(" Settings ");

        let label = Style::default().fg(palette.muted);
        let value = Style::default().fg(palette.foreground);
        let tier_style = |tier: Tier| {
            if tier == self.default_tier {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                label
            }
        };

        let lines = vec![
            Line::default(),
            Line::from(vec![
                Span::raw(" "),
                Span::styled("API key: ", label),
                Span::styled(self.masked_key(), value),
            ]),
            Line::from(Span::styled(
                "  Leave blank to use OPENAI_API_KEY from the environment.",
                label,
            )),
            Line::default(),
            Line::from(vec![
                Span::raw(" "),
                Span::styled("Default mode: ", label),
                Span::styled(format!(" {} ", Tier::Fast.label()), tier_style(Tier::Fast)),
                Span::raw(" "),
                Span::styled(format!(" {} ", Tier::Accurate.label()), tier_style(Tier::Accurate)),
            ]),
            Line::default(),
            Line::from(Span::styled(
                " Enter save · Esc cancel · Tab mode · Ctrl+U clear · Ctrl+R reveal",
                label,
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup, buf);
    }
}
