//! User interface module for the TUI application.
//!
//! This module contains the command form, the settings popup, layout and
//! theme handling. [`App`] itself is rendered through the `Widget` impl below.

use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::App;

pub mod checker;
pub mod input;
pub mod layout;
pub mod settings;
pub mod theme;

use layout::FormLayout;

const HINTS: &str = "Enter analyze · Tab mode · Esc reset · Ctrl+Y copy · Ctrl+D theme · Ctrl+S settings · Ctrl+Q quit";

impl Widget for &App {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer) {
        let palette = self.palette();
        let layout = FormLayout::new(area);

        let outer_block = Block::new()
            .borders(Borders::all())
            .border_style(Style::default().fg(palette.muted))
            .style(Style::default().bg(palette.background).fg(palette.foreground))
            .title(Line::from(" RustyGuard · command safety check ".bold()));
        outer_block.render(area, buf);

        let form = &self.tui_checker;
        form.render_input(layout.input, buf, &palette, !self.tui_settings.is_open());
        form.render_status(layout.status, buf, &palette);
        form.render_result(layout.result, buf, &palette);

        Paragraph::new(Line::from(Span::styled(HINTS, Style::default().fg(palette.muted))))
            .render(layout.hints, buf);

        if self.tui_settings.is_open() {
            self.tui_settings.render(area, buf, &palette);
        }
    }
}
