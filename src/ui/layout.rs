use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Areas of the checker screen, computed from the full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormLayout {
    pub full_area: Rect,
    pub input: Rect,
    pub status: Rect,
    pub result: Rect,
    pub hints: Rect,
}

impl FormLayout {
    pub fn new(full_area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(full_area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // command input
                Constraint::Length(1), // mode + progress
                Constraint::Min(3),    // analysis
                Constraint::Length(1), // key hints
            ])
            .split(inner);

        Self {
            full_area,
            input: chunks[0],
            status: chunks[1],
            result: chunks[2],
            hints: chunks[3],
        }
    }

    /// Cursor position for the given column inside the input box.
    pub fn input_cursor(&self, column: u16) -> (u16, u16) {
        let max_x = self.input.x.saturating_add(self.input.width.saturating_sub(2));
        let x = self.input.x.saturating_add(1).saturating_add(column).min(max_x);
        (x, self.input.y.saturating_add(1))
    }
}
