//! Single-line text input with a character cursor.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    /// Cursor position in chars, `0..=text.chars().count()`.
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        // Newlines would break the single-line layout
        if c == '\n' || c == '\r' {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor (Backspace).
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    /// Delete the char under the cursor (Delete).
    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.text.chars().count();
        self.cursor = self.cursor.saturating_add_signed(delta).min(len);
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> u16 {
        let before: String = self.text.chars().take(self.cursor).collect();
        u16::try_from(before.width()).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut input = InputLine::new();
        for c in "lsa".chars() {
            input.insert_char(c);
        }
        input.move_cursor(-1);
        input.insert_char(' ');
        input.insert_char('-');
        assert_eq!(input.text(), "ls -a");

        input.delete_char();
        input.delete_char_forward();
        assert_eq!(input.text(), "ls ");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputLine::with_text("pwd");
        input.move_cursor(10);
        input.delete_char_forward();
        assert_eq!(input.text(), "pwd");

        input.move_cursor(-10);
        input.delete_char();
        assert_eq!(input.text(), "pwd");
        assert_eq!(input.cursor_column(), 0);
    }

    #[test]
    fn test_multibyte_text() {
        let mut input = InputLine::with_text("echo 日本");
        input.delete_char();
        assert_eq!(input.text(), "echo 日");
        assert_eq!(input.cursor_column(), 7);
    }

    #[test]
    fn test_newline_ignored() {
        let mut input = InputLine::new();
        input.insert_char('\n');
        assert!(input.is_empty());
    }
}
