//! Single-line text being composed in the input field.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputBuffer {
    text: String,
    /// Cursor as a character index, not a byte offset.
    cursor: usize,
}

impl InputBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Terminal columns occupied by the text left of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.byte_index(self.cursor)].width()
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.remove_at_cursor();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn remove_at_cursor(&mut self) {
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.drain(start..end);
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte_index, _)| byte_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputBuffer {
        let mut buffer = InputBuffer::default();
        text.chars().for_each(|ch| buffer.insert(ch));
        buffer
    }

    #[test]
    fn starts_empty() {
        let buffer = InputBuffer::default();

        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor_column(), 0);
    }

    #[test]
    fn insert_appends_at_cursor() {
        let buffer = typed("hi");

        assert_eq!(buffer.text(), "hi");
        assert_eq!(buffer.cursor_column(), 2);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut buffer = typed("hlo");
        buffer.move_left();
        buffer.move_left();
        buffer.insert('e');
        buffer.insert('l');

        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.cursor_column(), 3);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut buffer = typed("hey");
        buffer.backspace();

        assert_eq!(buffer.text(), "he");

        buffer.move_home();
        buffer.backspace();
        assert_eq!(buffer.text(), "he");
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut buffer = typed("hey");
        buffer.move_home();
        buffer.delete();

        assert_eq!(buffer.text(), "ey");
        assert_eq!(buffer.cursor_column(), 0);

        buffer.move_end();
        buffer.delete();
        assert_eq!(buffer.text(), "ey");
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut buffer = typed("ab");
        buffer.move_right();
        assert_eq!(buffer.cursor_column(), 2);

        buffer.move_left();
        buffer.move_left();
        buffer.move_left();
        assert_eq!(buffer.cursor_column(), 0);
    }

    #[test]
    fn edits_multibyte_text_by_character() {
        let mut buffer = typed("Привет");
        buffer.backspace();
        assert_eq!(buffer.text(), "Приве");

        buffer.move_home();
        buffer.delete();
        assert_eq!(buffer.text(), "риве");
    }

    #[test]
    fn cursor_column_counts_wide_characters() {
        let mut buffer = typed("日本");

        assert_eq!(buffer.cursor_column(), 4);

        buffer.move_left();
        assert_eq!(buffer.cursor_column(), 2);
    }

    #[test]
    fn clear_resets_text_and_cursor() {
        let mut buffer = typed("hello");
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor_column(), 0);
    }
}
