use ropey::Rope;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A rope-backed text buffer with a single cursor.
///
/// The cursor is a char index into the whole text, so multi-byte characters
/// never need byte bookkeeping. Line and column are derived on demand.
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    /// Column to return to on vertical movement.
    col_memory: usize,
    dirty: bool,
}

impl TextBuffer {
    /// Create a buffer with the cursor at the end of `text`.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        let mut buf = Self {
            rope,
            cursor,
            col_memory: 0,
            dirty: false,
        };
        buf.col_memory = buf.column();
        buf
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Char index of the cursor.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Zero-based line of the cursor.
    pub fn line(&self) -> usize {
        self.rope.char_to_line(self.cursor)
    }

    /// Zero-based column of the cursor, in chars.
    pub fn column(&self) -> usize {
        self.cursor - self.rope.line_to_char(self.line())
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.set_cursor(self.cursor + 1);
        self.dirty = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.rope.insert(self.cursor, s);
        self.set_cursor(self.cursor + s.chars().count());
        self.dirty = true;
    }

    /// Delete the character before the cursor. Returns false at the start.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.set_cursor(self.cursor - 1);
        self.dirty = true;
        true
    }

    /// Delete the character under the cursor. Returns false at the end.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..=self.cursor);
        self.dirty = true;
        true
    }

    /// Remove everything. The cursor moves to the start.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.rope = Rope::new();
        self.set_cursor(0);
        self.dirty = true;
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.set_cursor(self.cursor.saturating_sub(1)),
            Direction::Right => self.set_cursor((self.cursor + 1).min(self.rope.len_chars())),
            Direction::Up => {
                let line = self.line();
                if line > 0 {
                    self.move_vertical(line - 1);
                }
            }
            Direction::Down => {
                let line = self.line();
                if line + 1 < self.line_count() {
                    self.move_vertical(line + 1);
                }
            }
        }
    }

    /// Start of the current line.
    pub fn move_home(&mut self) {
        self.set_cursor(self.rope.line_to_char(self.line()));
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        let line = self.line();
        self.set_cursor(self.rope.line_to_char(line) + self.line_len(line));
    }

    /// Start of the previous word.
    pub fn move_word_left(&mut self) {
        let mut idx = self.cursor;
        while idx > 0 && !is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        self.set_cursor(idx);
    }

    /// Start of the next word.
    pub fn move_word_right(&mut self) {
        let len = self.rope.len_chars();
        let mut idx = self.cursor;
        while idx < len && is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        while idx < len && !is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        self.set_cursor(idx);
    }

    fn move_vertical(&mut self, target_line: usize) {
        let col = self.col_memory.min(self.line_len(target_line));
        self.cursor = self.rope.line_to_char(target_line) + col;
    }

    fn set_cursor(&mut self, idx: usize) {
        self.cursor = idx;
        self.col_memory = self.column();
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("chars", &self.rope.len_chars())
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_end() {
        let buf = TextBuffer::from_text("hello");
        assert_eq!(buf.cursor(), 5);
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = TextBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_insert_multibyte_is_char_indexed() {
        let mut buf = TextBuffer::from_text("caf");
        buf.insert_char('é');
        assert_eq!(buf.text(), "café");
        assert_eq!(buf.cursor(), 4);
        assert!(buf.is_dirty());
        buf.move_cursor(Direction::Left);
        buf.insert_str("ñ");
        assert_eq!(buf.text(), "cafñé");
    }

    #[test]
    fn test_delete_back_and_forward() {
        let mut buf = TextBuffer::from_text("día");
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "dí");
        assert!(!buf.delete_forward());
        buf.move_home();
        assert!(!buf.delete_back());
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "í");
    }

    #[test]
    fn test_left_right_clamp() {
        let mut buf = TextBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), 2);
        buf.move_home();
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_home_end_on_current_line() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.move_home();
        assert_eq!((buf.line(), buf.column()), (1, 0));
        buf.move_cursor(Direction::Up);
        buf.move_end();
        assert_eq!((buf.line(), buf.column()), (0, 3));
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut buf = TextBuffer::from_text("hello\nhi\nworld");
        buf.move_cursor(Direction::Up);
        assert_eq!((buf.line(), buf.column()), (1, 2));
        buf.move_cursor(Direction::Up);
        assert_eq!((buf.line(), buf.column()), (0, 5));
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.line(), 0);
    }

    #[test]
    fn test_word_movement() {
        let mut buf = TextBuffer::from_text("uno dos, tres");
        buf.move_word_left();
        assert_eq!(buf.cursor(), 9);
        buf.move_word_left();
        assert_eq!(buf.cursor(), 4);
        buf.move_word_right();
        assert_eq!(buf.cursor(), 9);
    }

    #[test]
    fn test_clear() {
        let mut buf = TextBuffer::from_text("text");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
        assert!(buf.is_dirty());
    }
}
