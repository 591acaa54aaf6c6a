//! Line-oriented editor buffer with a cursor.
//!
//! Cursor semantics follow the editor widget: `line` is 1-based, `col`
//! is a 0-based position between characters, so a cursor at col `c`
//! touches the characters at indices `c-1` and `c`.

/// Cursor position within a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column, between characters.
    pub col: usize,
}

/// The edited snippet as a list of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    pub cursor: Cursor,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Buffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cursor: Cursor { line: 1, col: 0 },
        }
    }

    /// Full buffer contents, newline-joined.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Contents of a 1-based line, if it exists.
    pub fn line(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.lines.get(line as usize - 1).map(String::as_str)
    }

    pub fn set_cursor(&mut self, line: u32, col: usize) {
        self.cursor = Cursor { line, col };
    }

    /// The maximal identifier (letters, digits, underscore) touching
    /// the cursor, or `None` if the cursor sits on whitespace or
    /// punctuation with no identifier character on either side.
    pub fn token_at_cursor(&self) -> Option<String> {
        let line = self.line(self.cursor.line)?;
        let chars: Vec<char> = line.chars().collect();
        let col = self.cursor.col.min(chars.len());

        let touches_left = col > 0 && is_ident_char(chars[col - 1]);
        let touches_right = col < chars.len() && is_ident_char(chars[col]);
        if !touches_left && !touches_right {
            return None;
        }

        let mut start = col;
        while start > 0 && is_ident_char(chars[start - 1]) {
            start -= 1;
        }
        let mut end = col;
        while end < chars.len() && is_ident_char(chars[end]) {
            end += 1;
        }
        Some(chars[start..end].iter().collect())
    }

    /// Splice `text` plus a newline in at the start of the 1-based
    /// `line`. Multi-line text becomes multiple lines. A line past the
    /// end appends.
    pub fn insert_line_at(&mut self, line: u32, text: &str) {
        let at = (line.max(1) as usize - 1).min(self.lines.len());
        for (offset, part) in text.split('\n').enumerate() {
            self.lines.insert(at + offset, part.to_string());
        }
    }

    /// Overwrite the full contents of the 1-based `line` with `text`.
    /// Multi-line text replaces the one line with several.
    pub fn replace_line(&mut self, line: u32, text: &str) {
        let at = (line.max(1) as usize - 1).min(self.lines.len().saturating_sub(1));
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.remove(at);
        for (offset, part) in text.split('\n').enumerate() {
            self.lines.insert(at + offset, part.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_inside_identifier() {
        let mut buffer = Buffer::from_text("  foo_bar2 + baz");
        buffer.set_cursor(1, 5);
        assert_eq!(buffer.token_at_cursor(), Some("foo_bar2".to_string()));
    }

    #[test]
    fn test_token_at_identifier_edges() {
        let mut buffer = Buffer::from_text("  foo_bar2 + baz");
        // Just before the first char: touches it on the right.
        buffer.set_cursor(1, 2);
        assert_eq!(buffer.token_at_cursor(), Some("foo_bar2".to_string()));
        // Just after the last char: touches it on the left.
        buffer.set_cursor(1, 10);
        assert_eq!(buffer.token_at_cursor(), Some("foo_bar2".to_string()));
    }

    #[test]
    fn test_no_token_on_bare_whitespace() {
        let mut buffer = Buffer::from_text("  foo_bar2 + baz");
        // Col 11 sits between the space and the '+'.
        buffer.set_cursor(1, 11);
        assert_eq!(buffer.token_at_cursor(), None);
    }

    #[test]
    fn test_no_token_on_empty_line() {
        let mut buffer = Buffer::from_text("foo\n\nbar");
        buffer.set_cursor(2, 0);
        assert_eq!(buffer.token_at_cursor(), None);
    }

    #[test]
    fn test_token_out_of_range_cursor_is_clamped() {
        let mut buffer = Buffer::from_text("baz");
        buffer.set_cursor(1, 99);
        assert_eq!(buffer.token_at_cursor(), Some("baz".to_string()));
    }

    #[test]
    fn test_insert_line_at_start_of_line() {
        let mut buffer = Buffer::from_text("foo : Nat\nbar : Nat");
        buffer.insert_line_at(2, "foo = ?rhs");
        assert_eq!(buffer.text(), "foo : Nat\nfoo = ?rhs\nbar : Nat");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut buffer = Buffer::from_text("foo : Nat");
        buffer.insert_line_at(10, "foo = ?rhs");
        assert_eq!(buffer.text(), "foo : Nat\nfoo = ?rhs");
    }

    #[test]
    fn test_replace_line() {
        let mut buffer = Buffer::from_text("foo : Nat\nfoo n = ?rhs");
        buffer.replace_line(2, "foo Z = ?rhs_1\nfoo (S k) = ?rhs_2");
        assert_eq!(
            buffer.text(),
            "foo : Nat\nfoo Z = ?rhs_1\nfoo (S k) = ?rhs_2"
        );
    }

    #[test]
    fn test_text_round_trip() {
        let text = "module Main\n\nmain : IO ()\nmain = putStrLn \"hi\"\n";
        assert_eq!(Buffer::from_text(text).text(), text);
    }
}
