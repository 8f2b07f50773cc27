//! Minimal multi-line text editing for the review and rephrase panels.
//!
//! The text itself lives in the session; a `TextCursor` only tracks a byte
//! offset into it. The offset is re-clamped before every operation because
//! the session may replace the text underneath (e.g. a new rephrase result).

use unicode_width::UnicodeWidthChar;

/// A cursor into an externally owned `String`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    offset: usize,
}

impl TextCursor {
    pub fn at_end(text: &str) -> Self {
        Self { offset: text.len() }
    }

    fn clamp(&mut self, text: &str) {
        let mut offset = self.offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.offset = offset;
    }

    pub fn insert_char(&mut self, text: &mut String, ch: char) {
        self.clamp(text);
        text.insert(self.offset, ch);
        self.offset += ch.len_utf8();
    }

    pub fn insert_str(&mut self, text: &mut String, s: &str) {
        self.clamp(text);
        text.insert_str(self.offset, s);
        self.offset += s.len();
    }

    /// Deletes the char before the cursor. Returns whether anything changed.
    pub fn backspace(&mut self, text: &mut String) -> bool {
        self.clamp(text);
        match text[..self.offset].chars().next_back() {
            Some(ch) => {
                self.offset -= ch.len_utf8();
                text.remove(self.offset);
                true
            }
            None => false,
        }
    }

    /// Deletes the char under the cursor. Returns whether anything changed.
    pub fn delete(&mut self, text: &mut String) -> bool {
        self.clamp(text);
        if self.offset < text.len() {
            text.remove(self.offset);
            true
        } else {
            false
        }
    }

    pub fn left(&mut self, text: &str) {
        self.clamp(text);
        if let Some(ch) = text[..self.offset].chars().next_back() {
            self.offset -= ch.len_utf8();
        }
    }

    pub fn right(&mut self, text: &str) {
        self.clamp(text);
        if let Some(ch) = text[self.offset..].chars().next() {
            self.offset += ch.len_utf8();
        }
    }

    /// Start of the current line.
    pub fn home(&mut self, text: &str) {
        self.clamp(text);
        self.offset = text[..self.offset].rfind('\n').map_or(0, |i| i + 1);
    }

    /// End of the current line.
    pub fn end(&mut self, text: &str) {
        self.clamp(text);
        self.offset = text[self.offset..]
            .find('\n')
            .map_or(text.len(), |i| self.offset + i);
    }

    /// Byte offset of the cursor, clamped to `text`.
    fn offset_in(&self, text: &str) -> usize {
        let mut cursor = *self;
        cursor.clamp(text);
        cursor.offset
    }
}

fn cell_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Hard-wraps `text` at `width` terminal cells per row, keeping explicit
/// newlines. A wide char that does not fit moves to the next row.
///
/// Used instead of `Paragraph::wrap` for editable text so the cursor row and
/// column can be computed with the same rule.
pub fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut col = 0;
        for ch in line.chars() {
            let w = cell_width(ch);
            if col > 0 && col + w > width {
                rows.push(std::mem::take(&mut row));
                col = 0;
            }
            row.push(ch);
            col += w;
        }
        rows.push(row);
    }
    rows
}

/// Visual `(row, cell column)` of the cursor inside [`hard_wrap`] output.
pub fn wrapped_cursor(text: &str, cursor: &TextCursor, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let offset = cursor.offset_in(text);
    let (mut row, mut col) = (0, 0);
    for (i, ch) in text.char_indices() {
        if ch == '\n' {
            if i == offset {
                return (row, col);
            }
            row += 1;
            col = 0;
            continue;
        }
        let w = cell_width(ch);
        if col > 0 && col + w > width {
            row += 1;
            col = 0;
        }
        if i == offset {
            return (row, col);
        }
        col += w;
    }
    if col >= width {
        (row + 1, 0)
    } else {
        (row, col)
    }
}
