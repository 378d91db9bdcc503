//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset. All methods take `buffer: &str`
//! explicitly; the text itself is owned by `InputBox`.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    pub fn to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
    }

    /// Returns `true` if the cursor moved.
    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    /// Returns `true` if the cursor moved.
    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    /// Display column of the cursor (wide chars count double).
    pub fn column(&self, buffer: &str) -> u16 {
        buffer[..self.pos].width() as u16
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
