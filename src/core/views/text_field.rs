//! Editable text buffer with a byte-offset cursor.
//!
//! Used for the composer's To, Subject and Body fields. Single-line fields
//! ignore Enter; multi-line fields insert a newline.

use crate::core::action::Key;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position as byte offset in value (0..=value.len())
    cursor: usize,
    multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns `true` if the field changed
    /// (content or cursor).
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.insert(c);
                true
            }
            Key::Enter if self.multiline => {
                self.insert('\n');
                true
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.value, self.cursor);
                self.value.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            Key::Delete => {
                if self.cursor >= self.value.len() {
                    return false;
                }
                let next = next_char_boundary(&self.value, self.cursor);
                self.value.drain(self.cursor..next);
                true
            }
            Key::Left => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor = prev_char_boundary(&self.value, self.cursor);
                true
            }
            Key::Right => {
                if self.cursor >= self.value.len() {
                    return false;
                }
                self.cursor = next_char_boundary(&self.value, self.cursor);
                true
            }
            Key::Home => {
                let line_start = self.value[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                let moved = self.cursor != line_start;
                self.cursor = line_start;
                moved
            }
            Key::End => {
                let line_end = self.value[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.value.len());
                let moved = self.cursor != line_end;
                self.cursor = line_end;
                moved
            }
            _ => false,
        }
    }

    fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
