//! Bounded single-byte line buffer with a cursor.
//!
//! The buffer holds at most `capacity - 1` bytes, mirroring a C string
//! that reserves its last byte for the terminator. Growing past that limit
//! never fails: the byte that no longer fits is dropped.

use alloc::vec::Vec;
use core::str::{from_utf8, Utf8Error};

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
pub struct LineBuffer {
    text: Vec<u8>,
    capacity: usize,
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty buffer.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`, as there would be no room for a single
    /// character.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "line capacity must be at least 2");

        Self {
            text: Vec::with_capacity(capacity - 1),
            capacity,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Longest text the buffer will hold
    pub fn max_len(&self) -> usize {
        self.capacity - 1
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// Text as `str`, fails if a non-ASCII byte was entered literally
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        from_utf8(&self.text)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if the line holds nothing but spaces and tabs
    pub fn is_blank(&self) -> bool {
        self.text.iter().all(|&b| b == b' ' || b == b'\t')
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.text.get(index).copied()
    }

    /// Replace the text, truncating what does not fit. The cursor is
    /// clamped to the new length.
    pub fn set_text(&mut self, text: &[u8]) {
        let len = text.len().min(self.max_len());

        self.text.clear();
        self.text.extend_from_slice(&text[..len]);
        self.cursor = self.cursor.min(self.text.len());
    }

    /// Copy text from another buffer, keeping our own capacity.
    pub fn copy_from(&mut self, other: &LineBuffer) {
        self.set_text(other.as_bytes());
    }

    /// Replace text and cursor with a remembered pair.
    pub fn restore(&mut self, text: &[u8], cursor: usize) {
        self.set_text(text);
        self.cursor = cursor.min(self.text.len());
    }

    /// Insert `byte` at `pos`.
    ///
    /// The position is clamped to `capacity - 2` so there is always a slot
    /// to write into. When the buffer is full the last byte is dropped to
    /// make room.
    pub fn insert_at(&mut self, pos: usize, byte: u8) {
        let max_len = self.max_len();
        let pos = pos.min(max_len - 1).min(self.text.len());

        if self.text.len() >= max_len {
            self.text.truncate(max_len - 1);
        }

        self.text.insert(pos, byte);
        self.cursor = self.cursor.min(self.text.len());
    }

    /// Remove the byte at `pos`. Does nothing at or past the end of text.
    pub fn delete_at(&mut self, pos: usize) {
        if pos < self.text.len() {
            self.text.remove(pos);
            self.cursor = self.cursor.min(self.text.len());
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let max = self.text.len().min(self.max_len());

        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.text.len().min(self.max_len());
    }

    /// Insert at the cursor and step past the new byte.
    pub fn append_char(&mut self, byte: u8) {
        self.insert_at(self.cursor, byte);
        self.cursor_right();
    }

    /// Delete the byte left of the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor_left();
            self.delete_at(self.cursor);
        }
    }

    /// Move to the start of the next word: a non-space preceded by a
    /// space, or the end of line.
    pub fn word_right(&mut self) {
        let end = self.text.len();

        self.cursor_right();

        while self.cursor < end {
            let passed = self.byte_at(self.cursor);

            self.cursor_right();

            if passed == Some(b' ') && self.byte_at(self.cursor) != Some(b' ') {
                break;
            }
        }
    }

    fn scan_word_left(&mut self) {
        self.cursor_left();

        while self.cursor > 0 {
            let passed = self.byte_at(self.cursor);

            self.cursor_left();

            if self.byte_at(self.cursor) == Some(b' ') && passed != Some(b' ') {
                self.cursor_right();
                break;
            }
        }
    }

    /// Move to the start of the previous word, or the start of line.
    ///
    /// With `delete_along` the bytes between the new cursor and the old one
    /// are removed.
    pub fn word_left(&mut self, delete_along: bool) {
        let start = self.cursor;

        self.scan_word_left();

        if delete_along {
            self.text.drain(self.cursor..start);
        }
    }

    /// Truncate at the cursor.
    pub fn clear_to_end(&mut self) {
        self.text.truncate(self.cursor);
        self.cursor_to_end();
    }

    pub fn clear_all(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
