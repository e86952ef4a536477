//! One level undo for the clearing commands.
//!
//! Pressing a clear key once clears and remembers the line. Pressing the
//! same key again straight away puts the line back. Any other key in
//! between forgets the toggle, see [`UndoSlot::reset`].

use alloc::vec::Vec;

use crate::line_buffer::LineBuffer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UndoMode {
    /// Next trigger clears and remembers
    Save,
    /// Next trigger restores what was remembered
    Restore,
}

#[cfg_attr(test, derive(Debug))]
pub struct UndoSlot {
    saved_text: Vec<u8>,
    saved_cursor: usize,
    mode: UndoMode,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self {
            saved_text: Vec::new(),
            saved_cursor: 0,
            mode: UndoMode::Save,
        }
    }

    pub fn mode(&self) -> UndoMode {
        self.mode
    }

    /// Clear `line` with `clear` and remember it, or restore the remembered
    /// line if the previous trigger cleared it.
    pub fn save_and_clear(&mut self, line: &mut LineBuffer, clear: impl FnOnce(&mut LineBuffer)) {
        match self.mode {
            UndoMode::Save => {
                self.saved_text.clear();
                self.saved_text.extend_from_slice(line.as_bytes());
                self.saved_cursor = line.cursor();

                clear(line);

                self.mode = UndoMode::Restore;
            }
            UndoMode::Restore => {
                line.restore(&self.saved_text, self.saved_cursor);

                self.mode = UndoMode::Save;
            }
        }
    }

    /// Forget the toggle. The snapshot stays but will be overwritten by the
    /// next trigger.
    pub fn reset(&mut self) {
        self.mode = UndoMode::Save;
    }
}

impl Default for UndoSlot {
    fn default() -> Self {
        Self::new()
    }
}
