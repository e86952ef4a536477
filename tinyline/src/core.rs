//! Core editor state machine.
//!
//! [`Editor`] owns the history ring (whose slot 0 is the line being
//! edited), one undo slot per clearing command and the key decoder. It
//! does no IO: feed it bytes with [`Editor::feed_byte`] and show
//! [`Editor::view`] after every completed command. The blocking loop
//! lives in [`crate::sync_editor`].

use alloc::string::String;

use tracing::{debug, trace};

use crate::history::HistoryRing;
use crate::input::{Command, EscapeMode, KeyDecoder};
use crate::line_buffer::LineBuffer;
use crate::undo::UndoSlot;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
    Accepted,
}

/// Result of feeding one byte
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Step {
    /// Command completed by this byte, None while inside a key sequence
    pub command: Option<Command>,
    pub state: SessionState,
    /// A history move that could not be made
    pub blocked: bool,
}

/// What the display needs to draw the line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineView<'a> {
    pub prompt: &'a str,
    pub text: &'a [u8],
    pub cursor: usize,
    pub literal: bool,
}

pub struct Editor {
    history: HistoryRing,
    clear_eol_undo: UndoSlot,
    clear_line_undo: UndoSlot,
    decoder: KeyDecoder,
    prompt: String,
    literal: bool,
    state: SessionState,
}

impl Editor {
    /// Create editor. It is recommended to use
    /// [`crate::builder::EditorBuilder`] instead.
    ///
    /// # Panics
    ///
    /// Panics if `max_line_length < 2` or `history_depth < 1`.
    pub fn new(
        max_line_length: usize,
        history_depth: usize,
        prompt: &str,
        escape_mode: EscapeMode,
    ) -> Self {
        Self {
            history: HistoryRing::new(history_depth, max_line_length),
            clear_eol_undo: UndoSlot::new(),
            clear_line_undo: UndoSlot::new(),
            decoder: KeyDecoder::new(escape_mode),
            prompt: prompt.into(),
            literal: false,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt.clear();
        self.prompt.push_str(prompt);
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// The live line
    pub fn line(&self) -> &LineBuffer {
        self.history.live()
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn view(&self) -> LineView<'_> {
        let line = self.history.live();

        LineView {
            prompt: &self.prompt,
            text: line.as_bytes(),
            cursor: line.cursor(),
            literal: self.literal,
        }
    }

    /// Begin reading a new line: empty live line, no navigation, both
    /// clear toggles in save mode.
    pub fn start_session(&mut self) {
        self.history.live_mut().clear_all();
        self.history.reset_navigation();
        self.clear_eol_undo.reset();
        self.clear_line_undo.reset();
        self.decoder.reset();
        self.literal = false;
        self.state = SessionState::Editing;
    }

    /// Advance editor by one byte.
    ///
    /// A session is started first if none is running, so feeding bytes
    /// after an accepted line begins the next one.
    pub fn feed_byte(&mut self, byte: u8) -> Step {
        if self.state != SessionState::Editing {
            self.start_session();
        }

        let command = if self.literal {
            self.literal = false;

            // A zero byte would only be the lead of a scan code
            Some(if byte == 0 {
                Command::Noop
            } else {
                Command::RawPassthrough(byte)
            })
        } else {
            self.decoder.advance(byte)
        };

        let blocked = match command {
            Some(command) => {
                let moved = self.apply(command);
                self.end_cycle(command);
                !moved
            }
            None => false,
        };

        Step {
            command,
            state: self.state,
            blocked,
        }
    }

    /// Apply one command. Returns false if a history move was blocked.
    fn apply(&mut self, command: Command) -> bool {
        let line = self.history.live_mut();

        match command {
            Command::InsertChar(byte) | Command::RawPassthrough(byte) => line.append_char(byte),
            Command::Backspace => line.backspace(),
            Command::DeleteChar => line.delete_at(line.cursor()),
            Command::CursorLeft => line.cursor_left(),
            Command::CursorRight => line.cursor_right(),
            Command::CursorSol => line.cursor_to_start(),
            Command::CursorEol => line.cursor_to_end(),
            Command::WordLeft => line.word_left(false),
            Command::WordRight => line.word_right(),
            Command::HistoryUp => return self.navigated(HistoryRing::navigate_up),
            Command::HistoryDown => return self.navigated(HistoryRing::navigate_down),
            Command::HistoryTop => return self.navigated(HistoryRing::navigate_top),
            Command::HistoryBottom => return self.navigated(HistoryRing::navigate_bottom),
            Command::ClearToEol => self
                .clear_eol_undo
                .save_and_clear(line, LineBuffer::clear_to_end),
            Command::ClearLine => self
                .clear_line_undo
                .save_and_clear(line, LineBuffer::clear_all),
            Command::ToggleLiteral => self.literal = !self.literal,
            Command::Accept => self.accept(),
            Command::Noop => (),
        }

        true
    }

    fn navigated(&mut self, navigate: fn(&mut HistoryRing) -> bool) -> bool {
        let moved = navigate(&mut self.history);

        if !moved {
            debug!(nav_pos = self.history.nav_pos(), "history navigation blocked");
        }

        moved
    }

    fn accept(&mut self) {
        self.history.reset_navigation();
        self.history.push();
        self.history.live_mut().cursor_to_end();
        self.state = SessionState::Accepted;

        trace!(len = self.history.live().len(), "line accepted");
    }

    // Toggles and navigation only survive if this cycle's command was the
    // one that set them.
    fn end_cycle(&mut self, command: Command) {
        if !command.is_history_navigation() {
            self.history.reset_navigation();
        }

        if command != Command::ClearToEol {
            self.clear_eol_undo.reset();
        }

        if command != Command::ClearLine {
            self.clear_line_undo.reset();
        }
    }

    /// Past lines, most recent first
    pub fn dump_history(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.history.entries()
    }

    /// Load history entries, oldest first. Returns the number stored.
    pub fn load_history<'a>(&mut self, entries: impl IntoIterator<Item = &'a [u8]>) -> usize {
        self.history.load_entries(entries)
    }
}
