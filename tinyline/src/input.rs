//! Key decoding
//!
//! [`KeyDecoder`] turns raw input bytes into [`Command`]s one byte at a
//! time. Two multi-byte encodings are understood side by side: DOS scan
//! codes (a zero byte followed by the scan code) and ANSI `ESC [`
//! sequences. A sequence that turns out not to match is abandoned and its
//! last byte is decoded again as fresh input, so the decoder never gets
//! stuck on garbage.
//!
//! The key bindings live in the tables below rather than in the state
//! machine.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::trace;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlCharacter {
    NUL = 0x0,
    CtrlA = 0x1,
    CtrlB = 0x2,
    CtrlC = 0x3,
    CtrlD = 0x4,
    CtrlE = 0x5,
    CtrlF = 0x6,
    CtrlG = 0x7,
    Backspace = 0x8,
    Tab = 0x9,
    LineFeed = 0xA,
    CtrlK = 0xB,
    CtrlL = 0xC,
    CarriageReturn = 0xD,
    CtrlN = 0xE,
    CtrlO = 0xF,
    CtrlP = 0x10,
    CtrlQ = 0x11,
    CtrlR = 0x12,
    CtrlS = 0x13,
    CtrlT = 0x14,
    CtrlU = 0x15,
    CtrlV = 0x16,
    CtrlW = 0x17,
    CtrlX = 0x18,
    CtrlY = 0x19,
    CtrlZ = 0x1A,
    Escape = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    Delete = 0x7F,
}

/// Editing command decoded from one key press
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Command {
    InsertChar(u8),
    Backspace,
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorSol,
    CursorEol,
    WordLeft,
    WordRight,
    HistoryUp,
    HistoryDown,
    HistoryTop,
    HistoryBottom,
    ClearToEol,
    ClearLine,
    ToggleLiteral,
    Accept,
    Noop,
    /// Byte entered in literal mode
    RawPassthrough(u8),
}

impl Command {
    pub fn is_history_navigation(&self) -> bool {
        matches!(
            self,
            Command::HistoryUp | Command::HistoryDown | Command::HistoryTop | Command::HistoryBottom
        )
    }
}

/// How a bare ESC byte is treated
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub enum EscapeMode {
    /// ESC starts an ANSI sequence (terminals)
    #[default]
    Ansi,
    /// ESC clears the line (DOS console)
    CancelLine,
}

/// Lead byte of a DOS scan code
pub const SCAN_CODE_PREFIX: u8 = 0x00;

/// Control characters with a binding. Others decode to [`Command::Noop`].
pub const CONTROL_KEYS: [(ControlCharacter, Command); 16] = [
    (ControlCharacter::CtrlA, Command::CursorSol),
    (ControlCharacter::CtrlB, Command::CursorLeft),
    (ControlCharacter::CtrlC, Command::Noop),
    (ControlCharacter::CtrlD, Command::DeleteChar),
    (ControlCharacter::CtrlE, Command::CursorEol),
    (ControlCharacter::CtrlF, Command::CursorRight),
    (ControlCharacter::Backspace, Command::Backspace),
    (ControlCharacter::Tab, Command::InsertChar(b'\t')),
    (ControlCharacter::LineFeed, Command::Accept),
    (ControlCharacter::CtrlK, Command::ClearToEol),
    (ControlCharacter::CarriageReturn, Command::Accept),
    (ControlCharacter::CtrlN, Command::HistoryDown),
    (ControlCharacter::CtrlP, Command::HistoryUp),
    (ControlCharacter::CtrlU, Command::ClearLine),
    (ControlCharacter::CtrlV, Command::ToggleLiteral),
    (ControlCharacter::Delete, Command::DeleteChar),
];

/// DOS scan codes following [`SCAN_CODE_PREFIX`]
pub const SCAN_CODES: [(u8, Command); 12] = [
    (0x3d, Command::HistoryUp),     // F3
    (0x47, Command::CursorSol),     // Home
    (0x48, Command::HistoryUp),     // Up
    (0x4b, Command::CursorLeft),    // Left
    (0x4d, Command::CursorRight),   // Right
    (0x4f, Command::CursorEol),     // End
    (0x50, Command::HistoryDown),   // Down
    (0x53, Command::DeleteChar),    // Del
    (0x73, Command::WordLeft),      // Ctrl-Left
    (0x74, Command::WordRight),     // Ctrl-Right
    (0x8d, Command::HistoryTop),    // Ctrl-Up
    (0x91, Command::HistoryBottom), // Ctrl-Down
];

/// Final bytes of `ESC [ x`
pub const CSI_KEYS: [(u8, Command); 6] = [
    (b'A', Command::HistoryUp),
    (b'B', Command::HistoryDown),
    (b'C', Command::CursorRight),
    (b'D', Command::CursorLeft),
    (b'H', Command::CursorSol),
    (b'F', Command::CursorEol),
];

/// `ESC [ x ~` keys, the trailing byte is not checked
pub const CSI_TILDE_KEYS: [(u8, Command); 3] = [
    (b'3', Command::DeleteChar),
    (b'5', Command::Noop), // Page Up
    (b'6', Command::Noop), // Page Down
];

/// Final bytes of `ESC [ 1 ; 5 x` (Ctrl + arrow)
pub const CSI_CTRL_KEYS: [(u8, Command); 4] = [
    (b'A', Command::HistoryTop),
    (b'B', Command::HistoryBottom),
    (b'C', Command::WordRight),
    (b'D', Command::WordLeft),
];

fn lookup(table: &[(u8, Command)], byte: u8) -> Option<Command> {
    table
        .iter()
        .find(|(key, _)| *key == byte)
        .map(|(_, command)| *command)
}

fn control_command(byte: u8) -> Command {
    ControlCharacter::try_from(byte)
        .ok()
        .and_then(|c| {
            CONTROL_KEYS
                .iter()
                .find(|(key, _)| *key == c)
                .map(|(_, command)| *command)
        })
        .unwrap_or(Command::Noop)
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum State {
    Ground,
    ScanCode,
    Escape,
    CSIStart,
    CSITilde(Command),
    CSIModified,
    CSIModifier,
    CSIModifiedFinal,
}

pub struct KeyDecoder {
    state: State,
    escape_mode: EscapeMode,
}

impl KeyDecoder {
    pub fn new(escape_mode: EscapeMode) -> Self {
        Self {
            state: State::Ground,
            escape_mode,
        }
    }

    pub fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }

    /// True when no sequence is in progress
    pub fn is_idle(&self) -> bool {
        self.state == State::Ground
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.state = State::Ground;
    }

    fn ground(&mut self, byte: u8) -> Option<Command> {
        self.state = State::Ground;

        match byte {
            SCAN_CODE_PREFIX => {
                self.state = State::ScanCode;
                None
            }
            0x1b => match self.escape_mode {
                EscapeMode::Ansi => {
                    self.state = State::Escape;
                    None
                }
                EscapeMode::CancelLine => Some(Command::ClearLine),
            },
            0x01..=0x1f | 0x7f => Some(control_command(byte)),
            _ => Some(Command::InsertChar(byte)),
        }
    }

    // Abandon the current sequence and decode `byte` from scratch
    fn resync(&mut self, byte: u8) -> Option<Command> {
        trace!(byte, state = ?self.state, "unmatched byte in key sequence");

        self.ground(byte)
    }

    /// Advance decoder by one byte. Returns a command once a key is
    /// complete.
    pub fn advance(&mut self, byte: u8) -> Option<Command> {
        let command = match self.state {
            State::Ground => self.ground(byte),
            State::ScanCode => {
                self.state = State::Ground;
                Some(lookup(&SCAN_CODES, byte).unwrap_or(Command::Noop))
            }
            State::Escape => {
                if byte == b'[' {
                    self.state = State::CSIStart;
                    None
                } else {
                    self.resync(byte)
                }
            }
            State::CSIStart => {
                if let Some(command) = lookup(&CSI_KEYS, byte) {
                    self.state = State::Ground;
                    Some(command)
                } else if let Some(command) = lookup(&CSI_TILDE_KEYS, byte) {
                    self.state = State::CSITilde(command);
                    None
                } else if byte == b'1' {
                    self.state = State::CSIModified;
                    None
                } else {
                    self.resync(byte)
                }
            }
            State::CSITilde(command) => {
                self.state = State::Ground;
                Some(command)
            }
            State::CSIModified => {
                if byte == b';' {
                    self.state = State::CSIModifier;
                    None
                } else {
                    self.resync(byte)
                }
            }
            State::CSIModifier => {
                if byte == b'5' {
                    self.state = State::CSIModifiedFinal;
                    None
                } else {
                    self.resync(byte)
                }
            }
            State::CSIModifiedFinal => match lookup(&CSI_CTRL_KEYS, byte) {
                Some(command) => {
                    self.state = State::Ground;
                    Some(command)
                }
                None => self.resync(byte),
            },
        };

        if let Some(command) = command {
            trace!(byte, ?command, "decoded key");
        }

        command
    }
}
