use core::convert::Infallible;
use std::string::String;
use std::vec::Vec;

use crossbeam::channel::Receiver;

use crate::core::LineView;
use crate::error::LineEditError;
use crate::input::ControlCharacter;
use crate::render::{Display, Position};
use crate::sync_io::RawInput;

pub mod ansi {
    pub const UP: &str = "\x1b[A";
    pub const DOWN: &str = "\x1b[B";
    pub const RIGHT: &str = "\x1b[C";
    pub const LEFT: &str = "\x1b[D";
    pub const HOME: &str = "\x1b[H";
    pub const END: &str = "\x1b[F";
    pub const DELETE: &str = "\x1b[3~";
    pub const PAGE_UP: &str = "\x1b[5~";
    pub const PAGE_DOWN: &str = "\x1b[6~";
    pub const CTRL_UP: &str = "\x1b[1;5A";
    pub const CTRL_DOWN: &str = "\x1b[1;5B";
    pub const CTRL_RIGHT: &str = "\x1b[1;5C";
    pub const CTRL_LEFT: &str = "\x1b[1;5D";
}

pub mod dos {
    pub const F3: &str = "\x00\x3d";
    pub const HOME: &str = "\x00\x47";
    pub const UP: &str = "\x00\x48";
    pub const LEFT: &str = "\x00\x4b";
    pub const RIGHT: &str = "\x00\x4d";
    pub const END: &str = "\x00\x4f";
    pub const DOWN: &str = "\x00\x50";
    pub const DELETE: &str = "\x00\x53";
    pub const CTRL_LEFT: &str = "\x00\x73";
    pub const CTRL_RIGHT: &str = "\x00\x74";
    // Scan codes above 0x7f are not valid UTF-8
    pub const CTRL_UP: &[u8] = b"\x00\x8d";
    pub const CTRL_DOWN: &[u8] = b"\x00\x91";
}

pub trait AsByteVec {
    fn as_byte_vec(self) -> Vec<u8>;
}

impl AsByteVec for &str {
    fn as_byte_vec(self) -> Vec<u8> {
        self.bytes().collect()
    }
}

impl AsByteVec for &[u8] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl AsByteVec for ControlCharacter {
    fn as_byte_vec(self) -> Vec<u8> {
        [self.into()].into_iter().collect()
    }
}

impl AsByteVec for Vec<ControlCharacter> {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().map(|c| c.into()).collect()
    }
}

impl<const N: usize> AsByteVec for [ControlCharacter; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().map(|c| c.into()).collect()
    }
}

impl AsByteVec for Vec<&str> {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().flat_map(|s| s.bytes()).collect()
    }
}

impl<const N: usize> AsByteVec for [&str; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().flat_map(|s| s.bytes()).collect()
    }
}

/// Raw input served from a byte vector, aborts when drained
pub struct SliceInput {
    bytes: Vec<u8>,
    pos: usize,
}

impl SliceInput {
    pub fn new(input: impl AsByteVec) -> Self {
        Self {
            bytes: input.as_byte_vec(),
            pos: 0,
        }
    }
}

impl RawInput for SliceInput {
    fn next_byte(&mut self) -> Result<u8, LineEditError> {
        let byte = self.bytes.get(self.pos).copied().ok_or(LineEditError::Aborted)?;
        self.pos += 1;

        Ok(byte)
    }
}

/// Raw input fed from another thread, aborts when the sender hangs up
pub struct ChannelInput {
    rx: Receiver<u8>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<u8>) -> Self {
        Self { rx }
    }
}

impl RawInput for ChannelInput {
    fn next_byte(&mut self) -> Result<u8, LineEditError> {
        self.rx.recv().map_err(|_| LineEditError::Aborted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub prompt: String,
    pub text: Vec<u8>,
    pub cursor: usize,
    pub literal: bool,
}

/// Display recording every rendered view
#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Frame>,
    pub finished: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &Frame {
        self.frames.last().unwrap()
    }
}

impl Display for MockDisplay {
    fn render(&mut self, view: &LineView<'_>) -> Result<(), LineEditError> {
        self.frames.push(Frame {
            prompt: view.prompt.into(),
            text: view.text.to_vec(),
            cursor: view.cursor,
            literal: view.literal,
        });

        Ok(())
    }

    fn finish(&mut self) -> Result<(), LineEditError> {
        self.finished += 1;
        Ok(())
    }
}

/// Writer collecting everything written and flushed
#[derive(Default)]
pub struct MockWriter {
    buffer: Vec<u8>,
    flushed: Vec<u8>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take flushed bytes
    pub fn take_bytes(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.flushed)
    }
}

impl embedded_io::ErrorType for MockWriter {
    type Error = Infallible;
}

impl embedded_io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushed.append(&mut self.buffer);
        Ok(())
    }
}

enum ParserState {
    Ground,
    Escape,
    Csi,
}

/// Screen model understanding the sequences the ANSI display emits
pub struct MockTerminal {
    screen: Vec<Vec<char>>,
    pub cursor: Position,
    rows: usize,
    columns: usize,
    state: ParserState,
    params: Vec<usize>,
}

impl MockTerminal {
    pub fn new(rows: usize, columns: usize, origin: Position) -> Self {
        Self {
            screen: vec![vec!['\0'; columns]; rows],
            cursor: origin,
            rows,
            columns,
            state: ParserState::Ground,
            params: Vec::new(),
        }
    }

    pub fn screen_as_string(&self) -> String {
        self.screen
            .iter()
            .map(|v| v.iter().take_while(|&&c| c != '\0').collect::<String>())
            .filter(|s| !s.is_empty())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn print_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.advance(byte);
        }
    }

    fn scroll_up(&mut self, lines: usize) {
        for _ in 0..lines {
            self.screen.remove(0);
            self.screen.push(vec!['\0'; self.columns]);
        }
    }

    fn line_feed(&mut self) {
        if self.cursor.row + 1 == self.rows {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
    }

    fn print(&mut self, c: char) {
        // Wrap is deferred until the next printed character
        if self.cursor.column == self.columns {
            self.cursor.column = 0;
            self.line_feed();
        }

        self.screen[self.cursor.row][self.cursor.column] = c;
        self.cursor.column += 1;
    }

    fn param(&self, index: usize, default: usize) -> usize {
        match self.params.get(index) {
            Some(&0) | None => default,
            Some(&n) => n,
        }
    }

    fn csi(&mut self, final_byte: u8) {
        match final_byte {
            b'H' => {
                self.cursor = Position::new(
                    (self.param(0, 1) - 1).min(self.rows - 1),
                    (self.param(1, 1) - 1).min(self.columns - 1),
                );
            }
            b'J' => {
                let Position { row, column } = self.cursor;

                for (i, line) in self.screen.iter_mut().enumerate().skip(row) {
                    let start = if i == row { column.min(self.columns) } else { 0 };

                    for c in &mut line[start..] {
                        *c = '\0';
                    }
                }
            }
            b'S' => self.scroll_up(self.param(0, 1)),
            _ => panic!("unexpected CSI final byte {:?}", final_byte as char),
        }
    }

    pub fn advance(&mut self, byte: u8) {
        match self.state {
            ParserState::Ground => match byte {
                0x1b => self.state = ParserState::Escape,
                b'\r' => self.cursor.column = 0,
                b'\n' => self.line_feed(),
                0x20..=0x7e => self.print(byte as char),
                _ => panic!("unexpected byte {:#x}", byte),
            },
            ParserState::Escape => {
                assert_eq!(byte, b'[');
                self.params.clear();
                self.params.push(0);
                self.state = ParserState::Csi;
            }
            ParserState::Csi => match byte {
                b'0'..=b'9' => {
                    if let Some(n) = self.params.last_mut() {
                        *n = *n * 10 + (byte - b'0') as usize;
                    }
                }
                b';' => self.params.push(0),
                _ => {
                    self.state = ParserState::Ground;
                    self.csi(byte);
                }
            },
        }
    }
}
