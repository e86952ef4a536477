//! Display surface.
//!
//! The editor hands a [`LineView`] to a [`Display`] after every completed
//! command. [`AnsiDisplay`] draws it on an ANSI terminal by absolute cursor
//! positioning from the prompt origin, so a redraw never depends on where
//! the terminal cursor was left.

use alloc::vec::Vec;

use embedded_io::Error;
use tracing::debug;

use crate::core::LineView;
use crate::error::LineEditError;

/// Width of a tab stop
pub const TAB_WIDTH: usize = 8;

pub trait Display {
    /// Draw prompt and line with the cursor at the logical cursor offset.
    fn render(&mut self, view: &LineView<'_>) -> Result<(), LineEditError>;

    /// Called once after a line is accepted.
    fn finish(&mut self) -> Result<(), LineEditError> {
        Ok(())
    }
}

#[cfg_attr(test, derive(Debug))]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Screen geometry and the position of the prompt
#[cfg_attr(test, derive(Debug))]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    columns: usize,
    origin: Position,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(25, 80, Position::new(23, 0))
    }
}

impl Layout {
    /// # Panics
    ///
    /// Panics on an empty screen.
    pub fn new(rows: usize, columns: usize, origin: Position) -> Self {
        assert!(rows > 0 && columns > 0, "screen must have rows and columns");

        Self {
            rows,
            columns,
            origin: Position::new(
                origin.row.min(rows - 1),
                origin.column.min(columns - 1),
            ),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Position) {
        *self = Self::new(self.rows, self.columns, origin);
    }

    /// Offset after drawing `byte` at `offset`
    pub fn advance(offset: usize, byte: u8) -> usize {
        if byte == b'\t' {
            (offset / TAB_WIDTH + 1) * TAB_WIDTH
        } else {
            offset + 1
        }
    }

    /// Offset from the start of the origin row after drawing `parts`
    pub fn measure<'a>(&self, parts: impl IntoIterator<Item = &'a [u8]>) -> usize {
        parts
            .into_iter()
            .flatten()
            .fold(self.origin.column, |offset, &byte| Self::advance(offset, byte))
    }

    pub fn position(&self, offset: usize) -> Position {
        Position::new(
            self.origin.row + offset / self.columns,
            offset % self.columns,
        )
    }

    /// Rows to scroll up so that `position` is on screen
    pub fn scrolling_needed(&self, position: Position) -> usize {
        (position.row + 1).saturating_sub(self.rows)
    }

    /// Account for the screen having scrolled up by `rows`
    pub fn scroll(&mut self, rows: usize) {
        self.origin.row = self.origin.row.saturating_sub(rows);
    }
}

#[cfg_attr(test, derive(Debug))]
#[derive(Copy, Clone)]
pub struct UintToBytes<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> UintToBytes<N> {
    pub fn from_uint(mut n: usize) -> Option<Self> {
        if n < 10_usize.pow(N as u32) {
            let mut bytes = [0; N];

            for i in (0..N).rev() {
                bytes[i] = b'0' + (n % 10) as u8;
                n /= 10;

                if n == 0 {
                    break;
                }
            }

            Some(Self { bytes })
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        let start = self.bytes.iter().take_while(|&&b| b == 0).count();
        &self.bytes[start..]
    }
}

/// Display for terminals understanding ANSI escape sequences
pub struct AnsiDisplay<W: embedded_io::Write> {
    output: W,
    layout: Layout,
    frame: Vec<u8>,
    end: Position,
}

impl<W: embedded_io::Write> AnsiDisplay<W> {
    pub fn new(output: W, layout: Layout) -> Self {
        Self {
            output,
            end: layout.origin(),
            layout,
            frame: Vec::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Consume display and return the writer
    pub fn take(self) -> W {
        self.output
    }

    fn push_uint(&mut self, n: usize) {
        // Screens are never 10000 rows or columns
        if let Some(n) = UintToBytes::<4>::from_uint(n) {
            self.frame.extend_from_slice(n.as_bytes());
        }
    }

    fn push_scroll(&mut self, rows: usize) {
        self.frame.extend_from_slice(b"\x1b[");
        self.push_uint(rows);
        self.frame.push(b'S');
    }

    fn push_move(&mut self, position: Position) {
        self.frame.extend_from_slice(b"\x1b[");
        self.push_uint(position.row + 1);
        self.frame.push(b';');
        self.push_uint(position.column + 1);
        self.frame.push(b'H');
    }

    fn push_bytes(&mut self, mut offset: usize, bytes: &[u8]) -> usize {
        let start = self.layout.origin().column;

        for &byte in bytes {
            let next = Layout::advance(offset, byte);

            for cell in offset..next {
                if cell > start && cell % self.layout.columns() == 0 {
                    let position = self.layout.position(cell);
                    self.push_move(position);
                }

                self.frame.push(match byte {
                    b'\t' => b' ',
                    // C0, DEL and C1 would be read as terminal controls
                    0x00..=0x1f | 0x7f..=0x9f => b'?',
                    _ => byte,
                });
            }

            offset = next;
        }

        offset
    }

    fn write_frame(&mut self) -> Result<(), LineEditError> {
        self.output
            .write_all(&self.frame)
            .map_err(|e| LineEditError::WriteError(e.kind()))?;

        self.output
            .flush()
            .map_err(|e| LineEditError::WriteError(e.kind()))
    }
}

impl<W: embedded_io::Write> Display for AnsiDisplay<W> {
    fn render(&mut self, view: &LineView<'_>) -> Result<(), LineEditError> {
        self.frame.clear();

        let prompt = view.prompt.as_bytes();
        let end = self.layout.position(self.layout.measure([prompt, view.text]));

        let rows = self.layout.scrolling_needed(end);

        if rows > 0 {
            debug!(rows, "scrolling viewport");

            self.push_scroll(rows);
            self.layout.scroll(rows);
        }

        let origin = self.layout.origin();
        self.push_move(origin);

        let offset = self.push_bytes(origin.column, prompt);
        let offset = self.push_bytes(offset, view.text);

        self.frame.extend_from_slice(b"\x1b[J");

        self.end = self.layout.position(offset);

        let cursor_offset = self
            .layout
            .measure([prompt, &view.text[..view.cursor.min(view.text.len())]]);
        let cursor = self.layout.position(cursor_offset);

        self.push_move(cursor);

        if view.literal {
            self.frame.push(b'^');
            self.push_move(cursor);
        }

        self.write_frame()
    }

    fn finish(&mut self) -> Result<(), LineEditError> {
        self.frame.clear();
        self.push_move(self.end);
        self.frame.extend_from_slice(b"\r\n");

        // A newline on the last row scrolls the screen
        let row = (self.end.row + 1).min(self.layout.rows() - 1);
        self.layout.set_origin(Position::new(row, 0));
        self.end = self.layout.origin();

        self.write_frame()
    }
}
