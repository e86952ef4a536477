//! Tinyline is a small `#[no_std]` line editor with DOS style editing
//! keys and a fixed size command history. The editing core is IO-free:
//! it consumes one byte at a time and exposes the line, cursor and
//! literal-mode flag for whatever draws the screen.
//!
//! Features:
//! - IO-free editing core
//! - Single-byte characters, lines of bounded length
//! - DOS scan codes and ANSI escape sequences decoded side by side
//! - Line history in a ring of fixed slots
//! - Clear line and clear to end of line that undo when pressed twice
//! - Literal next character (`^V`)
//!
//! Keys:
//!
//! | Key                       | Action                              |
//! |---------------------------|-------------------------------------|
//! | `^A`, Home                | Start of line                       |
//! | `^E`, End                 | End of line                         |
//! | `^B`, Left                | Back one character                  |
//! | `^F`, Right               | Forward one character               |
//! | Ctrl-Left, Ctrl-Right     | Previous, next word                 |
//! | `^H`                      | Delete previous character           |
//! | `^D`, Del, `0x7f`         | Delete character under cursor       |
//! | `^K`                      | Clear to end of line, again to undo |
//! | `^U`                      | Clear line, again to undo           |
//! | `^P`, Up, F3              | Previous history entry              |
//! | `^N`, Down                | Next history entry                  |
//! | Ctrl-Up, Ctrl-Down        | Oldest entry, back to edited line   |
//! | `^V`                      | Insert next byte as is              |
//! | Enter                     | Accept line                         |
//!
//! The core is [`crate::core::Editor`], driven byte by byte with
//! [`crate::core::Editor::feed_byte`]. [`crate::core::Editor::readline`]
//! runs the blocking loop over a [`sync_io::RawInput`] and a
//! [`render::Display`]; `demos/std` shows it on a raw mode terminal.
//! Editors can be built using [`builder::EditorBuilder`].
//!
//! # Example
//! ```
//! use tinyline::builder::EditorBuilder;
//! use tinyline::core::SessionState;
//!
//! let mut editor = EditorBuilder::new().build().unwrap();
//!
//! for &byte in b"hello\x1b[D\x1b[DX\r" {
//!     editor.feed_byte(byte);
//! }
//!
//! assert_eq!(editor.state(), SessionState::Accepted);
//! assert_eq!(editor.line().as_bytes(), b"helXlo");
//! assert_eq!(editor.dump_history().next(), Some(b"helXlo".as_slice()));
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(test, doc, feature = "std"))]
#[macro_use]
extern crate std;

pub mod builder;
pub mod core;
pub mod error;
pub mod history;
pub mod input;
pub mod line_buffer;
pub mod render;
pub mod sync_editor;
pub mod sync_io;
pub mod undo;

#[cfg(test)]
pub(crate) mod testlib;
