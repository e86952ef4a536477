use std::io::{self, Write};

use termion::cursor::DetectCursorPos;
use termion::raw::IntoRawMode;
use tinyline::builder::EditorBuilder;
use tinyline::render::{AnsiDisplay, Layout, Position};
use tinyline::sync_io::{std_sync::StdoutWrapper, IO};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout().into_raw_mode()?;

    let (columns, rows) = termion::terminal_size()?;
    let (_, row) = stdout.cursor_pos()?;

    let layout = Layout::new(
        rows.into(),
        columns.into(),
        Position::new(usize::from(row).saturating_sub(1), 0),
    );

    let mut editor = EditorBuilder::new()
        .with_prompt("> ")
        .build()
        .map_err(io::Error::other)?;

    editor.load_history(["help", "history"].map(str::as_bytes));

    let mut input = IO::default();
    let mut display = AnsiDisplay::new(StdoutWrapper::new(), layout);

    while let Ok(line) = editor.readline(&mut input, &mut display) {
        let line = String::from_utf8_lossy(line).into_owned();
        let mut printed = 0;

        match line.trim() {
            "exit" => break,
            "help" => {
                write!(stdout, "Type 'history' to list past lines, 'exit' to quit\r\n")?;
                printed += 1;
            }
            "history" => {
                for (i, entry) in editor.dump_history().enumerate() {
                    write!(stdout, "{:3} {}\r\n", i + 1, String::from_utf8_lossy(entry))?;
                    printed += 1;
                }
            }
            _ => {
                write!(stdout, "Read: {:?}\r\n", line)?;
                printed += 1;
            }
        }

        stdout.flush()?;

        let origin = display.layout().origin();
        display
            .layout_mut()
            .set_origin(Position::new(origin.row + printed, 0));
    }

    Ok(())
}
