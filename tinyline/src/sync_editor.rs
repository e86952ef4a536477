//! Line editor for synchronous IO.
//!
//! [`Editor::readline`] pulls bytes from a [`RawInput`] and redraws through
//! a [`Display`] until a line is accepted. There are ready made inputs in
//! [`crate::sync_io`] and an ANSI display in [`crate::render`].
//!
//! Use the [`crate::builder::EditorBuilder`] to build an editor.

use tracing::trace;

use crate::core::{Editor, SessionState};
use crate::error::LineEditError;
use crate::render::Display;
use crate::sync_io::RawInput;

impl Editor {
    /// Read one line.
    ///
    /// Starts a new session, draws the empty prompt and then redraws after
    /// every completed command. Returns the accepted line, which is also in
    /// history unless it was blank or a repeat. Fails only if the input or
    /// display does.
    pub fn readline<'a, I: RawInput, D: Display>(
        &'a mut self,
        input: &mut I,
        display: &mut D,
    ) -> Result<&'a [u8], LineEditError> {
        self.start_session();
        display.render(&self.view())?;

        loop {
            let step = self.feed_byte(input.next_byte()?);

            if step.command.is_some() {
                display.render(&self.view())?;
            }

            if step.state == SessionState::Accepted {
                display.finish()?;
                break;
            }
        }

        trace!(len = self.line().len(), "readline done");

        Ok(self.line().as_bytes())
    }
}
