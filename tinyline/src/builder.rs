//! Builder for editors

use alloc::string::String;

use crate::{core::Editor, error::LineEditError, input::EscapeMode};

/// Builder for [`Editor`].
///
/// # Example
/// ```
/// use tinyline::builder::EditorBuilder;
/// use tinyline::input::EscapeMode;
///
/// let editor = EditorBuilder::new()
///     .with_max_line_length(80)
///     .with_history_depth(10)
///     .with_prompt("$ ")
///     .with_escape_mode(EscapeMode::CancelLine)
///     .build()
///     .unwrap();
///
/// assert_eq!(editor.prompt(), "$ ");
/// ```
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct EditorBuilder {
    max_line_length: usize,
    history_depth: usize,
    prompt: String,
    escape_mode: EscapeMode,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuilder {
    /// Create builder with 255 byte lines, four remembered lines and
    /// prompt `PROMPT>`.
    pub fn new() -> Self {
        Self {
            max_line_length: 255,
            history_depth: 5,
            prompt: "PROMPT>".into(),
            escape_mode: EscapeMode::default(),
        }
    }

    /// Line capacity, one more than the longest line that can be entered
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Number of history slots including the line being edited
    pub fn with_history_depth(mut self, history_depth: usize) -> Self {
        self.history_depth = history_depth;
        self
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    /// Build [`Editor`]. Fails if the line length is below 2 or the history
    /// depth below 1.
    pub fn build(self) -> Result<Editor, LineEditError> {
        if self.max_line_length < 2 {
            return Err(LineEditError::InvalidConfig(
                "max line length must be at least 2",
            ));
        }

        if self.history_depth < 1 {
            return Err(LineEditError::InvalidConfig(
                "history depth must be at least 1",
            ));
        }

        Ok(Editor::new(
            self.max_line_length,
            self.history_depth,
            &self.prompt,
            self.escape_mode,
        ))
    }
}
