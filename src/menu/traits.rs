//! Core traits for the menu abstraction layer

use super::error::{MenuError, Result};

/// What the menu prints once a line is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionFormat {
    /// The accepted text itself
    #[default]
    Text,
    /// Zero-based index of the accepted candidate
    Index,
}

impl SelectionFormat {
    /// Value of the `-format` option
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "s",
            Self::Index => "i",
        }
    }
}

/// One screen of the menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuRequest {
    /// Prompt shown before the input field
    pub prompt: String,
    /// Status message shown under the input field
    pub message: Option<String>,
    /// Candidate lines, written to the menu's standard input
    pub lines: Vec<String>,
    /// Text the input field starts with
    pub filter: Option<String>,
    /// Extra theme rules
    pub theme: Option<String>,
    pub format: SelectionFormat,
    /// Interpret Pango markup in candidate lines
    pub markup: bool,
}

impl MenuRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set candidate lines, selected by index and rendered as markup
    #[must_use]
    pub fn with_markup_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self.format = SelectionFormat::Index;
        self.markup = true;
        self
    }

    /// Set plain candidate lines, selected by text
    #[must_use]
    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self.format = SelectionFormat::Text;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

/// What the menu program answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuResponse {
    /// Exit status: 0 accepted, 1 cancelled, 10 and up custom keybindings
    pub code: i32,
    /// Standard output, trimmed
    pub output: String,
}

impl MenuResponse {
    #[must_use]
    pub fn new(code: i32, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into().trim().to_string(),
        }
    }

    /// Accepted candidate index, checked against the number of candidates
    ///
    /// rofi prints `-1` when the typed text matches no row, so an empty
    /// output or any number outside `0..candidates` is no selection.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::InvalidIndex` if the output is not a number.
    pub fn index(&self, candidates: usize) -> Result<Option<usize>> {
        if self.output.is_empty() {
            return Ok(None);
        }
        let index = self
            .output
            .parse::<i64>()
            .map_err(|_| MenuError::InvalidIndex(self.output.clone()))?;
        Ok(usize::try_from(index).ok().filter(|&index| index < candidates))
    }
}

/// Trait for menu implementations
///
/// This trait abstracts away the dmenu-style program, so the session logic
/// can be driven by scripted responses in tests.
pub trait Menu {
    /// Show one screen and wait for the user's answer
    ///
    /// # Errors
    ///
    /// Returns an error if the menu program cannot be run.
    fn show(&self, request: &MenuRequest) -> Result<MenuResponse>;
}
