//! Terminal output for mdwiki commands.
//!
//! Rendered pages, site indexes and search JSON are written to stdout
//! unstyled, so they can be redirected into a file. Progress, summaries,
//! warnings and errors go to stderr with color.

use console::{Style, Term};

/// Split writer for command results and status messages.
pub(crate) struct Output {
    status: Term,
    content: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            content: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Write a command result (HTML or JSON) to stdout.
    ///
    /// Write errors are returned; status messages are best effort.
    pub(crate) fn content(&self, text: &str) -> std::io::Result<()> {
        self.content.write_line(text)
    }

    /// Plain status line, e.g. the source and output directories of an export.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.status.write_line(msg);
    }

    /// Completion message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.status.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Recoverable problem such as a missing site index (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.status.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Failure that ends the command (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.status.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Summary line shown above a result, e.g. the search summary (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .status
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }
}
