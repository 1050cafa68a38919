//! Colored terminal output for the CLI.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes status lines to stdout and errors to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager. `quiet` suppresses everything but errors.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            color: ColorChoice::Auto,
        }
    }

    fn colored(&self, mut stream: StandardStream, color: Color, message: &str) -> io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writeln!(stream, "{}", message)?;
        stream.reset()
    }

    /// Print success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.colored(StandardStream::stdout(self.color), Color::Green, message)
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.colored(StandardStream::stderr(self.color), Color::Red, message)
    }
}
