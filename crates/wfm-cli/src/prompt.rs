//! Line-oriented prompts over any reader/writer pair.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use owo_colors::Style;

use crate::theme::Theme;

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line without its line ending.
    ///
    /// End of input is an error: every caller is waiting on an answer.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended while waiting for an answer",
            ));
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prompts with `message` until `validate` accepts the answer.
    ///
    /// Rejected answers print the validator's error and "try again".
    pub fn ask_valid<T, E, F>(&mut self, message: &str, validate: F) -> io::Result<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            write!(self.output, "{message}")?;
            self.output.flush()?;
            let answer = self.read_line()?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    writeln!(self.output, "{}", self.theme.paint(err, Style::new().red()))?;
                    writeln!(self.output, "try again")?;
                }
            }
        }
    }

    /// Reads lines until an empty one and returns them in order.
    pub fn read_until_blank(&mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }
}
