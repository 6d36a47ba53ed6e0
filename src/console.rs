use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

use crate::error::VendError;
use crate::input;

/// Printed when a number-typed activity gets something that isn't a number.
pub const NOT_A_NUMBER: &str = "The state machine indicated this input must be a valid number.";

/// Line-oriented terminal session.
///
/// Generic over its reader and writer so tests can script the human side with
/// an in-memory buffer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl std::fmt::Display) -> Result<(), VendError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Show `message` and read one line, without its line ending.
    pub fn prompt(&mut self, message: &str) -> Result<String, VendError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(VendError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Keep prompting until `parse` accepts the answer, printing `complaint`
    /// after every rejected one.
    pub fn prompt_until<T, F>(&mut self, message: &str, complaint: &str, parse: F) -> Result<T, VendError>
    where
        F: Fn(&str) -> Option<T>,
    {
        loop {
            let raw = self.prompt(message)?;
            if let Some(value) = parse(&raw) {
                return Ok(value);
            }
            self.say(complaint)?;
        }
    }

    pub fn prompt_number(&mut self, message: &str) -> Result<f64, VendError> {
        self.prompt_until(message, NOT_A_NUMBER, input::parse_number)
    }
}
