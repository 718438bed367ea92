//! Line-oriented terminal input and output
//!
//! Numeric prompts repeat until the line parses. End of input surfaces as
//! `LedgerError::InputClosed` so the menus can unwind and exit cleanly.

use crate::types::LedgerError;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Prompting console over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line
    pub fn say(&mut self, text: impl Display) -> Result<(), LedgerError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `prompt` and read one line without its terminator
    pub fn prompt_line(&mut self, prompt: &str) -> Result<String, LedgerError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LedgerError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Read a value, repeating the prompt until the input parses
    pub fn prompt_parsed<T: FromStr>(&mut self, prompt: &str, invalid: &str) -> Result<T, LedgerError> {
        loop {
            let line = self.prompt_line(prompt)?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(invalid)?,
            }
        }
    }

    /// Read an integer
    pub fn prompt_int(&mut self, prompt: &str) -> Result<i64, LedgerError> {
        self.prompt_parsed(prompt, "Invalid input. Please enter a valid integer.")
    }

    /// Read a decimal amount
    pub fn prompt_decimal(&mut self, prompt: &str) -> Result<Decimal, LedgerError> {
        self.prompt_parsed(prompt, "Invalid input. Please enter a valid number.")
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }
}
