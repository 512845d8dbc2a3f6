//! Typewriter output and bounded input over any reader/writer pair.
//!
//! The shell talks to stdin/stdout in production and to in-memory buffers in
//! tests; nothing here knows about game rules.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use otherside_core::RangeError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The input stream reached end of file.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// A text console that prints one character at a time.
pub struct Console<R, W> {
    input: R,
    output: W,
    type_delay: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, type_delay: Duration) -> Self {
        Self {
            input,
            output,
            type_delay,
        }
    }

    /// Prints `text` followed by a newline at typewriter speed.
    pub fn say(&mut self, text: impl AsRef<str>) -> ConsoleResult<()> {
        let delay = self.type_delay;
        self.type_out(text.as_ref(), delay)?;
        self.type_out("\n", Duration::ZERO)
    }

    /// Prints `text` as-is at the given per-character delay.
    pub fn type_out(&mut self, text: &str, delay: Duration) -> ConsoleResult<()> {
        if delay.is_zero() {
            self.output.write_all(text.as_bytes())?;
            self.output.flush()?;
            return Ok(());
        }
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.output.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            self.output.flush()?;
            thread::sleep(delay);
        }
        Ok(())
    }

    /// Reads one line without its line terminator.
    pub fn read_line(&mut self, prompt: &str) -> ConsoleResult<String> {
        let delay = self.type_delay;
        self.type_out(prompt, delay)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Reads a line and keeps at most `max_chars` characters of it.
    pub fn read_bounded(&mut self, prompt: &str, max_chars: usize) -> ConsoleResult<String> {
        let line = self.read_line(prompt)?;
        Ok(line.chars().take(max_chars).collect())
    }

    /// Asks until the user enters an integer inside `range`.
    pub fn read_int(&mut self, prompt: &str, range: RangeInclusive<i64>) -> ConsoleResult<i64> {
        loop {
            let line = self.read_line(prompt)?;
            let value = match line.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    self.say("Please enter a number.")?;
                    continue;
                }
            };
            match RangeError::check(value, range.clone()) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format!("Invalid choice: {err}."))?,
            }
        }
    }

    /// Offers numbered `options` starting at `first` and returns the chosen one.
    pub fn choose<T: Copy>(
        &mut self,
        title: &str,
        first: i64,
        options: &[(String, T)],
    ) -> ConsoleResult<T> {
        self.say(title)?;
        for (offset, (label, _)) in options.iter().enumerate() {
            self.say(format!("  {}) {label}", first + offset as i64))?;
        }
        let last = first + options.len() as i64 - 1;
        let picked = self.read_int("> ", first..=last)?;
        let index = usize::try_from(picked - first).unwrap_or_default();
        options
            .get(index)
            .map(|(_, value)| *value)
            .ok_or(ConsoleError::Closed)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
