//! # Prompting
//!
//! Line-based input with normalization and an explicit cancel outcome.
//!
//! Every answer is trimmed and lowercased, then classified:
//!
//! ```text
//! raw line ─► interpret() ─► Reply::Value(text)
//!                          ├► Reply::Cancelled          ("cancel" where allowed)
//!                          └► Reply::Invalid(problem)   (re-asked by Console)
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};

/// Word that aborts a cancellable prompt.
pub const CANCEL_SENTINEL: &str = "cancel";

/// What kind of answer a prompt accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any non-empty text.
    Text,
    /// ASCII digits only.
    Digits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    Empty,
    NotDigits,
    /// "cancel" typed where cancelling is not allowed.
    CannotCancel,
}

impl fmt::Display for InputProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputProblem::Empty => write!(f, "Input cannot be empty."),
            InputProblem::NotDigits => write!(f, "Only digits are allowed. Try again."),
            InputProblem::CannotCancel => write!(f, "Can't cancel here."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Value(T),
    Cancelled,
    Invalid(InputProblem),
}

/// Normalizes and classifies one raw input line.
pub fn interpret(raw: &str, expect: Expect, cancellable: bool) -> Reply<String> {
    let text = raw.trim().to_lowercase();

    if text == CANCEL_SENTINEL {
        return if cancellable {
            Reply::Cancelled
        } else {
            Reply::Invalid(InputProblem::CannotCancel)
        };
    }
    if text.is_empty() {
        return Reply::Invalid(InputProblem::Empty);
    }
    if expect == Expect::Digits && !text.bytes().all(|b| b.is_ascii_digit()) {
        return Reply::Invalid(InputProblem::NotDigits);
    }
    Reply::Value(text)
}

/// The terminal: lines in, lines out.
///
/// End of input surfaces as `io::ErrorKind::UnexpectedEof` so the session can
/// shut down the same way it does on Quit.
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Shows `prompt` and returns the raw next line.
    pub fn read_raw(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line)
    }

    /// Asks until the answer is valid. Returns `Cancelled` only when
    /// `cancellable` is set.
    pub fn ask(
        &mut self,
        prompt: &str,
        expect: Expect,
        cancellable: bool,
    ) -> io::Result<Reply<String>> {
        loop {
            let line = self.read_raw(prompt)?;
            match interpret(&line, expect, cancellable) {
                Reply::Invalid(InputProblem::Empty) if cancellable => {
                    self.say("Input cannot be empty. (or 'cancel')")?;
                }
                Reply::Invalid(problem) => self.say(problem)?,
                reply => return Ok(reply),
            }
        }
    }

    /// A y/n question; only "y" (any case) counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let line = self.read_raw(prompt)?;
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }
}
