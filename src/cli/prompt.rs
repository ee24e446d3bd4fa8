//! Line-oriented prompts over any reader/writer pair.

use std::io::{self, BufRead, Write};

/// Reads answers from `input`, writing questions to `output`.
///
/// End of input is reported as `io::ErrorKind::UnexpectedEof` so the menu
/// loop can treat it like "Exit".
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of output.
    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Ask once and return the trimmed answer, possibly empty.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until a non-empty answer is given.
    pub fn ask_required(&mut self, question: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("Value cannot be empty. Please try again.")?;
        }
    }

    /// Ask once; an empty answer becomes `None`.
    pub fn ask_optional(&mut self, question: &str) -> io::Result<Option<String>> {
        let answer = self.ask(question)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Yes/no question defaulting to no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} [y/N]: ", question))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
