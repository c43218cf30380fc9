use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompts on a writer and reads one line from a reader.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, read from stdin.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} (y/N) ")?;
        self.output.flush()?;
        let mut line = String::new();
        // EOF reads as an empty answer, which declines.
        self.input
            .read_line(&mut line)
            .context("failed to read confirmation")?;
        Ok(is_affirmative(&line))
    }
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        log::info!("assuming yes: {question}");
        Ok(true)
    }
}

/// Only `y` or `yes` (any case, surrounding whitespace ignored) accepts.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (bool, String) {
        let mut out = Vec::new();
        let answer = LinePrompt::new(input.as_bytes(), &mut out)
            .confirm("Overwrite?")
            .unwrap();
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn affirmative_answers() {
        for a in ["y", "Y", "yes", "YES", " y \n", "Yes\r\n"] {
            assert!(is_affirmative(a), "{a:?} should accept");
        }
    }

    #[test]
    fn anything_else_declines() {
        for a in ["", "\n", "n", "no", "yeah", "ok", "1", "y y"] {
            assert!(!is_affirmative(a), "{a:?} should decline");
        }
    }

    #[test]
    fn prompt_writes_question() {
        let (answer, printed) = ask("y\n");
        assert!(answer);
        assert_eq!(printed, "Overwrite? (y/N) ");
    }

    #[test]
    fn eof_declines() {
        let (answer, _) = ask("");
        assert!(!answer);
    }

    #[test]
    fn only_first_line_is_read() {
        let (answer, _) = ask("n\ny\n");
        assert!(!answer);
    }

    #[test]
    fn assume_yes_always_accepts() {
        assert!(AssumeYes.confirm("anything").unwrap());
    }
}
