//! Console prompts: the blocking "press Enter" confirmation and the
//! re-prompting integer question for the column split

use crate::error::{SplitError, UnpivotError, UnpivotResult};
use crate::reshape::ColumnSplit;
use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented conversation with the user
pub trait Console {
    /// Print one status line
    fn say(&mut self, line: &str);

    /// Show `prompt` and block until a line is entered.
    ///
    /// Returns `None` once input is closed.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Console over a reader/writer pair, normally stdin/stdout
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn say(&mut self, line: &str) {
        // A closed stdout leaves nobody to report to
        let _ = writeln!(self.output, "{}", line);
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Console fed from a fixed list of replies; keeps a transcript
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything said and asked, one entry per line
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.replies.pop_front())
    }
}

/// Block until the user confirms; any line, including an empty one, counts
pub fn wait_for_confirmation<C: Console>(console: &mut C, prompt: &str) -> UnpivotResult<String> {
    console.ask(prompt)?.ok_or(UnpivotError::InputClosed)
}

/// Ask for the number of identifier columns until a valid answer arrives.
///
/// Callers must rule out `column_count < 2` first; there is no valid answer
/// then and the loop only ends when input closes.
pub fn ask_column_split<C: Console>(
    console: &mut C,
    column_count: usize,
) -> UnpivotResult<ColumnSplit> {
    let prompt = format!(
        "How many columns from the left are identifiers? (1-{}): ",
        column_count.saturating_sub(1)
    );
    loop {
        let answer = console.ask(&prompt)?.ok_or(UnpivotError::InputClosed)?;
        match ColumnSplit::parse(&answer, column_count) {
            Ok(split) => return Ok(split),
            Err(SplitError::NotANumber(_)) => {
                console.say(&"Please enter a number.".yellow().to_string());
            }
            Err(e) => {
                console.say(&format!("{}", e).yellow().to_string());
            }
        }
    }
}
