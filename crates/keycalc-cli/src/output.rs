//! Output formatting for displays, steps and the tape

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;
use console::style;
use keycalc::prelude::*;
use serde::Serialize;
use std::io::Write;

/// One key press and the display it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Label of the key pressed
    pub key: String,
    /// Display after the press
    pub display: String,
}

impl Step {
    /// Captures the engine display after `key`
    #[must_use]
    pub fn new(key: Key, engine: &Engine) -> Self {
        Self {
            key: key.label().to_string(),
            display: engine.display().to_string(),
        }
    }
}

/// JSON document for a finished key sequence
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Final engine state
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Per-key displays, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    /// Completed evaluations, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tape: Option<Vec<TapeEntry>>,
}

impl Report {
    /// Report of the session's current state
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            snapshot: session.snapshot(),
            steps: Vec::new(),
            tape: None,
        }
    }

    /// Attach per-key steps
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Attach the session tape
    #[must_use]
    pub fn with_tape(mut self, tape: &Tape) -> Self {
        self.tape = Some(tape.iter().cloned().collect());
        self
    }
}

/// Writes results in the configured format
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
    format: OutputFormat,
    use_color: bool,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter for `config`
    pub fn new(out: W, config: &CliConfig) -> Self {
        Self {
            out,
            format: config.format,
            use_color: config.use_color(),
        }
    }

    /// Output format in use
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write one line of text
    pub fn line(&mut self, text: &str) -> CliResult<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Write a value as one line of JSON
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> CliResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Write a value as indented JSON
    pub fn json_pretty<T: Serialize + ?Sized>(&mut self, value: &T) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Write text with no newline and flush
    pub fn prompt(&mut self, text: &str) -> CliResult<()> {
        if text.is_empty() || self.format.is_json() {
            return Ok(());
        }
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Write the engine display, or its snapshot as JSON
    pub fn display(&mut self, engine: &Engine) -> CliResult<()> {
        match self.format {
            OutputFormat::Plain => {
                let text = self.styled(engine.display(), engine.is_error());
                self.line(&text)
            }
            OutputFormat::Json => self.json(&engine.snapshot()),
        }
    }

    /// Write one step line: key label, then display
    pub fn step(&mut self, step: &Step) -> CliResult<()> {
        match self.format {
            OutputFormat::Plain => {
                let display = self.styled(&step.display, step.display == ERROR_SENTINEL);
                let line = format!("{:>4}  {display}", step.key);
                self.line(&line)
            }
            OutputFormat::Json => self.json(step),
        }
    }

    /// Write the tape, oldest first
    pub fn tape(&mut self, tape: &Tape) -> CliResult<()> {
        match self.format {
            OutputFormat::Plain => {
                for entry in tape.iter() {
                    self.line(&entry.display())?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let entries: Vec<&TapeEntry> = tape.iter().collect();
                self.json(&entries)
            }
        }
    }

    /// Consume the reporter, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&self, display: &str, is_error: bool) -> String {
        if !self.use_color {
            return display.to_string();
        }
        let styled = style(display).force_styling(true);
        if is_error {
            styled.red().bold().to_string()
        } else {
            styled.bold().to_string()
        }
    }
}
