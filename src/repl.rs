use std::{fmt, io::Write, ops::ControlFlow, str::FromStr};

use log::debug;
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;

use crate::{
    diagnostics::{PolycalcError, Result},
    normalize::{ParseOptions, parse_polynomial_with},
    polynomial::Polynomial,
};

pub const WELCOME: &str = "Welcome to polycalc!
Please enter 'quit', 'exit', Ctrl+C, or Ctrl+D at any time to exit.
";
pub const FAREWELL: &str = "Thanks for trying me out!";

const FIRST_PROMPT: &str = "Polynomial #1: ";
const SECOND_PROMPT: &str = "Polynomial #2: ";
const OPERATION_PROMPT: &str = "Operation (+, -, *, or 'D/d' for derivative): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Derivative,
}

impl Operation {
    pub fn is_unary(self) -> bool {
        self == Operation::Derivative
    }

    /// Applies the operation; `None` when a binary operation has no right operand.
    pub fn apply(self, left: &Polynomial, right: Option<&Polynomial>) -> Option<Polynomial> {
        let result = match (self, right) {
            (Operation::Derivative, _) => left.derivative(),
            (Operation::Add, Some(right)) => left.add(right),
            (Operation::Subtract, Some(right)) => left.subtract(right),
            (Operation::Multiply, Some(right)) => left.multiply(right),
            (_, None) => return None,
        };
        debug!("{left:?} {self} {right:?} = {result:?}");
        Some(result)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Derivative => "D",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operation::Add),
            "-" => Ok(Operation::Subtract),
            "*" => Ok(Operation::Multiply),
            "D" | "d" => Ok(Operation::Derivative),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// One read from a [`LineSource`], with the quit words already recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Quit,
    Eof,
}

impl Input {
    pub fn from_line(line: String) -> Self {
        let check = line.trim().to_lowercase();
        if check == "quit" || check == "exit" {
            Input::Quit
        } else {
            Input::Line(line)
        }
    }
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// Interactive terminal input with history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|err| PolycalcError::Readline(err.to_string()))?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Input::from_line(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(PolycalcError::Readline(err.to_string())),
        }
    }
}

/// Replays pre-recorded lines; running out of lines reads as `Eof`.
pub struct ScriptSource<I> {
    lines: I,
}

impl<I: Iterator<Item = String>> ScriptSource<I> {
    pub fn new(lines: impl IntoIterator<Item = String, IntoIter = I>) -> Self {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl ScriptSource<std::vec::IntoIter<String>> {
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect::<Vec<_>>())
    }
}

impl<I: Iterator<Item = String>> LineSource for ScriptSource<I> {
    fn read_line(&mut self, _prompt: &str) -> Result<Input> {
        Ok(self.lines.next().map(Input::from_line).unwrap_or(Input::Eof))
    }
}

/// How a session ended; the caller decides what that means for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
}

/// Prompts for a polynomial, an operation and (for binary operations) a
/// second polynomial, then prints the result, until the source quits.
pub struct Repl<S, W> {
    source: S,
    out: W,
    options: ParseOptions,
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self {
            source,
            out,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self) -> Result<SessionEnd> {
        writeln!(self.out, "{WELCOME}")?;
        let end = loop {
            if let ControlFlow::Break(end) = self.round()? {
                break end;
            }
        };
        if end == SessionEnd::Quit {
            writeln!(self.out, "{FAREWELL}")?;
        }
        self.out.flush()?;
        Ok(end)
    }

    fn round(&mut self) -> Result<ControlFlow<SessionEnd>> {
        let left = match self.read_polynomial(FIRST_PROMPT)? {
            ControlFlow::Continue(poly) => poly,
            ControlFlow::Break(end) => return Ok(ControlFlow::Break(end)),
        };
        let operation = match self.read_operation()? {
            ControlFlow::Continue(op) => op,
            ControlFlow::Break(end) => return Ok(ControlFlow::Break(end)),
        };
        let right = if operation.is_unary() {
            None
        } else {
            match self.read_polynomial(SECOND_PROMPT)? {
                ControlFlow::Continue(poly) => Some(poly),
                ControlFlow::Break(end) => return Ok(ControlFlow::Break(end)),
            }
        };
        if let Some(result) = operation.apply(&left, right.as_ref()) {
            writeln!(self.out, "{result}")?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn read_polynomial(&mut self, prompt: &str) -> Result<ControlFlow<SessionEnd, Polynomial>> {
        loop {
            let line = match self.source.read_line(prompt)? {
                Input::Line(line) => line,
                Input::Quit => return Ok(ControlFlow::Break(SessionEnd::Quit)),
                Input::Eof => return Ok(ControlFlow::Break(SessionEnd::EndOfInput)),
            };
            match parse_polynomial_with(&line, &self.options) {
                Ok(poly) => return Ok(ControlFlow::Continue(poly)),
                Err(err) => {
                    debug!("rejected polynomial {line:?}: {err}");
                    writeln!(self.out, "{}", err.render(&line))?;
                    writeln!(self.out, "Please re-enter.")?;
                }
            }
        }
    }

    fn read_operation(&mut self) -> Result<ControlFlow<SessionEnd, Operation>> {
        loop {
            let line = match self.source.read_line(OPERATION_PROMPT)? {
                Input::Line(line) => line,
                Input::Quit => return Ok(ControlFlow::Break(SessionEnd::Quit)),
                Input::Eof => return Ok(ControlFlow::Break(SessionEnd::EndOfInput)),
            };
            match line.trim().parse::<Operation>() {
                Ok(op) => return Ok(ControlFlow::Continue(op)),
                Err(err) => writeln!(self.out, "Error: {err}. Please re-enter.")?,
            }
        }
    }
}
