use std::fmt;

use thiserror::Error;

/// Represents a byte span within the polynomial source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Caret line marking this span under `source`, counted in chars.
    /// Empty spans (end of input) get a single caret.
    pub fn underline(self, source: &str) -> String {
        let start = self.start.min(source.len());
        let end = self.end.clamp(start, source.len());
        let pad = source.get(..start).map_or(0, |s| s.chars().count());
        let width = source.get(start..end).map_or(0, |s| s.chars().count());
        format!("{}{}", " ".repeat(pad), "^".repeat(width.max(1)))
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: SourceSpan) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Which stage of the front end rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
}

/// Syntax error from the lexer or the term parser, always tied to the
/// offending token.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: SourceSpan,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn lexer(message: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(DiagnosticKind::Lexer, message, span)
    }

    pub fn parser(message: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(DiagnosticKind::Parser, message, span)
    }

    fn new(kind: DiagnosticKind, message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} error: {} (at char #{})",
            self.kind, self.message, self.span.start
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for parsing, validation and the calculator driver.
#[derive(Debug, Error)]
pub enum PolycalcError {
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error(
        "only one term per exponent is allowed: found at least two terms raised to the power of {exponent} (at char #{})",
        .span.start
    )]
    DuplicateExponent { exponent: u32, span: SourceSpan },
    #[error(
        "only one variable is allowed: found at least two, `{first}` and `{second}` (at char #{})",
        .span.start
    )]
    MixedVariable {
        first: String,
        second: String,
        span: SourceSpan,
    },
    #[error(
        "exponent {exponent} exceeds the maximum supported degree of {limit} (at char #{})",
        .span.start
    )]
    DegreeTooLarge {
        exponent: u32,
        limit: u32,
        span: SourceSpan,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line editor error: {0}")]
    Readline(String),
}

impl PolycalcError {
    /// Location in the input text that triggered the error, when there is one.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            PolycalcError::Diagnostic(diag) => Some(diag.span),
            PolycalcError::DuplicateExponent { span, .. }
            | PolycalcError::MixedVariable { span, .. }
            | PolycalcError::DegreeTooLarge { span, .. } => Some(*span),
            PolycalcError::Io(_) | PolycalcError::Readline(_) => None,
        }
    }

    /// The message followed by `source` with the offending span underlined.
    ///
    /// ```text
    /// only one variable is allowed: ... (at char #4)
    ///   x + y
    ///       ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        match self.span() {
            Some(span) => format!("{self}\n  {source}\n  {}", span.underline(source)),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PolycalcError>;
