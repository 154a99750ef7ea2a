//! Single-variable polynomial calculator.
//!
//! Text such as `"3x^3 - 4x + 5"` is tokenized, parsed into signed terms,
//! validated, and collected into a dense [`Polynomial`] that supports exact
//! integer addition, subtraction, multiplication and differentiation.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod polynomial;
pub mod repl;

#[cfg(test)]
mod proptests;

pub use diagnostics::{Diagnostic, DiagnosticKind, PolycalcError, SourceSpan};
pub use normalize::{ParseOptions, parse_polynomial, parse_polynomial_with};
pub use polynomial::Polynomial;
pub use repl::{Operation, Repl, SessionEnd};
