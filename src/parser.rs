use std::str::FromStr;

use log::debug;

use crate::{
    ast::{AddOp, Item, Term},
    diagnostics::{Diagnostic, SourceSpan},
    lexer::{Lexer, Token, TokenKind},
};

/// Parses polynomial text into terms separated by add-ops.
///
/// Each call builds its own lexer and parser; the parser is consumed by the
/// parse, so a scanner can never be reused after its input is exhausted.
/// Whitespace-only input yields an empty list.
pub fn parse_terms(source: &str) -> Result<Vec<Item>, Diagnostic> {
    let items = Parser::new(source)?.parse()?;
    debug!("parsed {} item(s) from {source:?}", items.len());
    Ok(items)
}

/// What the start of a term established before the exponent is read.
#[derive(Debug)]
enum TermHead {
    CoefficientOnly(i64),
    VariableOnly(String),
    CoefficientAndVariable(i64, String),
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    last_end: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self, Diagnostic> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            last_end: 0,
        })
    }

    fn parse(mut self) -> Result<Vec<Item>, Diagnostic> {
        let mut items = Vec::new();
        if self.check(TokenKind::Eof) {
            return Ok(items);
        }

        items.push(Item::Term(self.parse_leading_term()?));
        while let Some(op) = self.parse_addop()? {
            items.push(Item::AddOp(op));
            items.push(Item::Term(self.parse_term()?));
        }
        Ok(items)
    }

    /// The first term may carry a unary sign, applied here rather than in
    /// normalization.
    fn parse_leading_term(&mut self) -> Result<Term, Diagnostic> {
        let sign = match self.current.kind {
            TokenKind::Plus | TokenKind::Minus => Some(self.advance()?),
            _ => None,
        };
        let mut term = self.parse_term()?;
        if let Some(sign) = sign {
            if sign.kind == TokenKind::Minus {
                term.coefficient = -term.coefficient;
            }
            term.span = sign.span.to(term.span);
        }
        Ok(term)
    }

    fn parse_term(&mut self) -> Result<Term, Diagnostic> {
        let start = self.current.span.start;
        let head = self.parse_head()?;
        let (coefficient, variable) = match head {
            TermHead::CoefficientOnly(coefficient) => {
                if self.check(TokenKind::Caret) {
                    return Err(self
                        .error(&self.current, "a constant term cannot be raised to a power")
                        .with_hint("write the exponent on a variable, e.g. `3x^2`"));
                }
                (coefficient, None)
            }
            TermHead::VariableOnly(name) => (1, Some(name)),
            TermHead::CoefficientAndVariable(coefficient, name) => (coefficient, Some(name)),
        };
        let exponent = if variable.is_some() {
            self.parse_exponent()?
        } else {
            0
        };
        Ok(Term {
            coefficient,
            variable,
            exponent,
            span: SourceSpan::new(start, self.last_end),
        })
    }

    fn parse_head(&mut self) -> Result<TermHead, Diagnostic> {
        match self.current.kind {
            TokenKind::Integer => {
                let coefficient = self.parse_integer::<i64>("coefficient")?;
                self.matches(TokenKind::Star)?;
                if self.check(TokenKind::Variable) {
                    let name = self.advance()?.lexeme;
                    Ok(TermHead::CoefficientAndVariable(coefficient, name))
                } else {
                    Ok(TermHead::CoefficientOnly(coefficient))
                }
            }
            TokenKind::Variable => Ok(TermHead::VariableOnly(self.advance()?.lexeme)),
            other => Err(self.error(
                &self.current,
                &format!(
                    "expected an integer or a variable to start a term, found {}",
                    other.describe()
                ),
            )),
        }
    }

    fn parse_exponent(&mut self) -> Result<u32, Diagnostic> {
        if !self.matches(TokenKind::Caret)? {
            return Ok(1);
        }
        if !self.check(TokenKind::Integer) {
            return Err(self.error(
                &self.current,
                &format!(
                    "expected an integer exponent after `^`, found {}",
                    self.current.kind.describe()
                ),
            ));
        }
        self.parse_integer::<u32>("exponent")
    }

    fn parse_addop(&mut self) -> Result<Option<AddOp>, Diagnostic> {
        match self.current.kind {
            TokenKind::Plus => {
                self.advance()?;
                Ok(Some(AddOp::Plus))
            }
            TokenKind::Minus => {
                self.advance()?;
                Ok(Some(AddOp::Minus))
            }
            TokenKind::Eof => Ok(None),
            other => Err(self.error(
                &self.current,
                &format!(
                    "expected `+`, `-` or end of input after a term, found {}",
                    other.describe()
                ),
            )),
        }
    }

    fn parse_integer<T: FromStr>(&mut self, role: &str) -> Result<T, Diagnostic> {
        let token = self.advance()?;
        token.lexeme.parse::<T>().map_err(|_| {
            self.error(
                &token,
                &format!("integer `{}` is too large for a {role}", token.lexeme),
            )
        })
    }

    fn matches(&mut self, kind: TokenKind) -> Result<bool, Diagnostic> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) -> Result<Token, Diagnostic> {
        let next = self.lexer.next_token()?;
        self.last_end = self.current.span.end;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn error(&self, token: &Token, message: &str) -> Diagnostic {
        Diagnostic::parser(message, token.span)
    }
}
