use log::trace;

use crate::diagnostics::{Diagnostic, SourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Variable,
    Plus,
    Minus,
    Star,
    Caret,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in parser messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Variable => "variable",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Caret => "`^`",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: SourceSpan,
}

/// Lazy tokenizer over a single polynomial expression.
///
/// Tokens are produced on demand by [`Lexer::next_token`]. Once the input is
/// exhausted every further call yields an `Eof` token.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current: usize,
    peeked: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            current: 0,
            peeked: None,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = match self.peeked.take() {
            Some(pair) => Some(pair),
            None => self.chars.next(),
        };
        if let Some((idx, ch)) = next {
            self.current = idx + ch.len_utf8();
        }
        next
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    fn collect_while<F>(&mut self, start: usize, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        while let Some((_, ch)) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.bump();
        }
        self.source[start..self.current].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn simple_token(&self, start: usize, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: self.source[start..self.current].to_string(),
            span: SourceSpan::new(start, self.current),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        self.skip_whitespace();
        let Some((start, ch)) = self.bump() else {
            let end = self.source.len();
            return Ok(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: SourceSpan::new(end, end),
            });
        };

        let token = match ch {
            '0'..='9' => {
                let lexeme = self.collect_while(start, |c| c.is_ascii_digit());
                Token {
                    kind: TokenKind::Integer,
                    lexeme,
                    span: SourceSpan::new(start, self.current),
                }
            }
            c if c.is_alphabetic() => {
                let lexeme = self.collect_while(start, char::is_alphabetic);
                Token {
                    kind: TokenKind::Variable,
                    lexeme,
                    span: SourceSpan::new(start, self.current),
                }
            }
            '+' => self.simple_token(start, TokenKind::Plus),
            '-' => self.simple_token(start, TokenKind::Minus),
            '*' => self.simple_token(start, TokenKind::Star),
            '^' => self.simple_token(start, TokenKind::Caret),
            other => {
                return Err(Diagnostic::lexer(
                    format!("unexpected character '{other}'"),
                    SourceSpan::new(start, self.current),
                )
                .with_hint("terms may only contain digits, letters, `+`, `-`, `*` and `^`"));
            }
        };
        trace!("lexed {:?} {:?} at {}", token.kind, token.lexeme, start);
        Ok(token)
    }

    /// Drains the remaining input into a token list ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
