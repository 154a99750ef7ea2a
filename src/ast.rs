use crate::diagnostics::SourceSpan;

/// One monomial as written in the source, before add-op signs are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub coefficient: i64,
    pub variable: Option<String>,
    pub exponent: u32,
    pub span: SourceSpan,
}

/// Connective between two terms; decides the sign of the term that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Term(Term),
    AddOp(AddOp),
}
