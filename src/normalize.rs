use log::debug;

use crate::{
    ast::{AddOp, Item, Term},
    diagnostics::{PolycalcError, Result},
    parser,
    polynomial::{DEFAULT_SYMBOL, Polynomial},
};

/// Limits applied while turning parsed terms into a dense coefficient vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Largest exponent accepted; the vector is allocated up to this power.
    pub max_degree: u32,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEGREE: u32 = 10_000;

    pub fn with_max_degree(mut self, max_degree: u32) -> Self {
        self.max_degree = max_degree;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_degree: Self::DEFAULT_MAX_DEGREE,
        }
    }
}

/// Parses and validates `source` with the default [`ParseOptions`].
pub fn parse_polynomial(source: &str) -> Result<Polynomial> {
    parse_polynomial_with(source, &ParseOptions::default())
}

pub fn parse_polynomial_with(source: &str, options: &ParseOptions) -> Result<Polynomial> {
    let items = parser::parse_terms(source)?;
    let polynomial = normalize(items, options)?;
    debug!("normalized {source:?} into {:?}", polynomial.coefficients());
    Ok(polynomial)
}

/// Folds add-op signs into their terms and builds the coefficient vector.
///
/// Rejects more than one variable name, repeated exponents, and exponents
/// above `options.max_degree`, in that order. An empty item list is the
/// zero polynomial.
pub fn normalize(items: Vec<Item>, options: &ParseOptions) -> Result<Polynomial> {
    let mut terms = apply_signs(items);
    terms.sort_by_key(|term| term.exponent);

    let mut symbol: Option<&str> = None;
    for term in &terms {
        let Some(name) = term.variable.as_deref() else {
            continue;
        };
        match symbol {
            None => symbol = Some(name),
            Some(first) if first != name => {
                return Err(PolycalcError::MixedVariable {
                    first: first.to_string(),
                    second: name.to_string(),
                    span: term.span,
                });
            }
            Some(_) => {}
        }
    }
    let symbol = symbol.unwrap_or(DEFAULT_SYMBOL).to_string();

    // Checked after the variable names, so `x + y` is a mixed-variable error.
    for pair in terms.windows(2) {
        if pair[0].exponent == pair[1].exponent {
            return Err(PolycalcError::DuplicateExponent {
                exponent: pair[1].exponent,
                span: pair[1].span,
            });
        }
    }

    let max_exponent = match terms.last() {
        Some(term) if term.exponent > options.max_degree => {
            return Err(PolycalcError::DegreeTooLarge {
                exponent: term.exponent,
                limit: options.max_degree,
                span: term.span,
            });
        }
        Some(term) => term.exponent as usize,
        None => 0,
    };

    let mut coefficients = vec![0; max_exponent + 1];
    for term in &terms {
        coefficients[term.exponent as usize] = term.coefficient;
    }
    Ok(Polynomial::with_symbol(coefficients, symbol))
}

fn apply_signs(items: Vec<Item>) -> Vec<Term> {
    let mut pending = AddOp::Plus;
    let mut terms = Vec::new();
    for item in items {
        match item {
            Item::AddOp(op) => pending = op,
            Item::Term(mut term) => {
                if pending == AddOp::Minus {
                    term.coefficient = -term.coefficient;
                }
                pending = AddOp::Plus;
                terms.push(term);
            }
        }
    }
    terms
}
