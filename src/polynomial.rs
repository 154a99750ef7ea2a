use std::{fmt, ops, str::FromStr};

use crate::diagnostics::PolycalcError;

pub const DEFAULT_SYMBOL: &str = "x";

/// Dense single-variable polynomial with integer coefficients.
///
/// `coefficients[i]` is the coefficient of `symbol^i`. Zero entries are kept
/// as-is, including trailing ones; they are only skipped when rendering.
///
/// Arithmetic is exact modulo 2^64: a coefficient that leaves the `i64`
/// range wraps around instead of panicking.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coefficients: Vec<i64>,
    symbol: String,
}

impl Polynomial {
    pub fn new(coefficients: Vec<i64>) -> Self {
        Self::with_symbol(coefficients, DEFAULT_SYMBOL)
    }

    pub fn with_symbol(coefficients: Vec<i64>, symbol: impl Into<String>) -> Self {
        Self {
            coefficients,
            symbol: symbol.into(),
        }
    }

    /// The single-term zero polynomial `[0]`.
    pub fn zero() -> Self {
        Self::new(vec![0])
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    /// Highest power with a nonzero coefficient, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0)
    }

    #[must_use]
    pub fn add(&self, other: &Polynomial) -> Polynomial {
        self.zip_with(other, i64::wrapping_add)
    }

    #[must_use]
    pub fn subtract(&self, other: &Polynomial) -> Polynomial {
        self.zip_with(other, i64::wrapping_sub)
    }

    #[must_use]
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        if self.coefficients.is_empty() && other.coefficients.is_empty() {
            return self.derive_from(Vec::new());
        }
        let len = self.coefficients.len() + other.coefficients.len() - 1;
        let mut result = vec![0i64; len];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                result[i + j] = result[i + j].wrapping_add(a.wrapping_mul(b));
            }
        }
        self.derive_from(result)
    }

    #[must_use]
    pub fn derivative(&self) -> Polynomial {
        if self.coefficients.len() <= 1 {
            return self.derive_from(vec![0]);
        }
        let result = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, &c)| (power as i64).wrapping_mul(c))
            .collect();
        self.derive_from(result)
    }

    #[must_use]
    pub fn negate(&self) -> Polynomial {
        self.derive_from(self.coefficients.iter().map(|&c| c.wrapping_neg()).collect())
    }

    fn zip_with(&self, other: &Polynomial, op: impl Fn(i64, i64) -> i64) -> Polynomial {
        let len = self.coefficients.len().max(other.coefficients.len());
        let result = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0);
                let b = other.coefficients.get(i).copied().unwrap_or(0);
                op(a, b)
            })
            .collect();
        self.derive_from(result)
    }

    fn derive_from(&self, coefficients: Vec<i64>) -> Polynomial {
        Polynomial::with_symbol(coefficients, self.symbol.clone())
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(power, &c)| {
                let power_part = match power {
                    0 => String::new(),
                    1 => self.symbol.clone(),
                    p => format!("{}^{p}", self.symbol),
                };
                if c == 1 && power > 0 {
                    power_part
                } else {
                    format!("{c}{power_part}")
                }
            })
            .collect();
        // An all-zero polynomial renders as the empty string.
        f.write_str(&terms.join(" + ").replace("+ -", "- "))
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({self})")
    }
}

impl FromStr for Polynomial {
    type Err = PolycalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::normalize::parse_polynomial(s)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl ops::$trait<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                Polynomial::$inherent(self, rhs)
            }
        }

        impl ops::$trait for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                Polynomial::$inherent(&self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, subtract);
forward_binop!(Mul, mul, multiply);

impl ops::Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.negate()
    }
}

impl ops::Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.negate()
    }
}
