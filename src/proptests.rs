//! Property-based tests for parsing, rendering and arithmetic.

use proptest::prelude::*;

use crate::{normalize::parse_polynomial, polynomial::Polynomial};

fn small_coeff() -> impl Strategy<Value = i64> {
    -50i64..50i64
}

// Degree 0-5, trailing zeros allowed
fn small_poly() -> impl Strategy<Value = Polynomial> {
    proptest::collection::vec(small_coeff(), 1..=6).prop_map(Polynomial::new)
}

fn nonzero_poly() -> impl Strategy<Value = Polynomial> {
    small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
}

// Drops trailing zeros, which the canonical rendering cannot express.
fn trimmed(coefficients: &[i64]) -> Vec<i64> {
    let len = coefficients
        .iter()
        .rposition(|&c| c != 0)
        .map_or(1, |idx| idx + 1);
    coefficients[..len].to_vec()
}

proptest! {
    #[test]
    fn canonical_rendering_round_trips(a in nonzero_poly()) {
        let rendered = a.to_string();
        let parsed = parse_polynomial(&rendered).expect("canonical rendering should parse");
        prop_assert_eq!(parsed.coefficients().to_vec(), trimmed(a.coefficients()));
    }

    #[test]
    fn add_commutative(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn add_zero_identity(a in small_poly()) {
        prop_assert_eq!(a.add(&Polynomial::zero()), a.clone());
        let mut padded = a.coefficients().to_vec();
        padded.resize(8, 0);
        prop_assert_eq!(a.add(&Polynomial::new(vec![0; 8])).coefficients().to_vec(), padded);
    }

    #[test]
    fn subtract_self_is_zero(a in small_poly()) {
        prop_assert!(a.subtract(&a).is_zero());
    }

    #[test]
    fn subtract_is_add_negated(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.subtract(&b), a.add(&b.negate()));
    }

    #[test]
    fn multiply_distributes_over_add(a in small_poly(), b in small_poly(), c in small_poly()) {
        let left = a.multiply(&b.add(&c));
        let right = a.multiply(&b).add(&a.multiply(&c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn multiply_commutative(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.multiply(&b), b.multiply(&a));
    }

    #[test]
    fn derivative_linear(a in small_poly(), b in small_poly()) {
        let left = a.add(&b).derivative();
        let right = a.derivative().add(&b.derivative());
        prop_assert_eq!(left, right);
    }

    #[test]
    fn derivative_of_constant_is_zero(c in small_coeff()) {
        prop_assert_eq!(Polynomial::new(vec![c]).derivative().coefficients().to_vec(), vec![0]);
    }
}
