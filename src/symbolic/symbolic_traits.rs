// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// Numeric capability the whole expression tree is parameterized over.
// Every num_traits::Float type gets it for free; f64 is the one the crate is built around.

use num_traits::Float;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Scalar domain of an expression tree.
///
/// Besides the field operations inherited from `Float` (`+ - * /`, zero, one, negation)
/// the engine needs the transcendental functions used by `resolve`, a way to turn a
/// numeric lexeme into a value and a domain check for the natural logarithm.
pub trait Scalar: Float + Debug + Display + 'static {
    /// Converts a numeric lexeme produced by the lexer. Returns `None` for
    /// literals this scalar cannot represent: the imaginary unit `i`, or a value
    /// that overflows to infinity.
    fn from_literal(lexeme: &str) -> Option<Self>;

    /// `self ^ exponent`
    fn pow_scalar(self, exponent: Self) -> Self;

    fn sin_scalar(self) -> Self;

    fn cos_scalar(self) -> Self;

    /// natural logarithm
    fn ln_scalar(self) -> Self;

    fn exp_scalar(self) -> Self;

    /// true if `ln(self)` is defined
    fn in_ln_domain(&self) -> bool;

    /// constant 2, the exponent used by the quotient rule
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl<F> Scalar for F
where
    F: Float + FromStr + Debug + Display + 'static,
{
    fn from_literal(lexeme: &str) -> Option<Self> {
        if lexeme.ends_with('i') {
            return None;
        }
        // inf has no literal form, it would print as a variable name
        lexeme.parse::<F>().ok().filter(|value| value.is_finite())
    }

    fn pow_scalar(self, exponent: Self) -> Self {
        self.powf(exponent)
    }

    fn sin_scalar(self) -> Self {
        self.sin()
    }

    fn cos_scalar(self) -> Self {
        self.cos()
    }

    fn ln_scalar(self) -> Self {
        self.ln()
    }

    fn exp_scalar(self) -> Self {
        self.exp()
    }

    fn in_ln_domain(&self) -> bool {
        // NaN fails the comparison as well
        *self > F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_literal() {
        assert_eq!(f64::from_literal("3.5"), Some(3.5));
        assert_eq!(f64::from_literal("-2"), Some(-2.0));
        assert_eq!(f32::from_literal("10"), Some(10.0f32));
        assert_eq!(f64::from_literal("i"), None);
        assert_eq!(f64::from_literal("2.5i"), None);
    }

    #[test]
    fn test_from_literal_rejects_overflow() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(f64::from_literal(&huge), None);
        assert_eq!(f32::from_literal("1000000000000000000000000000000000000000"), None);
        assert_eq!(f64::from_literal("1000000000000000000000000000000000000000"), Some(1e39));
    }

    #[test]
    fn test_ln_domain() {
        assert!(2.0f64.in_ln_domain());
        assert!(!0.0f64.in_ln_domain());
        assert!(!(-1.0f64).in_ln_domain());
        assert!(!f64::NAN.in_ln_domain());
    }

    #[test]
    fn test_two() {
        assert_eq!(f64::two(), 2.0);
    }
}
