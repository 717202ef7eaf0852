//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of [`Expr`] trees.
//!
//! Rules are applied structurally and the result is never simplified: the derivative of
//! `5 * x` is `((0 * x) + (5 * 1))`, not `5`. Subtrees of the differentiated expression that
//! appear in the derivative (the `f` and `g` of the product rule, the argument of a function)
//! are shared, not copied.
//!
//! ## Rules
//! - Product rule: d(f*g) = f'*g + f*g'
//! - Quotient rule: d(f/g) = (f'*g - f*g') / g^2
//! - Generalized power rule: d(f^g) = g*f'*f^(g-1) + f^g*g'*ln(f)
//! - Chain rule for sin, cos, ln, exp

use crate::symbolic::symbolic_engine::{Expr, Node};
use crate::symbolic::symbolic_traits::Scalar;
use std::rc::Rc;

impl<T: Scalar> Expr<T> {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Every other variable is treated as a constant, so for multivariable expressions this
    /// is the partial derivative. Differentiation is total: every node kind has a rule.
    ///
    /// # Arguments
    /// * `var` - Variable name to differentiate with respect to
    ///
    /// # Returns
    /// New symbolic expression representing the derivative
    ///
    /// # Examples
    /// ```rust
    /// use RustedExpr::symbolic::symbolic_engine::Expr;
    /// let f = Expr::ln(Expr::<f64>::variable("x"));
    /// assert_eq!(f.diff("x").to_string(), "(1 / x)");
    /// ```
    pub fn diff(&self, var: &str) -> Node<T> {
        match self {
            Expr::Number(_) => Expr::number(T::zero()),
            Expr::Variable(name) => {
                if name == var {
                    Expr::number(T::one())
                } else {
                    Expr::number(T::zero())
                }
            }
            Expr::Plus(lhs, rhs) => Expr::plus(lhs.diff(var), rhs.diff(var)),
            Expr::Minus(lhs, rhs) => Expr::minus(lhs.diff(var), rhs.diff(var)),
            Expr::Mult(lhs, rhs) => Expr::plus(
                Expr::mult(lhs.diff(var), Rc::clone(rhs)),
                Expr::mult(Rc::clone(lhs), rhs.diff(var)),
            ),
            Expr::Div(lhs, rhs) => Expr::div(
                Expr::minus(
                    Expr::mult(lhs.diff(var), Rc::clone(rhs)),
                    Expr::mult(Rc::clone(lhs), rhs.diff(var)),
                ),
                Expr::pow(Rc::clone(rhs), Expr::number(T::two())),
            ),
            Expr::Pow(base, exp) => {
                // variable base
                let base_term = Expr::mult(
                    Expr::mult(Rc::clone(exp), base.diff(var)),
                    Expr::pow(
                        Rc::clone(base),
                        Expr::minus(Rc::clone(exp), Expr::number(T::one())),
                    ),
                );
                // variable exponent, inert (but present) when the exponent is constant
                let exponent_term = Expr::mult(
                    Expr::mult(Expr::pow(Rc::clone(base), Rc::clone(exp)), exp.diff(var)),
                    Expr::ln(Rc::clone(base)),
                );
                Expr::plus(base_term, exponent_term)
            }
            Expr::Sin(arg) => Expr::mult(Expr::cos(Rc::clone(arg)), arg.diff(var)),
            Expr::Cos(arg) => Expr::mult(
                Expr::number(-T::one()),
                Expr::mult(Expr::sin(Rc::clone(arg)), arg.diff(var)),
            ),
            Expr::Ln(arg) => Expr::div(arg.diff(var), Rc::clone(arg)),
            Expr::Exp(arg) => Expr::mult(Expr::exp(Rc::clone(arg)), arg.diff(var)),
        }
    } // end of diff

    /// Computes the n-th derivative by repeated differentiation.
    ///
    /// No simplification happens between the steps, so the tree grows quickly with `n`.
    /// `n == 0` returns a tree equal to the expression itself.
    pub fn n_th_derivative(self: &Rc<Self>, var: &str, n: usize) -> Node<T> {
        let mut expr = Rc::clone(self);
        for _ in 0..n {
            expr = expr.diff(var);
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::Substitution;
    use approx::assert_relative_eq;

    fn x() -> Node<f64> {
        Expr::variable("x")
    }

    fn num(v: f64) -> Node<f64> {
        Expr::number(v)
    }

    fn at(expr: &Node<f64>, var: &str, value: f64) -> f64 {
        expr.set_variable(var, value).resolve().unwrap()
    }

    #[test]
    fn test_diff_leaves() {
        assert_eq!(num(7.0).diff("x").to_string(), "0");
        assert_eq!(x().diff("x").to_string(), "1");
        assert_eq!(x().diff("y").to_string(), "0");
    }

    #[test]
    fn test_diff_sum_and_difference() {
        let expr = Expr::minus(Expr::plus(x(), num(5.0)), Expr::variable("y"));
        assert_eq!(expr.diff("x").to_string(), "((1 + 0) - 0)");
    }

    #[test]
    fn test_diff_product_rule() {
        let expr = Expr::plus(x(), Expr::mult(num(5.0), Expr::variable("y")));
        assert_eq!(expr.diff("y").to_string(), "(0 + ((0 * y) + (5 * 1)))");
    }

    #[test]
    fn test_diff_quotient_rule() {
        let expr = Expr::div(num(1.0), x());
        assert_eq!(
            expr.diff("x").to_string(),
            "(((0 * x) - (1 * 1)) / (x ^ 2))"
        );
        assert_relative_eq!(at(&expr.diff("x"), "x", 2.0), -0.25);
    }

    #[test]
    fn test_diff_generalized_power_rule() {
        let expr = Expr::pow(x(), Expr::variable("y"));
        assert_eq!(
            expr.diff("y").to_string(),
            "(((y * 0) * (x ^ (y - 1))) + (((x ^ y) * 1) * ln(x)))"
        );
        assert_eq!(
            expr.diff("x").to_string(),
            "(((y * 1) * (x ^ (y - 1))) + (((x ^ y) * 0) * ln(x)))"
        );
    }

    #[test]
    fn test_diff_power_with_constant_exponent_keeps_inert_term() {
        let expr = Expr::pow(x(), num(3.0));
        let derivative = expr.diff("x");
        assert_eq!(
            derivative.to_string(),
            "(((3 * 1) * (x ^ (3 - 1))) + (((x ^ 3) * 0) * ln(x)))"
        );
        assert_relative_eq!(at(&derivative, "x", 2.0), 12.0);
    }

    #[test]
    fn test_diff_functions() {
        assert_eq!(Expr::sin(x()).diff("x").to_string(), "(cos(x) * 1)");
        assert_eq!(
            Expr::cos(x()).diff("x").to_string(),
            "(-1 * (sin(x) * 1))"
        );
        assert_eq!(Expr::ln(x()).diff("x").to_string(), "(1 / x)");
        assert_eq!(Expr::exp(x()).diff("x").to_string(), "(exp(x) * 1)");
    }

    #[test]
    fn test_chain_rule_values() {
        // sin(x^2)' = cos(x^2) * 2x
        let expr = Expr::sin(Expr::mult(x(), x()));
        let expected = (1.5f64 * 1.5).cos() * 3.0;
        assert_relative_eq!(at(&expr.diff("x"), "x", 1.5), expected, epsilon = 1e-12);
        // exp(cos(x))' = -exp(cos(x)) * sin(x)
        let expr = Expr::exp(Expr::cos(x()));
        let expected = -(0.3f64.cos()).exp() * 0.3f64.sin();
        assert_relative_eq!(at(&expr.diff("x"), "x", 0.3), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_shares_subtrees() {
        let arg = Expr::plus(x(), num(1.0));
        let expr = Expr::sin(Rc::clone(&arg));
        let derivative = expr.diff("x");
        match derivative.as_ref() {
            Expr::Mult(cos, _) => match cos.as_ref() {
                Expr::Cos(inner) => assert!(Rc::ptr_eq(inner, &arg)),
                other => panic!("unexpected node {:?}", other),
            },
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_diff_of_expression_without_variable_is_zero() {
        let y = Expr::variable("y");
        let expr = Expr::div(
            Expr::pow(Rc::clone(&y), num(2.0)),
            Expr::exp(Expr::sin(Rc::clone(&y))),
        );
        let derivative = expr.diff("x");
        let mut substitution = Substitution::new();
        substitution.insert("y".to_string(), 1.3);
        assert_eq!(derivative.evaluate(&substitution).resolve(), Ok(0.0));
    }

    #[test]
    fn test_n_th_derivative() {
        let expr = Expr::exp(Expr::mult(num(2.0), x()));
        assert_eq!(expr.n_th_derivative("x", 0), expr);
        let third = expr.n_th_derivative("x", 3);
        // (e^(2x))''' = 8 e^(2x)
        assert_relative_eq!(at(&third, "x", 0.5), 8.0 * 1f64.exp(), epsilon = 1e-10);
    }
}
