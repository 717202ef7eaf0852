//! # Expression facade
//!
//! [`Expression`] is a thin value type around the root [`Node`] of an expression tree.
//! Cloning an expression clones the `Rc`, both copies share the same immutable tree.
//!
//! ```rust
//! use RustedExpr::symbolic::expression::Expression;
//! let f: Expression<f64> = "x + 5 * y".parse().unwrap();
//! assert_eq!(f.eval_and_resolve(&[("x", 10.0), ("y", 2.0)]).unwrap(), 20.0);
//! let g = f.clone() ^ Expression::from(2.0);
//! assert_eq!(g.to_string(), "((x + (5 * y)) ^ 2)");
//! ```

use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::{Expr, Node, Substitution};
use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_traits::Scalar;
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct Expression<T> {
    // root of expression tree
    root: Node<T>,
}

impl<T: Scalar> Expression<T> {
    /// BASIC FEATURES

    /// Parses text into an expression.
    ///
    /// # Errors
    /// `Lex` for an unknown character, `Parse` for a token no production accepts,
    /// `InvalidLiteral` for a number the scalar cannot represent.
    pub fn parse(input: &str) -> Result<Self, SymbolicError> {
        parse_expression_func(input)
    }

    pub fn from_node(root: Node<T>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub fn number(value: T) -> Self {
        Self::from_node(Expr::number(value))
    }

    pub fn var(name: &str) -> Self {
        Self::from_node(Expr::variable(name))
    }

    /// Creates variables from a comma-separated string, e.g. `"x, y, z"`.
    /// Whitespace is trimmed and empty names are skipped.
    pub fn symbols(symbols: &str) -> Vec<Self> {
        symbols
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::var)
            .collect()
    }

    //___________________________________TREE OPERATIONS____________________________________

    /// Symbolic derivative with respect to `var`, unsimplified.
    pub fn diff(&self, var: &str) -> Self {
        Self::from_node(self.root.diff(var))
    }

    pub fn n_th_derivative(&self, var: &str, n: usize) -> Self {
        Self::from_node(self.root.n_th_derivative(var, n))
    }

    /// Derivatives with respect to every variable of the expression, in the
    /// order of [`Expression::variables`].
    pub fn diff_multi(&self) -> Vec<Self> {
        self.variables().iter().map(|var| self.diff(var)).collect()
    }

    /// Replaces the variables named in `substitution`; nothing is computed.
    pub fn evaluate(&self, substitution: &Substitution<T>) -> Self {
        Self::from_node(self.root.evaluate(substitution))
    }

    /// Substitution from parallel lists of names and values.
    ///
    /// # Errors
    /// `InvalidSubstitution` if the lists differ in length or a name is repeated.
    pub fn evaluate_vars(&self, names: &[&str], values: &[T]) -> Result<Self, SymbolicError> {
        if names.len() != values.len() {
            return Err(SymbolicError::InvalidSubstitution {
                reason: format!("{} names but {} values", names.len(), values.len()),
            });
        }
        let pairs: Vec<(&str, T)> = names.iter().copied().zip(values.iter().copied()).collect();
        Ok(self.evaluate(&substitution_from_pairs(&pairs)?))
    }

    pub fn resolve(&self) -> Result<T, SymbolicError> {
        self.root.resolve()
    }

    /// evaluate then resolve
    pub fn eval_and_resolve(&self, pairs: &[(&str, T)]) -> Result<T, SymbolicError> {
        self.evaluate(&substitution_from_pairs(pairs)?).resolve()
    }

    pub fn contains_variable(&self, var: &str) -> bool {
        self.root.contains_variable(var)
    }

    /// sorted, deduplicated names of free variables
    pub fn variables(&self) -> Vec<String> {
        self.root.extract_variables()
    }

    //___________________________________FUNCTIONS____________________________________

    pub fn sin(&self) -> Self {
        Self::from_node(Expr::sin(Rc::clone(&self.root)))
    }

    pub fn cos(&self) -> Self {
        Self::from_node(Expr::cos(Rc::clone(&self.root)))
    }

    pub fn ln(&self) -> Self {
        Self::from_node(Expr::ln(Rc::clone(&self.root)))
    }

    pub fn exp(&self) -> Self {
        Self::from_node(Expr::exp(Rc::clone(&self.root)))
    }

    pub fn pow(&self, exponent: &Self) -> Self {
        Self::from_node(Expr::pow(Rc::clone(&self.root), Rc::clone(&exponent.root)))
    }
}

/// Builds a substitution table, rejecting repeated names.
pub fn substitution_from_pairs<T: Scalar>(
    pairs: &[(&str, T)],
) -> Result<Substitution<T>, SymbolicError> {
    let mut seen = HashSet::new();
    let mut substitution = Substitution::with_capacity(pairs.len());
    for (name, value) in pairs {
        if !seen.insert(*name) {
            return Err(SymbolicError::InvalidSubstitution {
                reason: format!("variable \"{}\" given more than once", name),
            });
        }
        substitution.insert(name.to_string(), *value);
    }
    Ok(substitution)
}

//___________________________________1D FUNCTIONS OF f64____________________________________
impl Expression<f64> {
    /// Turns the expression into a function of one variable.
    /// All other variables have to be substituted beforehand, else the closure
    /// returns `UnresolvedVariable`.
    pub fn lambdify1D(&self, var: &str) -> impl Fn(f64) -> Result<f64, SymbolicError> + '_ {
        let var = var.to_string();
        move |x| self.root.set_variable(&var, x).resolve()
    }

    /// Validates the analytical derivative against central differences.
    ///
    /// Both derivatives are computed on `linspace(start, end, num_values)`, the step of the
    /// finite differences is `1e-4` of the grid spacing.
    ///
    /// # Returns
    /// Tuple of (norm of the difference, norm < max_norm)
    ///
    /// # Errors
    /// `InvalidArgument` if the grid has fewer than two points or `start == end`.
    pub fn compare_num1D(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> Result<(f64, bool), SymbolicError> {
        if num_values < 2 || start == end {
            return Err(SymbolicError::InvalidArgument {
                reason: format!(
                    "grid from {} to {} with {} points, two distinct points are needed",
                    start, end, num_values
                ),
            });
        }
        let domain = linspace(start, end, num_values);
        let analytical = self.diff(var);
        let analytical_fn = analytical.lambdify1D(var);
        let analytical_derivative = domain
            .iter()
            .map(|x| analytical_fn(*x))
            .collect::<Result<Vec<f64>, SymbolicError>>()?;

        let function = self.lambdify1D(var);
        let step = (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0);
        let numerical = numerical_derivative(&function, &domain, step)?;

        let norma_val = norm(&analytical_derivative, &numerical);
        Ok((norma_val, norma_val < max_norm))
    }
}

impl<T: Scalar> From<T> for Expression<T> {
    fn from(value: T) -> Self {
        Self::number(value)
    }
}

impl<T: Scalar> FromStr for Expression<T> {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: fmt::Display> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

//___________________________________OPERATORS____________________________________
// owned and borrowed operands both build a new node over the two shared roots

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $constructor:ident) => {
        impl<T: Scalar> std::ops::$trait for Expression<T> {
            type Output = Expression<T>;

            fn $method(self, rhs: Self) -> Self::Output {
                Expression::from_node(Expr::$constructor(self.root, rhs.root))
            }
        }

        impl<'a, T: Scalar> std::ops::$trait<&'a Expression<T>> for &'a Expression<T> {
            type Output = Expression<T>;

            fn $method(self, rhs: &'a Expression<T>) -> Self::Output {
                Expression::from_node(Expr::$constructor(
                    Rc::clone(&self.root),
                    Rc::clone(&rhs.root),
                ))
            }
        }
    };
}

impl_binary_operator!(Add, add, plus);
impl_binary_operator!(Sub, sub, minus);
impl_binary_operator!(Mul, mul, mult);
impl_binary_operator!(Div, div, div);
// `^` is exponentiation, not xor
impl_binary_operator!(BitXor, bitxor, pow);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn expr(input: &str) -> Expression<f64> {
        Expression::parse(input).unwrap()
    }

    #[test]
    fn test_number_constructor() {
        assert_eq!(Expression::from(10.5).to_string(), "10.5");
        assert_eq!(Expression::number(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_string_constructor() {
        assert_eq!(expr("x").to_string(), "x");
        assert_eq!(expr("x * 5 + 3.5").to_string(), "((x * 5) + 3.5)");
        let from_str: Expression<f64> = "ln(x)".parse().unwrap();
        assert_eq!(from_str, expr("ln(x)"));
    }

    #[test]
    fn test_copy_shares_root() {
        let original = expr("sin(x) * y");
        let copy = original.clone();
        assert!(Rc::ptr_eq(original.root(), copy.root()));
    }

    #[test]
    fn test_operators() {
        let lhs = expr("x * 5");
        let rhs = expr("y");
        assert_eq!((&lhs + &rhs).to_string(), "((x * 5) + y)");
        assert_eq!((&lhs - &rhs).to_string(), "((x * 5) - y)");
        assert_eq!((&lhs / &rhs).to_string(), "((x * 5) / y)");
        assert_eq!((&lhs ^ &rhs).to_string(), "((x * 5) ^ y)");
        assert_eq!((expr("6.6 - x") * expr("2")).to_string(), "((6.6 - x) * 2)");
        assert_eq!(lhs.pow(&rhs), lhs.clone() ^ rhs.clone());
    }

    #[test]
    fn test_operators_share_operands() {
        let lhs = expr("x + 1");
        let sum = &lhs + &lhs;
        match sum.root().as_ref() {
            Expr::Plus(a, b) => {
                assert!(Rc::ptr_eq(a, lhs.root()));
                assert!(Rc::ptr_eq(b, lhs.root()));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_functions() {
        let e = expr("x + 5");
        assert_eq!(e.sin().to_string(), "sin((x + 5))");
        assert_eq!(e.cos().to_string(), "cos((x + 5))");
        assert_eq!(e.ln().to_string(), "ln((x + 5))");
        assert_eq!(e.exp().to_string(), "exp((x + 5))");
    }

    #[test]
    fn test_evaluate() {
        let e = expr("x + 5 * y");
        let mut substitution = Substitution::new();
        substitution.insert("x".to_string(), 10.0);
        assert_eq!(e.evaluate(&substitution).to_string(), "(10 + (5 * y))");
        assert_eq!(
            e.evaluate_vars(&["x"], &[10.0]).unwrap().to_string(),
            "(10 + (5 * y))"
        );
    }

    #[test]
    fn test_evaluate_vars_validation() {
        let e = expr("x + y");
        assert!(matches!(
            e.evaluate_vars(&["x", "y"], &[1.0]),
            Err(SymbolicError::InvalidSubstitution { .. })
        ));
        assert!(matches!(
            e.evaluate_vars(&["x", "x"], &[1.0, 2.0]),
            Err(SymbolicError::InvalidSubstitution { .. })
        ));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(expr("5 * 10").resolve().unwrap(), 50.0);
        assert_eq!(
            expr("x + 5 * y")
                .eval_and_resolve(&[("x", 10.0), ("y", 2.0)])
                .unwrap(),
            20.0
        );
        assert_eq!(
            expr("x + 5 * y").eval_and_resolve(&[("x", 10.0)]),
            Err(SymbolicError::UnresolvedVariable {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_diff() {
        assert_eq!(expr("ln(x)").diff("x").to_string(), "(1 / x)");
        assert_eq!(
            expr("x + 5 * y").diff("y").to_string(),
            "(0 + ((0 * y) + (5 * 1)))"
        );
    }

    #[test]
    fn test_symbols_and_variables() {
        let vars = Expression::<f64>::symbols("x, y ,, z");
        let names: Vec<String> = vars.iter().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        let e = expr("z * sin(x) + x");
        assert_eq!(e.variables(), vec!["x", "z"]);
        assert!(e.contains_variable("z"));
        assert_eq!(e.diff_multi().len(), 2);
    }

    #[test]
    fn test_lambdify1D() {
        let e = expr("x ^ 2 + 1");
        let f = e.lambdify1D("x");
        assert_relative_eq!(f(3.0).unwrap(), 10.0);
        let g = expr("x * y");
        assert!(g.lambdify1D("x")(1.0).is_err());
    }

    #[test]
    fn test_compare_num1D() {
        let e = expr("x + exp(x)");
        let (norma, ok) = e.compare_num1D("x", 0.0, 10.0, 100, 1e-6).unwrap();
        assert!(ok, "norm {}", norma);
        let e = expr("sin(x) / x ^ 3");
        let (norma, ok) = e.compare_num1D("x", 0.5, 3.0, 50, 1e-5).unwrap();
        assert!(ok, "norm {}", norma);
    }

    #[test]
    fn test_compare_num1D_rejects_degenerate_grid() {
        let e = expr("x ^ 2");
        for (start, end, num_values) in [(0.0, 1.0, 0), (0.0, 1.0, 1), (2.0, 2.0, 10)] {
            assert!(matches!(
                e.compare_num1D("x", start, end, num_values, 1e-6),
                Err(SymbolicError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_parse_matches_parse_expression_func() {
        let input = "sin(x) ^ 2 - 3 / y";
        assert_eq!(expr(input), parse_expression_func::<f64>(input).unwrap());
    }

    #[test]
    fn test_compare_num1D_propagates_domain_error() {
        let e = expr("ln(x)");
        assert!(matches!(
            e.compare_num1D("x", -1.0, 1.0, 11, 1e-6),
            Err(SymbolicError::Domain { .. })
        ));
    }
}
