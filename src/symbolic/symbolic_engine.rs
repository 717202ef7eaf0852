//! # Symbolic Engine Module
//!
//! Core expression tree of the crate. An expression is a tree of [`Expr`] nodes; every
//! child is held behind an `Rc` so that transformations (substitution, differentiation) build
//! new nodes on top of the old, unmodified subtrees instead of copying them.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Leaves**: `Number(T)` and `Variable(String)`
//! - **Operations**: `Plus`, `Minus`, `Mult`, `Div`, `Pow`
//! - **Functions**: `Sin`, `Cos`, `Ln`, `Exp`
//!
//! ### Key Methods
//! - `evaluate(substitution)` - replace variables by numbers, nothing is computed
//! - `set_variable(var, value)` - the same for a single variable
//! - `resolve()` - collapse a tree without free variables into a number
//! - `diff(var)` - analytical derivative (see `symbolic_engine_derivatives`)
//! - `Display` - canonical, fully parenthesized text that parses back to the same tree
//!
//! ## Interesting Code Features
//!
//! 1. **Structural sharing**: nodes are immutable, so two parents may point at the
//!    same child. `evaluate` hands back the very same `Rc` for leaves it does not touch.
//!
//! 2. **Scalar genericity**: the tree is generic over [`Scalar`], `f64` being the
//!    instantiation used throughout the crate.

use crate::symbolic::symbolic_errors::SymbolicError;
use crate::symbolic::symbolic_traits::Scalar;
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

/// Shared reference to an immutable node.
pub type Node<T> = Rc<Expr<T>>;

/// Variable name -> value table used by `evaluate`.
pub type Substitution<T> = HashMap<String, T>;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust
/// use RustedExpr::symbolic::symbolic_engine::Expr;
/// let x = Expr::<f64>::variable("x");
/// let expr = Expr::plus(x, Expr::number(2.0));
/// assert_eq!(expr.to_string(), "(x + 2)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    /// Numerical constant value
    Number(T),
    /// Symbolic variable with a name (e.g., "x", "velocity")
    Variable(String),
    /// left + right
    Plus(Node<T>, Node<T>),
    /// left - right
    Minus(Node<T>, Node<T>),
    /// left * right
    Mult(Node<T>, Node<T>),
    /// left / right
    Div(Node<T>, Node<T>),
    /// base ^ exponent
    Pow(Node<T>, Node<T>),
    Sin(Node<T>),
    Cos(Node<T>),
    /// natural logarithm
    Ln(Node<T>),
    /// e^x
    Exp(Node<T>),
}

/// Fully parenthesized infix form: `(left op right)` for operations, `name(arg)` for functions.
impl<T: fmt::Display> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(val) => write!(f, "{}", val),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Plus(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Minus(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mult(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Sin(arg) => write!(f, "sin({})", arg),
            Expr::Cos(arg) => write!(f, "cos({})", arg),
            Expr::Ln(arg) => write!(f, "ln({})", arg),
            Expr::Exp(arg) => write!(f, "exp({})", arg),
        }
    }
}

impl<T: Scalar> Expr<T> {
    //___________________________________CONSTRUCTORS____________________________________

    pub fn number(value: T) -> Node<T> {
        Rc::new(Expr::Number(value))
    }

    pub fn variable(name: &str) -> Node<T> {
        Rc::new(Expr::Variable(name.to_string()))
    }

    pub fn plus(lhs: Node<T>, rhs: Node<T>) -> Node<T> {
        Rc::new(Expr::Plus(lhs, rhs))
    }

    pub fn minus(lhs: Node<T>, rhs: Node<T>) -> Node<T> {
        Rc::new(Expr::Minus(lhs, rhs))
    }

    pub fn mult(lhs: Node<T>, rhs: Node<T>) -> Node<T> {
        Rc::new(Expr::Mult(lhs, rhs))
    }

    pub fn div(lhs: Node<T>, rhs: Node<T>) -> Node<T> {
        Rc::new(Expr::Div(lhs, rhs))
    }

    pub fn pow(base: Node<T>, exp: Node<T>) -> Node<T> {
        Rc::new(Expr::Pow(base, exp))
    }

    pub fn sin(arg: Node<T>) -> Node<T> {
        Rc::new(Expr::Sin(arg))
    }

    pub fn cos(arg: Node<T>) -> Node<T> {
        Rc::new(Expr::Cos(arg))
    }

    pub fn ln(arg: Node<T>) -> Node<T> {
        Rc::new(Expr::Ln(arg))
    }

    pub fn exp(arg: Node<T>) -> Node<T> {
        Rc::new(Expr::Exp(arg))
    }

    //___________________________________SUBSTITUTION____________________________________

    /// Substitutes variables with constant values using a HashMap.
    ///
    /// Every `Variable` whose name is a key of `substitution` becomes a `Number`; all
    /// other nodes are rebuilt over their evaluated children. Constant subexpressions are
    /// not computed, `(2 + 3)` stays `(2 + 3)`. Leaves that are not replaced are returned
    /// as the same shared node.
    ///
    /// # Arguments
    /// * `substitution` - HashMap mapping variable names to their replacement values
    ///
    /// # Returns
    /// New expression with all mapped variables substituted; other variables stay free
    pub fn evaluate(self: &Rc<Self>, substitution: &Substitution<T>) -> Node<T> {
        match self.as_ref() {
            Expr::Number(_) => Rc::clone(self),
            Expr::Variable(name) => match substitution.get(name.as_str()) {
                Some(value) => Expr::number(*value),
                None => Rc::clone(self),
            },
            Expr::Plus(lhs, rhs) => Expr::plus(lhs.evaluate(substitution), rhs.evaluate(substitution)),
            Expr::Minus(lhs, rhs) => {
                Expr::minus(lhs.evaluate(substitution), rhs.evaluate(substitution))
            }
            Expr::Mult(lhs, rhs) => Expr::mult(lhs.evaluate(substitution), rhs.evaluate(substitution)),
            Expr::Div(lhs, rhs) => Expr::div(lhs.evaluate(substitution), rhs.evaluate(substitution)),
            Expr::Pow(base, exp) => Expr::pow(base.evaluate(substitution), exp.evaluate(substitution)),
            Expr::Sin(arg) => Expr::sin(arg.evaluate(substitution)),
            Expr::Cos(arg) => Expr::cos(arg.evaluate(substitution)),
            Expr::Ln(arg) => Expr::ln(arg.evaluate(substitution)),
            Expr::Exp(arg) => Expr::exp(arg.evaluate(substitution)),
        }
    }

    /// Substitutes a single variable with a constant value throughout the expression.
    pub fn set_variable(self: &Rc<Self>, var: &str, value: T) -> Node<T> {
        let mut substitution = Substitution::new();
        substitution.insert(var.to_string(), value);
        self.evaluate(&substitution)
    }

    //___________________________________NUMERIC RESOLUTION____________________________________

    /// Collapses the tree into a single number.
    ///
    /// # Errors
    /// * `UnresolvedVariable` - a `Variable` leaf is reached
    /// * `Domain` - division by a denominator resolving to zero, or `ln` of a
    ///   non-positive value
    ///
    /// Children are resolved left to right and the first failure is returned.
    pub fn resolve(&self) -> Result<T, SymbolicError> {
        let result = match self {
            Expr::Number(val) => Ok(*val),
            Expr::Variable(name) => Err(SymbolicError::UnresolvedVariable { name: name.clone() }),
            Expr::Plus(lhs, rhs) => Ok(lhs.resolve()? + rhs.resolve()?),
            Expr::Minus(lhs, rhs) => Ok(lhs.resolve()? - rhs.resolve()?),
            Expr::Mult(lhs, rhs) => Ok(lhs.resolve()? * rhs.resolve()?),
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.resolve()?;
                let denominator = rhs.resolve()?;
                if denominator.is_zero() {
                    Err(SymbolicError::Domain {
                        operation: "division",
                        reason: format!("denominator {} resolves to zero", rhs),
                    })
                } else {
                    Ok(numerator / denominator)
                }
            }
            Expr::Pow(base, exp) => Ok(base.resolve()?.pow_scalar(exp.resolve()?)),
            Expr::Sin(arg) => Ok(arg.resolve()?.sin_scalar()),
            Expr::Cos(arg) => Ok(arg.resolve()?.cos_scalar()),
            Expr::Ln(arg) => {
                let value = arg.resolve()?;
                if value.in_ln_domain() {
                    Ok(value.ln_scalar())
                } else {
                    Err(SymbolicError::Domain {
                        operation: "ln",
                        reason: format!("argument {} resolves to non-positive value {}", arg, value),
                    })
                }
            }
            Expr::Exp(arg) => Ok(arg.resolve()?.exp_scalar()),
        };
        if let Err(err) = &result {
            debug!("resolve of {} failed: {}", self, err);
        }
        result
    }

    //___________________________________INSPECTION____________________________________

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(name) => name == var_name,
            Expr::Plus(lhs, rhs)
            | Expr::Minus(lhs, rhs)
            | Expr::Mult(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Sin(arg) | Expr::Cos(arg) | Expr::Ln(arg) | Expr::Exp(arg) => {
                arg.contains_variable(var_name)
            }
        }
    }

    /// Names of all free variables, sorted and deduplicated.
    pub fn extract_variables(&self) -> Vec<String> {
        fn collect<T>(expr: &Expr<T>, names: &mut BTreeSet<String>) {
            match expr {
                Expr::Number(_) => {}
                Expr::Variable(name) => {
                    names.insert(name.clone());
                }
                Expr::Plus(lhs, rhs)
                | Expr::Minus(lhs, rhs)
                | Expr::Mult(lhs, rhs)
                | Expr::Div(lhs, rhs)
                | Expr::Pow(lhs, rhs) => {
                    collect(lhs, names);
                    collect(rhs, names);
                }
                Expr::Sin(arg) | Expr::Cos(arg) | Expr::Ln(arg) | Expr::Exp(arg) => {
                    collect(arg, names)
                }
            }
        }
        let mut names = BTreeSet::new();
        collect(self, &mut names);
        names.into_iter().collect()
    }

    /// Checks if expression is exactly the constant zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Number(val) => val.is_zero(),
            _ => false,
        }
    }
}
