#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a sequence of tokens
///
///# Example
/// ```
/// use RustedExpr::symbolic::lexer::{tokenize, TokenKind};
/// let tokens = tokenize("sin(x) * -2.5").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Sin, TokenKind::LeftParen, TokenKind::Variable,
///     TokenKind::RightParen, TokenKind::Mult, TokenKind::Number, TokenKind::Eof]);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod lexer;
/// a module turns a sequence of tokens into a symbolic expression
///
///# Example
/// ```
/// use RustedExpr::symbolic::parse_expr::parse_expression_func;
/// let parsed_expression = parse_expression_func::<f64>("x * 5 + 3.5").unwrap();
/// assert_eq!(parsed_expression.to_string(), "((x * 5) + 3.5)");
/// ```
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree: numbers, variables, + - * / ^, sin, cos, ln, exp
/// 2) substitutes variables and resolves trees into numbers
/// 3) differentiates trees analytically
/// 4) turns a tree into its canonical string form
///# Example#
/// ```
/// use RustedExpr::symbolic::expression::Expression;
/// let parsed_expression: Expression<f64> = Expression::parse("x + 5 * y").unwrap();
/// // substitution only, nothing is computed
/// let partially = parsed_expression.eval_and_resolve(&[("x", 10.0)]);
/// assert!(partially.is_err());
/// let value = parsed_expression.eval_and_resolve(&[("x", 10.0), ("y", 2.0)]).unwrap();
/// assert_eq!(value, 20.0);
/// // differentiate with respect to y, the result is not simplified
/// let df_dy = parsed_expression.diff("y");
/// assert_eq!(df_dy.to_string(), "(0 + ((0 * y) + (5 * 1)))");
/// ```
/// Example2#
/// ```
/// use RustedExpr::symbolic::expression::Expression;
///   let f: Expression<f64> = Expression::parse("x + exp(x)").unwrap();
///   let start = 0.0;
///   let end = 10f64;
///   let num_values = 100;
///   let max_norm = 1e-6;
///   // compare numerical and analtical derivatives for a given linspace defined by start, end values and number of values.
///   // a norm of the difference between the two of them is returned, and the answer is true if the norm is below max_norm
///   let (norm, res) = f.compare_num1D("x", start, end, num_values, max_norm).unwrap();
///   assert!(res, "norm = {}", norm);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// facade type wrapping the root of a tree, with operator overloading
pub mod expression;
pub mod symbolic_errors;
/// numeric capability the trees are generic over
pub mod symbolic_traits;
///______________________________________________________________________________________________________________________________________________
/// the collection of numerical utility functions used to validate derivatives
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
