//! examples of usage of RustedExpr
/// Symbolic operations examples
pub mod symbolic_examples;
