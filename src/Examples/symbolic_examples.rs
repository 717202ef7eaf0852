// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::symbolic::expression::Expression;
use crate::symbolic::lexer::tokenize;
use crate::symbolic::symbolic_errors::SymbolicError;
use log::info;

/// Runs one of the walkthroughs of the symbolic engine, printing what it does.
pub fn sym_examples(example: usize) -> Result<(), SymbolicError> {
    match example {
        0 => {
            // FUNCTION OF MULTIPLE VARIABLES
            //parse expression from string to symbolic expression
            let input = "x + 5 * y";
            let parsed_expression: Expression<f64> = Expression::parse(input)?;
            println!(" parsed_expression {}", parsed_expression);
            let variables = parsed_expression.variables();
            println!("variables {:?}", variables);
            // substitution only replaces variables, nothing is computed
            let partially = parsed_expression.evaluate_vars(&["x"], &[10.0])?;
            println!("x = 10: {}", partially);
            let value = parsed_expression.eval_and_resolve(&[("x", 10.0), ("y", 2.0)])?;
            println!("x = 10, y = 2: {}", value);
            // differentiate with respect to x and y
            let df_dx = parsed_expression.diff("x");
            let df_dy = parsed_expression.diff("y");
            println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
            let vector_of_derivatives = parsed_expression.diff_multi();
            println!(
                "vector_of_derivatives = {:?}, {}",
                vector_of_derivatives
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>(),
                vector_of_derivatives.len()
            );
        }
        1 => {
            //  FUNTION OF 1 VARIABLE
            let input = "ln(x)";
            let f: Expression<f64> = Expression::parse(input)?;
            let df_dx = f.diff("x");
            println!("d/dx {} = {}", f, df_dx);
            let fn_of_x = df_dx.lambdify1D("x");
            println!("at x = 4: {}", fn_of_x(4.0)?);
            // compare numerical and analtical derivatives on a linspace
            let (norm, ok) = f.compare_num1D("x", 1.0, 10.0, 100, 1e-6)?;
            println!("norm = {}, derivative is valid: {}", norm, ok);
            let second = f.n_th_derivative("x", 2);
            println!("second derivative {}", second);
        }
        2 => {
            // BUILD EXPRESSIONS WITH OPERATORS
            let vars = Expression::<f64>::symbols("x, y");
            let (x, y) = (&vars[0], &vars[1]);
            let f = (x * y) + x.sin() / (y.clone() ^ Expression::from(2.0));
            println!("f = {}", f);
            // the string form parses back to the same tree
            let reparsed: Expression<f64> = f.to_string().parse()?;
            println!("reparsed {}, same tree: {}", reparsed, reparsed == f);
            let df_dy = f.diff("y");
            println!("df_dy = {}", df_dy);
            println!(
                "df_dy at x = 1, y = 2: {}",
                df_dy.eval_and_resolve(&[("x", 1.0), ("y", 2.0)])?
            );
        }
        3 => {
            // LEXER AND ERRORS
            let input = "sin(x) * -2.5 ^ y";
            for token in tokenize(input)? {
                println!("{:>12} {:?} at {}", token.kind, token.lexeme, token.position);
            }
            for bad in ["1 + * 2", "x & y", "(x + 1", "2i * x"] {
                match Expression::<f64>::parse(bad) {
                    Ok(e) => println!("{} parsed as {}", bad, e),
                    Err(err) => println!("{} -> {}", bad, err),
                }
            }
            let e: Expression<f64> = Expression::parse("1 / (x - 2) + ln(x)")?;
            if let Err(err) = e.eval_and_resolve(&[("x", 2.0)]) {
                println!("resolve failed: {}", err);
            }
        }
        _ => {
            info!("no example with number {}", example);
            println!("examples are numbered 0 to 3");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_examples_run() {
        for example in 0..5 {
            sym_examples(example).unwrap();
        }
    }
}
