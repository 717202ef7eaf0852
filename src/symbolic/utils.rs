// numerical helpers used to check analytical derivatives against finite differences
use crate::symbolic::symbolic_errors::SymbolicError;

/// `num_values` equally spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + (i as f64 * step)).collect()
}

/// Central differences `(f(x+h) - f(x-h)) / 2h` at every point of `x_values`.
/// Stops at the first point where `f` fails.
pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Result<Vec<f64>, SymbolicError>
where
    F: Fn(f64) -> Result<f64, SymbolicError>,
{
    let mut derivatives = Vec::with_capacity(x_values.len());
    for &x in x_values {
        let f_x_plus_h = f(x + h)?;
        let f_x_minus_h = f(x - h)?;
        derivatives.push((f_x_plus_h - f_x_minus_h) / (2.0 * h));
    }
    Ok(derivatives)
}

/// Root of the summed squared differences, scaled by the number of points.
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }
    (1.0 / x.len() as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}
