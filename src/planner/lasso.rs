use crate::models::{Metric, NUTRIENT_COUNT, UndefinedReason};
use crate::planner::constants::{LASSO_ALPHA, LASSO_MAX_ITERATIONS, LASSO_TOLERANCE};

/// One design-matrix column: an item's densities in `Nutrient::ALL` order.
pub type Column = [f64; NUTRIENT_COUNT];

/// Result of a single constrained fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Non-negative weight per column.
    pub coefficients: Vec<f64>,
    /// Constant term; zero unless intercept fitting is enabled.
    pub intercept: f64,
    /// In-sample coefficient of determination.
    pub score: Metric,
    /// Coordinate descent sweeps performed.
    pub iterations: usize,
    pub converged: bool,
}

/// Non-negative Lasso regression solved by cyclic coordinate descent.
///
/// Minimizes `||Xw - y||² / (2·m) + alpha·Σ|w|` subject to `w ≥ 0`, where
/// `m` is the number of observations (nutrients).
#[derive(Debug, Clone)]
pub struct LassoFitter {
    pub alpha: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub fit_intercept: bool,
}

impl Default for LassoFitter {
    fn default() -> Self {
        Self {
            alpha: LASSO_ALPHA,
            max_iterations: LASSO_MAX_ITERATIONS,
            tolerance: LASSO_TOLERANCE,
            fit_intercept: false,
        }
    }
}

fn dot(a: &Column, b: &Column) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn mean(values: &Column) -> f64 {
    values.iter().sum::<f64>() / NUTRIENT_COUNT as f64
}

/// Coefficient of determination of `predicted` against `observed`.
pub fn r_squared(observed: &Column, predicted: &Column) -> Metric {
    let observed_mean = mean(observed);
    let ss_tot: f64 = observed.iter().map(|y| (y - observed_mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Metric::Undefined(UndefinedReason::ZeroVariance);
    }
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    Metric::Value(1.0 - ss_res / ss_tot)
}

impl LassoFitter {
    /// Fit `target ≈ Σ coefficients[j] · columns[j] (+ intercept)`.
    pub fn fit(&self, columns: &[Column], target: &Column) -> FitOutcome {
        let m = NUTRIENT_COUNT as f64;

        // Centering folds the intercept out of the penalized problem
        let (x_means, y_mean) = if self.fit_intercept {
            (columns.iter().map(mean).collect::<Vec<_>>(), mean(target))
        } else {
            (vec![0.0; columns.len()], 0.0)
        };
        let design: Vec<Column> = columns
            .iter()
            .zip(&x_means)
            .map(|(col, mu)| col.map(|v| v - mu))
            .collect();
        let response: Column = target.map(|v| v - y_mean);
        let norms: Vec<f64> = design.iter().map(|col| dot(col, col)).collect();

        let mut weights = vec![0.0; design.len()];
        let mut residual = response;
        let threshold = self.alpha * m;

        let mut iterations = 0;
        let mut converged = design.is_empty();

        while !converged && iterations < self.max_iterations {
            iterations += 1;
            let mut max_delta: f64 = 0.0;

            for (j, col) in design.iter().enumerate() {
                if norms[j] == 0.0 {
                    continue;
                }
                let old = weights[j];
                // Correlation with the residual that excludes column j
                let rho = dot(col, &residual) + norms[j] * old;
                let new = ((rho - threshold) / norms[j]).max(0.0);
                if new != old {
                    let delta = new - old;
                    for (r, x) in residual.iter_mut().zip(col) {
                        *r -= delta * x;
                    }
                    weights[j] = new;
                    max_delta = max_delta.max(delta.abs());
                }
            }

            converged = max_delta <= self.tolerance;
        }

        let coefficients: Vec<f64> = weights
            .into_iter()
            .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 })
            .collect();

        let intercept = if self.fit_intercept {
            y_mean
                - coefficients
                    .iter()
                    .zip(&x_means)
                    .map(|(w, mu)| w * mu)
                    .sum::<f64>()
        } else {
            0.0
        };

        let predicted = predict(columns, &coefficients, intercept);

        FitOutcome {
            score: r_squared(target, &predicted),
            coefficients,
            intercept,
            iterations,
            converged,
        }
    }
}

/// Evaluate the linear model on uncentered columns.
pub fn predict(columns: &[Column], coefficients: &[f64], intercept: f64) -> Column {
    let mut predicted = [intercept; NUTRIENT_COUNT];
    for (col, w) in columns.iter().zip(coefficients) {
        for (p, x) in predicted.iter_mut().zip(col) {
            *p += w * x;
        }
    }
    predicted
}
