use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockError};
use crate::models::NUTRIENT_COUNT;
use crate::planner::constants::{
    LASSO_ALPHA, LASSO_MAX_ITERATIONS, LASSO_TOLERANCE, MIN_PRESENT_NUTRIENTS, PROGRESS_INTERVAL,
};
use crate::planner::lasso::LassoFitter;

/// Tunable meal search settings.
///
/// Every field is optional in a JSON config file; missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// L1 penalty strength.
    pub alpha: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Fit a free constant term alongside the item weights.
    pub fit_intercept: bool,
    /// Items with fewer known densities stay out of the search.
    pub min_present_nutrients: usize,
    /// Leave items flagged as consumed out of the search.
    pub skip_consumed: bool,
    /// Candidates between progress reports; 0 disables reporting.
    pub progress_interval: u64,
    /// Evaluate candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha: LASSO_ALPHA,
            max_iterations: LASSO_MAX_ITERATIONS,
            tolerance: LASSO_TOLERANCE,
            fit_intercept: false,
            min_present_nutrients: MIN_PRESENT_NUTRIENTS,
            skip_consumed: true,
            progress_interval: PROGRESS_INTERVAL,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(StockError::InvalidInput(format!(
                "alpha must be a non-negative number, got {}",
                self.alpha
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(StockError::InvalidInput(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(StockError::InvalidInput(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.min_present_nutrients > NUTRIENT_COUNT {
            return Err(StockError::InvalidInput(format!(
                "min_present_nutrients cannot exceed {}, got {}",
                NUTRIENT_COUNT, self.min_present_nutrients
            )));
        }
        Ok(())
    }

    /// Fitter configured from these settings.
    pub fn fitter(&self) -> LassoFitter {
        LassoFitter {
            alpha: self.alpha,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            fit_intercept: self.fit_intercept,
        }
    }
}
