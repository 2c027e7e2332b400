//! Regression models fitted on the encoded design matrix

use serde::{Deserialize, Serialize};

pub mod ols;

pub use ols::{FittedOls, OlsRegression};

/// Goodness-of-fit statistics for a fitted regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    /// Coefficient of determination.
    pub r_squared: f64,
    /// R² adjusted for the number of predictors.
    pub adj_r_squared: f64,
    /// Overall F-statistic of the regression.
    pub f_statistic: f64,
    /// Probability of the F-statistic under the null model.
    pub f_pvalue: f64,
    /// Number of observations used in the fit.
    pub n_obs: usize,
}
