//! Ordinary least squares regression

use crate::encode::DesignMatrix;
use crate::error::{Result, SalesError};
use crate::models::FitSummary;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Ordinary least squares fitter. Closed form, no regularization, no
/// weighting.
#[derive(Debug, Clone, Default)]
pub struct OlsRegression;

impl OlsRegression {
    /// Create a new OLS fitter.
    pub fn new() -> Self {
        Self
    }

    /// Fit the response against the design matrix.
    pub fn fit(&self, design: &DesignMatrix) -> Result<FittedOls> {
        let n = design.nrows();
        let p = design.columns().len();
        if n <= p {
            return Err(SalesError::FittingError(format!(
                "{} observations are not enough to fit {} coefficients",
                n, p
            )));
        }

        // Normal equations: XᵀX is square, so the QR solve applies.
        let gram = design.x().transpose() * design.x();
        let moment = design.x().transpose() * design.y();
        let coefficients = gram.qr().solve(&moment).ok_or_else(|| {
            SalesError::FittingError("design matrix is singular".to_string())
        })?;

        let fitted = design.x() * &coefficients;
        let residuals = design.y() - &fitted;
        let ss_res: f64 = residuals.iter().map(|r| r * r).sum();

        let mean_y = design.y().iter().sum::<f64>() / n as f64;
        let ss_tot: f64 = design.y().iter().map(|v| (v - mean_y).powi(2)).sum();
        if ss_tot <= 0.0 {
            return Err(SalesError::FittingError(
                "response variable has zero variance".to_string(),
            ));
        }

        let r_squared = 1.0 - ss_res / ss_tot;
        let k = (p - 1) as f64; // predictors excluding the intercept
        let df_resid = n as f64 - k - 1.0;
        let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / df_resid;
        let f_statistic = if ss_res > 0.0 {
            (r_squared / k) / ((1.0 - r_squared) / df_resid)
        } else {
            f64::INFINITY
        };

        Ok(FittedOls {
            response: design.response().to_string(),
            columns: design.columns().to_vec(),
            coefficients: coefficients.iter().copied().collect(),
            summary: FitSummary {
                r_squared,
                adj_r_squared,
                f_statistic,
                f_pvalue: f_pvalue(f_statistic, k, df_resid),
                n_obs: n,
            },
        })
    }
}

/// Upper-tail probability of the F-statistic.
fn f_pvalue(f: f64, df_model: f64, df_resid: f64) -> f64 {
    if !f.is_finite() {
        return 0.0;
    }
    match FisherSnedecor::new(df_model, df_resid) {
        Ok(dist) => 1.0 - dist.cdf(f),
        Err(_) => f64::NAN,
    }
}

/// A fitted OLS model, serializable into a web session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedOls {
    response: String,
    columns: Vec<String>,
    coefficients: Vec<f64>,
    summary: FitSummary,
}

impl FittedOls {
    /// Name of the response variable.
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Trained column order, intercept first. Prediction input must be
    /// reindexed into exactly this order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Coefficients paired with their column names, in trained order.
    pub fn coefficients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.coefficients.iter().copied())
    }

    /// Coefficient for one column, if trained.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.coefficients[i])
    }

    /// Fit statistics.
    pub fn summary(&self) -> &FitSummary {
        &self.summary
    }

    /// Number of independent variables, excluding the intercept.
    pub fn n_independent(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Linear predictor over a row already in trained column order.
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(SalesError::ValidationError(format!(
                "feature vector has {} values but the model was trained on {} columns",
                row.len(),
                self.coefficients.len()
            )));
        }

        Ok(self
            .coefficients
            .iter()
            .zip(row.iter())
            .map(|(c, v)| c * v)
            .sum())
    }
}
