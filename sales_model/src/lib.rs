//! # Sales Model
//!
//! A Rust library for fitting an ordinary-least-squares sales regression
//! on a static CSV dataset and serving predictions from it.
//!
//! ## Features
//!
//! - Tabular data loading with numeric coercion and row cleaning
//! - Categorical encoding (fixed 0/1 dictionaries plus one-hot dummies
//!   with a reference baseline)
//! - Closed-form OLS fitting with R², adjusted R² and F-test statistics
//! - Session-serializable fitted models
//! - Prediction assembly from raw form input, reindexed into the trained
//!   column order
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_model::config::ModelSpec;
//! use sales_model::pipeline::build_model;
//! use sales_model::predict::predict_from_form;
//! use std::collections::HashMap;
//!
//! # fn main() -> sales_model::error::Result<()> {
//! // Fit the model once from the static dataset
//! let spec = ModelSpec::bakery();
//! let blob = build_model("data/sales.csv", &spec)?;
//!
//! // Assemble a prediction from form input
//! let mut form = HashMap::new();
//! form.insert("Year".to_string(), "2025".to_string());
//! form.insert("Period".to_string(), "eid_fitri".to_string());
//! form.insert("Size".to_string(), "medium".to_string());
//! form.insert("Product".to_string(), "nastar".to_string());
//!
//! let (prediction, _inputs) = predict_from_form(&blob.model, &spec, &form)?;
//! println!("predicted sales: {:.4}", prediction);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod encode;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod predict;

// Re-export commonly used types
pub use crate::cache::ModelBlob;
pub use crate::config::ModelSpec;
pub use crate::data::{DataLoader, SalesTable};
pub use crate::encode::{build_design_matrix, DesignMatrix};
pub use crate::error::SalesError;
pub use crate::models::{FitSummary, FittedOls, OlsRegression};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
