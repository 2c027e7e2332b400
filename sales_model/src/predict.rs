//! Prediction assembly from raw form input

use crate::config::ModelSpec;
use crate::encode::INTERCEPT;
use crate::error::{Result, SalesError};
use crate::models::FittedOls;
use std::collections::HashMap;

/// Echoed form selections for rendering alongside a prediction.
pub type PredictionInputs = Vec<(String, String)>;

/// Build the single-row feature vector for the trained column order and
/// evaluate the linear predictor.
///
/// The intercept is 1; the numeric variable must parse as a float; the
/// binary variables go through their fixed dictionaries; a dummy column
/// is set to 1 only for a non-reference matching selection. Unknown
/// selections fail with a validation error, never silently default. Any
/// trained column left untouched stays 0, and the assembled vector is
/// reindexed into exactly the trained column order before the dot
/// product — a mismatched order would silently produce wrong predictions.
pub fn predict_from_form(
    model: &FittedOls,
    spec: &ModelSpec,
    form: &HashMap<String, String>,
) -> Result<(f64, PredictionInputs)> {
    let mut features: HashMap<String, f64> = HashMap::new();
    features.insert(INTERCEPT.to_string(), 1.0);

    let raw_numeric = form
        .get(spec.numeric_var())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SalesError::ValidationError(format!("input '{}' is required", spec.numeric_var()))
        })?;
    let numeric: f64 = raw_numeric.parse().map_err(|_| {
        SalesError::ValidationError(format!(
            "input '{}' must be numeric",
            spec.numeric_var()
        ))
    })?;
    features.insert(spec.numeric_var().to_string(), numeric);

    for var in spec.binary_vars() {
        let selected = form.get(var.name()).map(String::as_str).unwrap_or("");
        let code = var.code(selected).ok_or_else(|| {
            SalesError::ValidationError(format!("input '{}' is not valid", var.name()))
        })?;
        features.insert(var.name().to_string(), code);
    }

    // A reference-level selection leaves its dummy block all zero.
    for var in spec.categorical_vars() {
        let selected = form.get(var.name()).map(String::as_str).unwrap_or("");
        if !var.levels().iter().any(|level| level == selected) {
            return Err(SalesError::ValidationError(format!(
                "input '{}' is not valid",
                var.name()
            )));
        }
        if selected != var.reference() {
            let column = var.dummy_column(selected);
            if model.columns().contains(&column) {
                features.insert(column, 1.0);
            }
        }
    }

    let row: Vec<f64> = model
        .columns()
        .iter()
        .map(|column| features.get(column).copied().unwrap_or(0.0))
        .collect();
    let prediction = model.predict(&row)?;

    let mut inputs: PredictionInputs =
        vec![(spec.numeric_var().to_string(), raw_numeric.to_string())];
    for (name, _) in spec.form_variables() {
        inputs.push((name.to_string(), form.get(name).cloned().unwrap_or_default()));
    }

    Ok((prediction, inputs))
}
