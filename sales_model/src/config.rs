//! Variable specification for the sales regression model

use crate::error::{Result, SalesError};
use serde::{Deserialize, Serialize};

/// A categorical variable coded directly as a number through a fixed
/// two-level dictionary. The level coded 0 acts as the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryVar {
    name: String,
    levels: Vec<(String, f64)>,
}

impl BinaryVar {
    /// Create a new binary variable from its level dictionary.
    pub fn new(name: impl Into<String>, levels: Vec<(String, f64)>) -> Result<Self> {
        if levels.len() != 2 {
            return Err(SalesError::ConfigError(
                "a binary variable needs exactly two levels".to_string(),
            ));
        }

        Ok(Self {
            name: name.into(),
            levels,
        })
    }

    /// Name of the variable (also its design-matrix column name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selectable levels, in dictionary order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(level, _)| level.as_str())
    }

    /// Numeric code for a level, or `None` when the level is unknown.
    pub fn code(&self, level: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|(l, _)| l == level)
            .map(|(_, code)| *code)
    }
}

/// A multi-level categorical variable, one-hot encoded with the reference
/// level omitted as the implicit baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalVar {
    name: String,
    levels: Vec<String>,
    reference: String,
}

impl CategoricalVar {
    /// Create a new categorical variable with its designated reference level.
    pub fn new(
        name: impl Into<String>,
        levels: Vec<String>,
        reference: impl Into<String>,
    ) -> Result<Self> {
        let reference = reference.into();
        if !levels.contains(&reference) {
            return Err(SalesError::ConfigError(format!(
                "reference level '{}' is not among the declared levels",
                reference
            )));
        }

        Ok(Self {
            name: name.into(),
            levels,
            reference,
        })
    }

    /// Name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared levels, in encoding order.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// The omitted baseline level.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Design-matrix column name for one level's dummy.
    pub fn dummy_column(&self, level: &str) -> String {
        format!("{}_{}", self.name, level)
    }
}

/// Complete variable specification: one numeric covariate, the binary
/// variables with their fixed dictionaries, and the one-hot encoded
/// categorical variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    numeric_var: String,
    binary_vars: Vec<BinaryVar>,
    categorical_vars: Vec<CategoricalVar>,
}

impl ModelSpec {
    /// Create a specification from its parts.
    pub fn new(
        numeric_var: impl Into<String>,
        binary_vars: Vec<BinaryVar>,
        categorical_vars: Vec<CategoricalVar>,
    ) -> Self {
        Self {
            numeric_var: numeric_var.into(),
            binary_vars,
            categorical_vars,
        }
    }

    /// The specification for the shipped bakery sales dataset.
    ///
    /// `Period` and `Size` carry fixed 0/1 dictionaries (the 0 level is
    /// the baseline); `Product` is one-hot encoded against the
    /// `other_cookies` reference.
    pub fn bakery() -> Self {
        Self {
            numeric_var: "Year".to_string(),
            binary_vars: vec![
                BinaryVar {
                    name: "Period".to_string(),
                    levels: vec![
                        ("eid_fitri".to_string(), 1.0),
                        ("eid_adha".to_string(), 0.0),
                    ],
                },
                BinaryVar {
                    name: "Size".to_string(),
                    levels: vec![("medium".to_string(), 1.0), ("other".to_string(), 0.0)],
                },
            ],
            categorical_vars: vec![CategoricalVar {
                name: "Product".to_string(),
                levels: vec![
                    "beng_beng".to_string(),
                    "other_cookies".to_string(),
                    "cat_tongue".to_string(),
                    "nastar".to_string(),
                    "snow_white_vanilla".to_string(),
                    "rambutan".to_string(),
                    "sagu_cheese".to_string(),
                    "milk_semprit".to_string(),
                ],
                reference: "other_cookies".to_string(),
            }],
        }
    }

    /// Name of the numeric covariate.
    pub fn numeric_var(&self) -> &str {
        &self.numeric_var
    }

    /// The binary-coded variables.
    pub fn binary_vars(&self) -> &[BinaryVar] {
        &self.binary_vars
    }

    /// The one-hot encoded variables.
    pub fn categorical_vars(&self) -> &[CategoricalVar] {
        &self.categorical_vars
    }

    /// Variable name with its selectable levels, in form-rendering order:
    /// binary variables first, then the one-hot encoded ones.
    pub fn form_variables(&self) -> Vec<(&str, Vec<&str>)> {
        let mut variables = Vec::with_capacity(self.binary_vars.len() + self.categorical_vars.len());
        for var in &self.binary_vars {
            variables.push((var.name(), var.levels().collect()));
        }
        for var in &self.categorical_vars {
            variables.push((var.name(), var.levels().iter().map(String::as_str).collect()));
        }
        variables
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::bakery()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_var_rejects_wrong_level_count() {
        let result = BinaryVar::new("Period", vec![("only_one".to_string(), 1.0)]);
        assert!(matches!(result, Err(SalesError::ConfigError(_))));
    }

    #[test]
    fn categorical_var_rejects_foreign_reference() {
        let result = CategoricalVar::new(
            "Product",
            vec!["nastar".to_string(), "rambutan".to_string()],
            "croissant",
        );
        assert!(matches!(result, Err(SalesError::ConfigError(_))));
    }

    #[test]
    fn bakery_spec_codes_binary_levels() {
        let spec = ModelSpec::bakery();
        let period = &spec.binary_vars()[0];

        assert_eq!(period.code("eid_fitri"), Some(1.0));
        assert_eq!(period.code("eid_adha"), Some(0.0));
        assert_eq!(period.code("ramadan"), None);
    }

    #[test]
    fn form_variables_follow_declaration_order() {
        let spec = ModelSpec::bakery();
        let names: Vec<&str> = spec.form_variables().iter().map(|(name, _)| *name).collect();

        assert_eq!(names, vec!["Period", "Size", "Product"]);
    }
}
