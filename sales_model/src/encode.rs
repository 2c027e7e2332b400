//! Design-matrix construction from the cleaned observation table

use crate::config::ModelSpec;
use crate::data::SalesTable;
use crate::error::{Result, SalesError};
use nalgebra::{DMatrix, DVector};

/// Column name of the intercept term.
pub const INTERCEPT: &str = "const";

/// Numeric design matrix with its response vector and fixed column order.
///
/// The column order is the contract the prediction side must reproduce
/// exactly; it never changes once the matrix is built.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    response: String,
    columns: Vec<String>,
    x: DMatrix<f64>,
    y: DVector<f64>,
}

impl DesignMatrix {
    /// Name of the response variable.
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Covariate column names, intercept first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The covariate matrix, rows aligned with `y`.
    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// The response vector.
    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    /// Number of observations.
    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }
}

/// Encode the cleaned table into a numeric design matrix.
///
/// Binary variables are mapped through their fixed dictionaries; rows
/// with unmapped levels are dropped rather than failing the build. The
/// multi-level variables are one-hot encoded with the reference column
/// omitted. Constant columns are removed before the intercept is added,
/// since they would make the normal equations singular.
pub fn build_design_matrix(
    table: &SalesTable,
    spec: &ModelSpec,
    response: &str,
) -> Result<DesignMatrix> {
    let n = table.len();
    let y_all = table.column_as_f64(response)?;
    let numeric_all = table.column_as_f64(spec.numeric_var())?;

    let mut binary_raw = Vec::with_capacity(spec.binary_vars().len());
    for var in spec.binary_vars() {
        binary_raw.push(table.column_as_str(var.name())?);
    }
    let mut categorical_raw = Vec::with_capacity(spec.categorical_vars().len());
    for var in spec.categorical_vars() {
        categorical_raw.push(table.column_as_str(var.name())?);
    }

    // Rows with unmapped binary levels or undeclared categorical levels
    // are dropped, not fatal.
    let mut keep = Vec::with_capacity(n);
    let mut binary_coded: Vec<Vec<f64>> = vec![Vec::new(); spec.binary_vars().len()];
    'rows: for i in 0..n {
        let mut codes = Vec::with_capacity(spec.binary_vars().len());
        for (j, var) in spec.binary_vars().iter().enumerate() {
            match var.code(&binary_raw[j][i]) {
                Some(code) => codes.push(code),
                None => continue 'rows,
            }
        }
        for (j, var) in spec.categorical_vars().iter().enumerate() {
            if !var.levels().contains(&categorical_raw[j][i]) {
                continue 'rows;
            }
        }

        keep.push(i);
        for (j, code) in codes.into_iter().enumerate() {
            binary_coded[j].push(code);
        }
    }

    if keep.is_empty() {
        return Err(SalesError::DataError(
            "no observations remain after cleaning".to_string(),
        ));
    }

    // Covariate columns in their fixed order: numeric variable, binary
    // codes, then one dummy per non-reference level.
    let mut names: Vec<String> = vec![spec.numeric_var().to_string()];
    let mut columns: Vec<Vec<f64>> = vec![keep.iter().map(|&i| numeric_all[i]).collect()];

    for (j, var) in spec.binary_vars().iter().enumerate() {
        names.push(var.name().to_string());
        columns.push(std::mem::take(&mut binary_coded[j]));
    }

    for (j, var) in spec.categorical_vars().iter().enumerate() {
        for level in var.levels() {
            if level == var.reference() {
                continue;
            }
            names.push(var.dummy_column(level));
            columns.push(
                keep.iter()
                    .map(|&i| if categorical_raw[j][i] == *level { 1.0 } else { 0.0 })
                    .collect(),
            );
        }
    }

    // Drop constant columns before fitting.
    let mut kept_names = Vec::with_capacity(names.len());
    let mut kept_columns = Vec::with_capacity(columns.len());
    for (name, values) in names.into_iter().zip(columns.into_iter()) {
        let varies = values.iter().any(|v| (v - values[0]).abs() > f64::EPSILON);
        if varies {
            kept_names.push(name);
            kept_columns.push(values);
        }
    }

    if kept_columns.is_empty() {
        return Err(SalesError::ConfigError(
            "no independent variables remain after encoding".to_string(),
        ));
    }

    // The intercept goes in front only now, after the variance filter.
    let mut ordered = Vec::with_capacity(kept_names.len() + 1);
    ordered.push(INTERCEPT.to_string());
    ordered.extend(kept_names);

    let nrows = keep.len();
    let ncols = ordered.len();
    let mut buffer = Vec::with_capacity(nrows * ncols);
    for r in 0..nrows {
        buffer.push(1.0);
        for column in &kept_columns {
            buffer.push(column[r]);
        }
    }

    let x = DMatrix::from_row_slice(nrows, ncols, &buffer);
    let y = DVector::from_vec(keep.iter().map(|&i| y_all[i]).collect());

    Ok(DesignMatrix {
        response: response.to_string(),
        columns: ordered,
        x,
        y,
    })
}
