//! Tabular data loading and cleaning

use crate::error::{Result, SalesError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// An in-memory observation table backing the regression pipeline.
///
/// Header names are normalized on construction: trimmed, with interior
/// spaces replaced by underscores.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
}

/// Loader for delimited tabular files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a table from a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesTable> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        SalesTable::from_dataframe(df)
    }
}

impl SalesTable {
    /// Wrap an existing DataFrame, normalizing its column names.
    pub fn from_dataframe(mut df: DataFrame) -> Result<Self> {
        let normalized: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().replace(' ', "_"))
            .collect();
        df.set_column_names(&normalized)?;

        Ok(Self { df })
    }

    /// The response variable is the first column by convention.
    pub fn response_name(&self) -> Result<String> {
        self.df
            .get_column_names()
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| SalesError::DataError("table has no columns".to_string()))
    }

    /// Coerce the named columns to floats (unparseable cells become
    /// missing) and drop every row still carrying a missing value.
    pub fn coerce_numeric(&self, columns: &[&str]) -> Result<Self> {
        let mut df = self.df.clone();
        for name in columns {
            if df.get_column_names().contains(name) {
                let casted = df.column(name)?.cast(&DataType::Float64)?;
                df.replace(name, casted)?;
            }
        }

        // Keep only rows with no missing value in any column.
        let mut mask: Option<BooleanChunked> = None;
        for col in df.get_columns() {
            let not_null = col.is_not_null();
            mask = Some(match mask {
                Some(m) => m & not_null,
                None => not_null,
            });
        }
        let df = match mask {
            Some(m) => df.filter(&m)?,
            None => df,
        };

        Ok(Self { df })
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Read a column as f64 values. Every cell must be present and numeric.
    pub fn column_as_f64(&self, name: &str) -> Result<Vec<f64>> {
        let col = self
            .df
            .column(name)
            .map_err(|_| SalesError::DataError(format!("column '{}' not found", name)))?;
        let casted = col.cast(&DataType::Float64).map_err(|_| {
            SalesError::DataError(format!("column '{}' cannot be read as numeric", name))
        })?;
        let ca = casted.f64()?;

        let mut values = Vec::with_capacity(ca.len());
        for value in ca.into_iter() {
            match value {
                Some(v) => values.push(v),
                None => {
                    return Err(SalesError::DataError(format!(
                        "column '{}' contains a non-numeric or missing value",
                        name
                    )))
                }
            }
        }

        Ok(values)
    }

    /// Read a column as strings. Every cell must be present.
    pub fn column_as_str(&self, name: &str) -> Result<Vec<String>> {
        let col = self
            .df
            .column(name)
            .map_err(|_| SalesError::DataError(format!("column '{}' not found", name)))?;
        let ca = col
            .utf8()
            .map_err(|_| SalesError::DataError(format!("column '{}' is not a text column", name)))?;

        let mut values = Vec::with_capacity(ca.len());
        for value in ca.into_iter() {
            match value {
                Some(v) => values.push(v.to_string()),
                None => {
                    return Err(SalesError::DataError(format!(
                        "column '{}' contains a missing value",
                        name
                    )))
                }
            }
        }

        Ok(values)
    }

    /// Headers plus stringified cells, for rendering the table verbatim.
    pub fn to_rows(&self) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let headers = self.column_names();

        let mut rows = Vec::with_capacity(self.df.height());
        for i in 0..self.df.height() {
            let row = self
                .df
                .get(i)
                .ok_or_else(|| SalesError::DataError(format!("row {} out of bounds", i)))?;
            rows.push(row.into_iter().map(render_cell).collect());
        }

        Ok((headers, rows))
    }
}

fn render_cell(value: AnyValue) -> String {
    match value {
        AnyValue::Utf8(v) => v.to_string(),
        AnyValue::Utf8Owned(v) => v.to_string(),
        AnyValue::Null => String::new(),
        other => other.to_string(),
    }
}
