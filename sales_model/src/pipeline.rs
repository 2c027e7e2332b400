//! End-to-end model construction pipeline

use crate::cache::ModelBlob;
use crate::config::ModelSpec;
use crate::data::DataLoader;
use crate::encode::build_design_matrix;
use crate::error::Result;
use crate::models::OlsRegression;
use std::path::Path;

/// Run loader → encoder → fitter on a static dataset and package the
/// result for session caching.
///
/// The first column of the file is the response variable; it and the
/// numeric covariate are coerced to floats, with unparseable rows
/// dropped, before encoding.
pub fn build_model<P: AsRef<Path>>(path: P, spec: &ModelSpec) -> Result<ModelBlob> {
    let table = DataLoader::from_csv(path)?;
    let response = table.response_name()?;
    let clean = table.coerce_numeric(&[response.as_str(), spec.numeric_var()])?;
    let design = build_design_matrix(&clean, spec, &response)?;
    let model = OlsRegression::new().fit(&design)?;

    Ok(ModelBlob::new(model))
}
