//! Session serialization for the fitted model

use crate::error::Result;
use crate::models::FittedOls;
use serde::{Deserialize, Serialize};

/// Everything the prediction side needs from a fit, serializable into a
/// session as one opaque blob: the fitted model plus the response name
/// and trained feature order it was built with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBlob {
    /// The fitted regression model.
    pub model: FittedOls,
    /// Name of the response variable.
    pub response: String,
    /// Trained column order, intercept first.
    pub trained_features: Vec<String>,
}

impl ModelBlob {
    /// Package a fitted model with its metadata.
    pub fn new(model: FittedOls) -> Self {
        let response = model.response().to_string();
        let trained_features = model.columns().to_vec();

        Self {
            model,
            response,
            trained_features,
        }
    }

    /// Serialize into an opaque string for session storage.
    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reconstruct a blob written by [`ModelBlob::to_blob`].
    pub fn from_blob(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }
}
