#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trained price model interface.
//!
//! The dashboard treats the model as an opaque, deterministic function
//! from [`FeatureRecord`] rows to prices. [`PriceModel`] is that seam;
//! [`pipeline::LinearPipelineModel`] is the serialized artifact format
//! produced by the training notebooks.

pub mod pipeline;

use house_price_housing_models::FeatureRecord;
use thiserror::Error;

pub use pipeline::LinearPipelineModel;

/// Errors that can occur while loading or invoking a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not match the artifact format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact's inputs do not match the feature record schema.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// The artifact contains unusable parameters.
    #[error("Invalid model artifact: {message}")]
    InvalidArtifact {
        /// Description of what went wrong.
        message: String,
    },
}

/// A trained model that predicts a median house value per feature row.
pub trait PriceModel: Send + Sync {
    /// Human-readable model name, for logs.
    fn name(&self) -> &str;

    /// Predicts one value per input row, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the model cannot evaluate the rows.
    fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError>;
}
