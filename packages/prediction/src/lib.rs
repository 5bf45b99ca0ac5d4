#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature assembly and prediction for the house price dashboard.
//!
//! Turns a county selection plus the user's inputs into a model feature
//! record ([`assembler`]), runs the trained model and formats the price
//! ([`invoker`]), and keeps the three heavy artifacts loaded for the life
//! of the process ([`artifacts`]). [`form`] models the submit-to-predict
//! flow of the dashboard.

pub mod artifacts;
pub mod assembler;
pub mod form;
pub mod invoker;
pub mod paths;

use house_price_dataset::DatasetError;
use house_price_geography::GeoError;
use house_price_housing_models::{FeatureRecord, HousingInput, InvalidInputError};
use house_price_model::ModelError;
use thiserror::Error;

pub use artifacts::{ArtifactPaths, ArtifactStore};
pub use assembler::assemble_features;
pub use form::{FormState, PredictionForm};
pub use invoker::{Prediction, format_usd, invoke, round_to_hundreds};

/// Errors that can occur while assembling features or predicting.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The selected region does not exist in the region dataset.
    #[error("Region not found: {name}")]
    RegionNotFound {
        /// The requested name.
        name: String,
    },

    /// The user input is out of bounds.
    #[error("Invalid input: {0}")]
    Input(#[from] InvalidInputError),

    /// The region dataset failed to load.
    #[error("Region dataset error: {0}")]
    Geo(#[from] GeoError),

    /// The housing dataset failed to load.
    #[error("Housing dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The model failed to load or evaluate.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The model returned no value for the row.
    #[error("Model returned no prediction")]
    EmptyPrediction,

    /// The model returned `NaN` or an infinity.
    #[error("Model returned a non-finite prediction: {value}")]
    NonFinitePrediction {
        /// The returned value.
        value: f64,
    },
}

/// Predicts the price for a region and input using the store's artifacts.
///
/// Loads the region dataset and model on first use.
///
/// # Errors
///
/// Returns [`PredictError`] if an artifact fails to load, the region is
/// unknown, or the model fails.
pub fn predict_price(
    store: &ArtifactStore,
    region_name: &str,
    input: HousingInput,
) -> Result<(FeatureRecord, Prediction), PredictError> {
    let regions = store.regions()?;
    let model = store.model()?;

    let record = assemble_features(&regions, region_name, input)?;
    let prediction = invoke(model.as_ref(), &record)?;

    log::debug!(
        "Predicted {} for {region_name} (age {}, income {})",
        prediction.display,
        input.housing_median_age(),
        input.median_income()
    );

    Ok((record, prediction))
}
