#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the house price server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types to allow independent evolution of the API
//! contract.

use house_price_housing_models::{
    FeatureRecord, HOUSING_MEDIAN_AGE_DEFAULT, HOUSING_MEDIAN_AGE_MAX, HOUSING_MEDIAN_AGE_MIN,
    MEDIAN_INCOME_DEFAULT, MEDIAN_INCOME_MAX, MEDIAN_INCOME_MIN, MEDIAN_INCOME_STEP,
    OceanProximity,
};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// A county as listed in the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegion {
    /// County name.
    pub name: String,
    /// Centroid longitude.
    pub longitude: f64,
    /// Centroid latitude.
    pub latitude: f64,
    /// Ocean proximity category.
    pub ocean_proximity: OceanProximity,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// County to highlight. Defaults to the first county alphabetically.
    pub region: Option<String>,
}

/// Body of a prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    /// Selected county.
    pub region: String,
    /// Housing median age in years (0-50).
    pub housing_median_age: u8,
    /// Median income in thousands of US$ (5-100, step 5).
    pub median_income: u8,
}

/// A price prediction as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPrediction {
    /// Selected county.
    pub region: String,
    /// The feature record sent to the model.
    pub features: FeatureRecord,
    /// Raw model output.
    pub price: f64,
    /// Price rounded to the nearest hundred.
    pub rounded_price: f64,
    /// Formatted price, e.g. `US$ 213,500`.
    pub display: String,
}

/// Bounds of an integer input widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRange {
    /// Smallest accepted value.
    pub min: u8,
    /// Largest accepted value.
    pub max: u8,
    /// Step between accepted values.
    pub step: u8,
    /// Initial value.
    pub default: u8,
}

/// Bounds of every user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInputBounds {
    /// Housing median age input.
    pub housing_median_age: ApiRange,
    /// Median income slider.
    pub median_income: ApiRange,
}

impl Default for ApiInputBounds {
    fn default() -> Self {
        Self {
            housing_median_age: ApiRange {
                min: HOUSING_MEDIAN_AGE_MIN,
                max: HOUSING_MEDIAN_AGE_MAX,
                step: 1,
                default: HOUSING_MEDIAN_AGE_DEFAULT,
            },
            median_income: ApiRange {
                min: MEDIAN_INCOME_MIN,
                max: MEDIAN_INCOME_MAX,
                step: MEDIAN_INCOME_STEP,
                default: MEDIAN_INCOME_DEFAULT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_uses_camel_case() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"region": "Alameda", "housingMedianAge": 10, "medianIncome": 45}"#,
        )
        .unwrap();
        assert_eq!(request.region, "Alameda");
        assert_eq!(request.housing_median_age, 10);
        assert_eq!(request.median_income, 45);
    }

    #[test]
    fn input_bounds_match_dashboard_widgets() {
        let json = serde_json::to_value(ApiInputBounds::default()).unwrap();
        assert_eq!(json["housingMedianAge"]["max"], 50);
        assert_eq!(json["medianIncome"]["min"], 5);
        assert_eq!(json["medianIncome"]["step"], 5);
        assert_eq!(json["medianIncome"]["default"], 45);
    }
}
