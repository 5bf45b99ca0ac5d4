#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Historical housing dataset reader.
//!
//! Loads the cleaned census housing records from CSV. The records are not
//! used to build predictions; the dashboard only exposes a summary of them
//! (record count, ocean proximity categories, house value range).

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use house_price_housing_models::OceanProximity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading the housing dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A row could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single historical district record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    /// District longitude.
    pub longitude: f64,
    /// District latitude.
    pub latitude: f64,
    /// Housing median age in years.
    pub housing_median_age: f64,
    /// Total room count.
    pub total_rooms: f64,
    /// Total bedroom count. Missing in some raw census rows.
    pub total_bedrooms: Option<f64>,
    /// Population.
    pub population: f64,
    /// Household count.
    pub households: f64,
    /// Median income in tens of thousands of US$.
    pub median_income: f64,
    /// Median house value in US$.
    pub median_house_value: f64,
    /// Ocean proximity category.
    pub ocean_proximity: OceanProximity,
}

/// Summary of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of records.
    pub record_count: usize,
    /// Distinct ocean proximity categories, sorted.
    pub ocean_proximity: Vec<OceanProximity>,
    /// Smallest median house value, if any records exist.
    pub min_house_value: Option<f64>,
    /// Mean median house value, if any records exist.
    pub mean_house_value: Option<f64>,
    /// Largest median house value, if any records exist.
    pub max_house_value: Option<f64>,
}

/// The historical housing records, read once and never modified.
#[derive(Debug, Clone, Default)]
pub struct HousingDataset {
    records: Vec<HousingRecord>,
}

impl HousingDataset {
    /// Reads the dataset from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened or any row
    /// fails to parse.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        log::info!(
            "Loaded {} housing records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads the dataset from any CSV source with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] if any row fails to parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<HousingRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    /// Returns the records.
    #[must_use]
    pub fn records(&self) -> &[HousingRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Computes the dataset summary.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        let ocean_proximity: BTreeSet<OceanProximity> =
            self.records.iter().map(|r| r.ocean_proximity).collect();

        let values = self.records.iter().map(|r| r.median_house_value);
        let min_house_value = values.clone().reduce(f64::min);
        let max_house_value = values.clone().reduce(f64::max);

        #[allow(clippy::cast_precision_loss)]
        let mean_house_value =
            (!self.records.is_empty()).then(|| values.sum::<f64>() / self.records.len() as f64);

        DatasetSummary {
            record_count: self.records.len(),
            ocean_proximity: ocean_proximity.into_iter().collect(),
            min_house_value,
            mean_house_value,
            max_house_value,
        }
    }
}
