#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Housing feature schema types shared across the house price system.
//!
//! This crate defines the fixed feature record consumed by the trained
//! price model, the user-adjustable inputs, the per-county aggregates
//! that are copied into every record, and the derived income category.
//! The record is a plain struct so that any change to the model's input
//! schema is a compile error everywhere the record is built or read.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Proximity of a district to the ocean, as labelled in the census data.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum OceanProximity {
    /// Less than an hour from the ocean
    #[serde(rename = "<1H OCEAN")]
    #[strum(serialize = "<1H OCEAN")]
    LessThanOneHour,
    /// Inland district
    #[serde(rename = "INLAND")]
    #[strum(serialize = "INLAND")]
    Inland,
    /// Island district
    #[serde(rename = "ISLAND")]
    #[strum(serialize = "ISLAND")]
    Island,
    /// Near the San Francisco bay
    #[serde(rename = "NEAR BAY")]
    #[strum(serialize = "NEAR BAY")]
    NearBay,
    /// Near the ocean
    #[serde(rename = "NEAR OCEAN")]
    #[strum(serialize = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LessThanOneHour,
            Self::Inland,
            Self::Island,
            Self::NearBay,
            Self::NearOcean,
        ]
    }
}

/// Bin edges applied to the normalized median income (tens of thousands
/// of US$). The last bin is open-ended.
pub const INCOME_BIN_EDGES: [f64; 6] = [0.0, 1.5, 3.0, 4.5, 6.0, f64::INFINITY];

/// Ordinal income class derived from normalized median income.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IncomeCategory(u8);

impl IncomeCategory {
    /// Buckets a normalized median income.
    ///
    /// The bucket index is the number of [`INCOME_BIN_EDGES`] the value
    /// strictly exceeds, so `4.5` lands in bucket 3 and `10.0` in bucket 5.
    /// The lowest slider value, `0.5`, exceeds the `0` edge and lands in
    /// bucket 1.
    /// `NaN` compares false against every edge and lands in bucket 0.
    #[must_use]
    pub fn from_normalized_income(income: f64) -> Self {
        let exceeded = INCOME_BIN_EDGES
            .iter()
            .filter(|&&edge| income > edge)
            .count();
        // At most INCOME_BIN_EDGES.len() - 1 edges can be exceeded.
        #[allow(clippy::cast_possible_truncation)]
        Self(exceeded as u8)
    }

    /// Returns the zero-based bucket index.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Housing median age bounds (years).
pub const HOUSING_MEDIAN_AGE_MIN: u8 = 0;
/// Upper housing median age bound (years).
pub const HOUSING_MEDIAN_AGE_MAX: u8 = 50;
/// Default housing median age shown in the inputs.
pub const HOUSING_MEDIAN_AGE_DEFAULT: u8 = 10;

/// Lower median income bound (thousands of US$).
pub const MEDIAN_INCOME_MIN: u8 = 5;
/// Upper median income bound (thousands of US$).
pub const MEDIAN_INCOME_MAX: u8 = 100;
/// Median income slider step (thousands of US$).
pub const MEDIAN_INCOME_STEP: u8 = 5;
/// Default median income shown in the inputs.
pub const MEDIAN_INCOME_DEFAULT: u8 = 45;

/// The user-adjustable inputs of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingInput {
    housing_median_age: u8,
    median_income: u8,
}

impl HousingInput {
    /// Creates a validated input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if the age is above 50, or the income
    /// is outside 5-100 or not a multiple of 5.
    pub const fn new(housing_median_age: u8, median_income: u8) -> Result<Self, InvalidInputError> {
        if housing_median_age > HOUSING_MEDIAN_AGE_MAX {
            return Err(InvalidInputError::HousingMedianAge {
                value: housing_median_age,
            });
        }
        if median_income < MEDIAN_INCOME_MIN
            || median_income > MEDIAN_INCOME_MAX
            || median_income % MEDIAN_INCOME_STEP != 0
        {
            return Err(InvalidInputError::MedianIncome {
                value: median_income,
            });
        }
        Ok(Self {
            housing_median_age,
            median_income,
        })
    }

    /// Housing median age in years.
    #[must_use]
    pub const fn housing_median_age(self) -> u8 {
        self.housing_median_age
    }

    /// Median income in thousands of US$, as entered.
    #[must_use]
    pub const fn median_income(self) -> u8 {
        self.median_income
    }

    /// Median income in the dataset's unit (tens of thousands of US$).
    #[must_use]
    pub fn normalized_income(self) -> f64 {
        f64::from(self.median_income) / 10.0
    }
}

impl Default for HousingInput {
    fn default() -> Self {
        Self {
            housing_median_age: HOUSING_MEDIAN_AGE_DEFAULT,
            median_income: MEDIAN_INCOME_DEFAULT,
        }
    }
}

/// Error returned when a [`HousingInput`] value is out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Housing median age outside 0-50.
    HousingMedianAge {
        /// The rejected value.
        value: u8,
    },
    /// Median income outside 5-100 or off the step of 5.
    MedianIncome {
        /// The rejected value.
        value: u8,
    },
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HousingMedianAge { value } => write!(
                f,
                "invalid housing median age {value}: expected {HOUSING_MEDIAN_AGE_MIN}-{HOUSING_MEDIAN_AGE_MAX}"
            ),
            Self::MedianIncome { value } => write!(
                f,
                "invalid median income {value}: expected {MEDIAN_INCOME_MIN}-{MEDIAN_INCOME_MAX} in steps of {MEDIAN_INCOME_STEP}"
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}

/// Precomputed per-county aggregates, copied verbatim into feature records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionAggregates {
    /// Total room count.
    pub total_rooms: f64,
    /// Total bedroom count.
    pub total_bedrooms: f64,
    /// Population.
    pub population: f64,
    /// Household count.
    pub households: f64,
    /// Dominant ocean proximity category.
    pub ocean_proximity: OceanProximity,
    /// Rooms per household.
    pub rooms_per_household: f64,
    /// Bedrooms per room.
    pub bedrooms_per_room: f64,
    /// People per household.
    pub population_per_household: f64,
}

/// Names of every model input field, in schema order.
pub const FEATURE_NAMES: [&str; 13] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "ocean_proximity",
    "median_income_cat",
    "rooms_per_household",
    "bedrooms_per_room",
    "population_per_household",
];

/// Names of the numeric model input fields, in schema order.
pub const NUMERIC_FEATURES: [&str; 12] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_income_cat",
    "rooms_per_household",
    "bedrooms_per_room",
    "population_per_household",
];

/// One row of model input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Region centroid longitude.
    pub longitude: f64,
    /// Region centroid latitude.
    pub latitude: f64,
    /// Housing median age in years.
    pub housing_median_age: f64,
    /// Total room count.
    pub total_rooms: f64,
    /// Total bedroom count.
    pub total_bedrooms: f64,
    /// Population.
    pub population: f64,
    /// Household count.
    pub households: f64,
    /// Median income in tens of thousands of US$.
    pub median_income: f64,
    /// Ocean proximity category.
    pub ocean_proximity: OceanProximity,
    /// Income bucket.
    pub median_income_cat: IncomeCategory,
    /// Rooms per household.
    pub rooms_per_household: f64,
    /// Bedrooms per room.
    pub bedrooms_per_room: f64,
    /// People per household.
    pub population_per_household: f64,
}

impl FeatureRecord {
    /// Returns the numeric fields in [`NUMERIC_FEATURES`] order.
    #[must_use]
    pub fn numeric_values(&self) -> [f64; 12] {
        [
            self.longitude,
            self.latitude,
            self.housing_median_age,
            self.total_rooms,
            self.total_bedrooms,
            self.population,
            self.households,
            self.median_income,
            f64::from(self.median_income_cat.value()),
            self.rooms_per_household,
            self.bedrooms_per_room,
            self.population_per_household,
        ]
    }
}
