//! Serialized linear regression pipeline.
//!
//! The artifact stores a standard-scaled linear model over the numeric
//! features, one-hot coefficients for the ocean proximity category, an
//! intercept, and the transform that was applied to the target during
//! training. Every numeric term is resolved against [`NUMERIC_FEATURES`]
//! when the artifact is loaded, so a model trained on a different schema
//! is rejected before it can serve a prediction.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use house_price_housing_models::{FeatureRecord, NUMERIC_FEATURES, OceanProximity};
use serde::{Deserialize, Serialize};

use crate::{ModelError, PriceModel};

/// Transform applied to the target during training, inverted at
/// prediction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTransform {
    /// The model predicts the price directly.
    #[default]
    Identity,
    /// The model predicts `ln(1 + price)`.
    Log1p,
}

impl TargetTransform {
    fn invert(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Log1p => value.exp_m1(),
        }
    }
}

/// A standard-scaled numeric term as stored in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    /// Feature name; must be one of [`NUMERIC_FEATURES`].
    pub feature: String,
    /// Training mean.
    pub mean: f64,
    /// Training standard deviation.
    pub scale: f64,
    /// Coefficient on the scaled value.
    pub coefficient: f64,
}

/// The on-disk artifact format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Model name.
    pub name: String,
    /// Numeric terms, in any order.
    pub numeric: Vec<NumericTerm>,
    /// One-hot coefficient per ocean proximity category.
    pub ocean_proximity: BTreeMap<OceanProximity, f64>,
    /// Intercept.
    pub intercept: f64,
    /// Target transform.
    #[serde(default)]
    pub target_transform: TargetTransform,
}

/// A term resolved to its position in [`NUMERIC_FEATURES`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaledTerm {
    mean: f64,
    scale: f64,
    coefficient: f64,
}

/// A loaded, schema-validated linear pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPipelineModel {
    name: String,
    terms: [ScaledTerm; NUMERIC_FEATURES.len()],
    ocean_proximity: BTreeMap<OceanProximity, f64>,
    intercept: f64,
    target_transform: TargetTransform,
}

impl LinearPipelineModel {
    /// Loads and validates an artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the file cannot be read, is not a valid
    /// artifact, or does not match the feature schema.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded model {} ({:?} target) from {}",
            model.name,
            model.target_transform,
            path.display()
        );
        Ok(model)
    }

    /// Parses and validates an artifact from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the JSON is malformed or the artifact does
    /// not match the feature schema.
    pub fn from_json_str(contents: &str) -> Result<Self, ModelError> {
        let artifact: PipelineArtifact = serde_json::from_str(contents)?;
        Self::try_from(artifact)
    }

    fn predict_one(&self, row: &FeatureRecord) -> f64 {
        let linear: f64 = self
            .terms
            .iter()
            .zip(row.numeric_values())
            .map(|(term, value)| term.coefficient * (value - term.mean) / term.scale)
            .sum();

        // Every category is present; checked on load.
        let category = self
            .ocean_proximity
            .get(&row.ocean_proximity)
            .copied()
            .unwrap_or_default();

        self.target_transform
            .invert(self.intercept + linear + category)
    }
}

impl TryFrom<PipelineArtifact> for LinearPipelineModel {
    type Error = ModelError;

    fn try_from(artifact: PipelineArtifact) -> Result<Self, Self::Error> {
        let mut resolved: [Option<ScaledTerm>; NUMERIC_FEATURES.len()] =
            [None; NUMERIC_FEATURES.len()];

        for term in &artifact.numeric {
            let Some(index) = NUMERIC_FEATURES.iter().position(|f| *f == term.feature) else {
                return Err(ModelError::SchemaMismatch {
                    message: format!("unknown feature {:?}", term.feature),
                });
            };
            if resolved[index].is_some() {
                return Err(ModelError::SchemaMismatch {
                    message: format!("duplicate feature {:?}", term.feature),
                });
            }
            if !(term.mean.is_finite() && term.coefficient.is_finite()) {
                return Err(ModelError::InvalidArtifact {
                    message: format!("non-finite parameter for {:?}", term.feature),
                });
            }
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(ModelError::InvalidArtifact {
                    message: format!("unusable scale {} for {:?}", term.scale, term.feature),
                });
            }
            resolved[index] = Some(ScaledTerm {
                mean: term.mean,
                scale: term.scale,
                coefficient: term.coefficient,
            });
        }

        let missing: Vec<&str> = NUMERIC_FEATURES
            .iter()
            .zip(&resolved)
            .filter(|(_, term)| term.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::SchemaMismatch {
                message: format!("missing features {}", missing.join(", ")),
            });
        }

        let covered: BTreeSet<OceanProximity> =
            artifact.ocean_proximity.keys().copied().collect();
        let uncovered: Vec<String> = OceanProximity::all()
            .iter()
            .filter(|c| !covered.contains(c))
            .map(ToString::to_string)
            .collect();
        if !uncovered.is_empty() {
            return Err(ModelError::SchemaMismatch {
                message: format!("missing ocean_proximity categories {}", uncovered.join(", ")),
            });
        }

        if !artifact.intercept.is_finite()
            || artifact.ocean_proximity.values().any(|v| !v.is_finite())
        {
            return Err(ModelError::InvalidArtifact {
                message: "non-finite intercept or category coefficient".to_string(),
            });
        }

        let terms = resolved.map(|term| {
            term.unwrap_or(ScaledTerm {
                mean: 0.0,
                scale: 1.0,
                coefficient: 0.0,
            })
        });

        Ok(Self {
            name: artifact.name,
            terms,
            ocean_proximity: artifact.ocean_proximity,
            intercept: artifact.intercept,
            target_transform: artifact.target_transform,
        })
    }
}

impl PriceModel for LinearPipelineModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError> {
        log::debug!("Model {} predicting {} row(s)", self.name, rows.len());
        Ok(rows.iter().map(|row| self.predict_one(row)).collect())
    }
}
