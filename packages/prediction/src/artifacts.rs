//! Load-once storage for the dashboard's artifacts.
//!
//! The housing dataset, the region dataset and the trained model are read
//! from disk on first access and then shared for the rest of the process.
//! Nothing is ever invalidated. A load that fails is not cached, so the
//! next access retries it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use house_price_dataset::HousingDataset;
use house_price_geography::RegionDataset;
use house_price_model::{LinearPipelineModel, PriceModel};

use crate::PredictError;
use crate::paths::{self, HOUSING_FILE, MODEL_FILE, REGIONS_FILE};

/// Locations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Cleaned historical housing CSV.
    pub dataset: PathBuf,
    /// County `GeoJSON`.
    pub regions: PathBuf,
    /// Serialized model.
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Resolves the standard file names inside `dir`.
    #[must_use]
    pub fn from_data_dir(dir: &Path) -> Self {
        Self {
            dataset: dir.join(HOUSING_FILE),
            regions: dir.join(REGIONS_FILE),
            model: dir.join(MODEL_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::from_data_dir(&paths::data_dir())
    }
}

/// Lazily loaded, process-wide artifacts.
pub struct ArtifactStore {
    paths: ArtifactPaths,
    dataset: OnceLock<Arc<HousingDataset>>,
    regions: OnceLock<Arc<RegionDataset>>,
    model: OnceLock<Arc<dyn PriceModel>>,
}

impl ArtifactStore {
    /// Creates an empty store; nothing is read until first access.
    #[must_use]
    pub const fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            dataset: OnceLock::new(),
            regions: OnceLock::new(),
            model: OnceLock::new(),
        }
    }

    /// The artifact locations.
    #[must_use]
    pub const fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// The historical housing dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Dataset`] if the first load fails.
    pub fn dataset(&self) -> Result<Arc<HousingDataset>, PredictError> {
        memoize(&self.dataset, || {
            Ok(Arc::new(HousingDataset::load(&self.paths.dataset)?))
        })
    }

    /// The county dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Geo`] if the first load fails.
    pub fn regions(&self) -> Result<Arc<RegionDataset>, PredictError> {
        memoize(&self.regions, || {
            Ok(Arc::new(RegionDataset::load(&self.paths.regions)?))
        })
    }

    /// The trained model.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Model`] if the first load fails.
    pub fn model(&self) -> Result<Arc<dyn PriceModel>, PredictError> {
        memoize(&self.model, || {
            let model: Arc<dyn PriceModel> =
                Arc::new(LinearPipelineModel::load(&self.paths.model)?);
            Ok(model)
        })
    }
}

/// Returns the cached value, loading it first if the cell is empty.
///
/// Concurrent first accesses may each run `load`; the first value stored
/// wins and every caller gets that same `Arc`.
fn memoize<T: ?Sized>(
    cell: &OnceLock<Arc<T>>,
    load: impl FnOnce() -> Result<Arc<T>, PredictError>,
) -> Result<Arc<T>, PredictError> {
    if let Some(value) = cell.get() {
        return Ok(Arc::clone(value));
    }

    let loaded = load()?;
    Ok(Arc::clone(cell.get_or_init(|| loaded)))
}
