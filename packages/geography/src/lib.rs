#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County boundary and aggregate dataset.
//!
//! Reads the per-county `GeoJSON` produced upstream (one or more polygon
//! features per county, each carrying the county's aggregate housing
//! statistics), cleans the geometries, and serves lookups by county name
//! plus the map view used by the dashboard.

pub mod cleanup;
pub mod map;

use std::collections::BTreeMap;
use std::path::Path;

use geo::{Centroid, MultiPolygon, Polygon};
use geojson::GeoJson;
use house_price_housing_models::RegionAggregates;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use map::MapView;

/// Errors that can occur while loading or querying regions.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    /// A feature's properties are missing or malformed.
    #[error("Invalid properties on feature {index}: {source}")]
    Properties {
        /// Zero-based feature index.
        index: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// A feature has no polygon geometry left after cleanup.
    #[error("Feature {index} ({name}) has no usable polygon geometry")]
    EmptyGeometry {
        /// Zero-based feature index.
        index: usize,
        /// Region name of the feature.
        name: String,
    },

    /// No region with the given name exists.
    #[error("Region not found: {name}")]
    RegionNotFound {
        /// The requested name.
        name: String,
    },
}

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// A county with its boundary and precomputed aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// County name, unique within a [`RegionDataset`].
    pub name: String,
    /// Representative point used as the model's longitude/latitude and as
    /// the map center when the county is selected.
    pub centroid: GeoPoint,
    /// Boundary polygons, oriented exterior counter-clockwise.
    pub boundary: MultiPolygon<f64>,
    /// Aggregate housing statistics.
    pub aggregates: RegionAggregates,
}

impl Region {
    /// Splits the boundary into its individual polygons.
    pub fn explode(&self) -> impl Iterator<Item = &Polygon<f64>> {
        self.boundary.0.iter()
    }
}

/// Feature properties as they appear in the source `GeoJSON`.
#[derive(Debug, Deserialize)]
struct RegionProperties {
    name: String,
    longitude: Option<f64>,
    latitude: Option<f64>,
    #[serde(flatten)]
    aggregates: RegionAggregates,
}

/// All counties, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RegionDataset {
    regions: BTreeMap<String, Region>,
}

impl RegionDataset {
    /// Reads regions from a `GeoJSON` file.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the file cannot be read or any feature is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, GeoError> {
        let contents = std::fs::read_to_string(path).map_err(|source| GeoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_geojson_str(&contents)?;
        log::info!("Loaded {} regions from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parses regions from a `GeoJSON` `FeatureCollection`.
    ///
    /// Features that share a name are merged into a single region; the
    /// first feature's aggregates and centroid are kept. A region whose
    /// first feature has no `longitude`/`latitude` is centered on the
    /// centroid of all its merged parts.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the document is not a `FeatureCollection`,
    /// a feature lacks the required properties, or a feature has no usable
    /// polygon geometry.
    pub fn from_geojson_str(contents: &str) -> Result<Self, GeoError> {
        let GeoJson::FeatureCollection(collection) = contents.parse::<GeoJson>()? else {
            return Err(GeoError::NotAFeatureCollection);
        };

        let mut regions: BTreeMap<String, Region> = BTreeMap::new();
        let mut missing_centroid: BTreeMap<String, usize> = BTreeMap::new();

        for (index, feature) in collection.features.into_iter().enumerate() {
            let properties = serde_json::Value::Object(feature.properties.unwrap_or_default());
            let props: RegionProperties = serde_json::from_value(properties)
                .map_err(|source| GeoError::Properties { index, source })?;
            let name = props.name.trim().to_string();

            let boundary = feature
                .geometry
                .and_then(cleanup::to_multipolygon)
                .map(cleanup::clean_multipolygon)
                .filter(|mp| !mp.0.is_empty())
                .ok_or_else(|| GeoError::EmptyGeometry {
                    index,
                    name: name.clone(),
                })?;

            if let Some(existing) = regions.get_mut(&name) {
                log::debug!(
                    "Merging {} polygon(s) from feature {index} into region {name}",
                    boundary.0.len()
                );
                existing.boundary.0.extend(boundary);
                continue;
            }

            let centroid = match (props.longitude, props.latitude) {
                (Some(longitude), Some(latitude)) => GeoPoint {
                    longitude,
                    latitude,
                },
                _ => {
                    // Filled in from the merged boundary once every part is read.
                    missing_centroid.insert(name.clone(), index);
                    GeoPoint {
                        longitude: f64::NAN,
                        latitude: f64::NAN,
                    }
                }
            };

            regions.insert(
                name.clone(),
                Region {
                    name,
                    centroid,
                    boundary,
                    aggregates: props.aggregates,
                },
            );
        }

        for (name, index) in missing_centroid {
            let Some(region) = regions.get_mut(&name) else {
                continue;
            };
            let point = region
                .boundary
                .centroid()
                .ok_or(GeoError::EmptyGeometry { index, name })?;
            region.centroid = GeoPoint {
                longitude: point.x(),
                latitude: point.y(),
            };
        }

        Ok(Self { regions })
    }

    /// Looks up a region by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Region names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    /// Iterates regions in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Returns the number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if there are no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use house_price_housing_models::OceanProximity;

    pub(crate) const SAMPLE: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {
        "name": "Alameda", "longitude": -122.1, "latitude": 37.7,
        "total_rooms": 5000, "total_bedrooms": 1000, "population": 3000,
        "households": 1100, "ocean_proximity": "NEAR BAY",
        "rooms_per_household": 4.5, "bedrooms_per_room": 0.2,
        "population_per_household": 2.7
      },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-122.4, 37.5], [-122.4, 37.9], [-121.5, 37.9], [-121.5, 37.5], [-122.4, 37.5]]]
      }
    },
    {
      "type": "Feature",
      "properties": {
        "name": "Fresno",
        "total_rooms": 2600, "total_bedrooms": 520, "population": 1500,
        "households": 480, "ocean_proximity": "INLAND",
        "rooms_per_household": 5.4, "bedrooms_per_room": 0.2,
        "population_per_household": 3.1
      },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-120.0, 36.0], [-119.0, 36.0], [-119.0, 37.0], [-120.0, 37.0], [-120.0, 36.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": {
        "name": "Alameda", "longitude": 0.0, "latitude": 0.0,
        "total_rooms": 1, "total_bedrooms": 1, "population": 1,
        "households": 1, "ocean_proximity": "ISLAND",
        "rooms_per_household": 1, "bedrooms_per_room": 1,
        "population_per_household": 1
      },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-122.3, 37.75], [-122.2, 37.75], [-122.2, 37.8], [-122.3, 37.75]]]
      }
    }
  ]
}"#;

    #[test]
    fn loads_and_sorts_regions() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.names(), vec!["Alameda", "Fresno"]);
    }

    #[test]
    fn duplicate_names_merge_into_first_region() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        let alameda = dataset.get("Alameda").unwrap();
        assert_eq!(alameda.explode().count(), 2);
        assert_eq!(alameda.aggregates.ocean_proximity, OceanProximity::NearBay);
        assert!((alameda.aggregates.total_rooms - 5000.0).abs() < f64::EPSILON);
        assert!((alameda.centroid.longitude - -122.1).abs() < f64::EPSILON);
        assert!((alameda.centroid.latitude - 37.7).abs() < f64::EPSILON);
    }

    #[test]
    fn centroid_falls_back_to_geometry() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        let fresno = dataset.get("Fresno").unwrap();
        assert!((fresno.centroid.longitude - -119.5).abs() < 1e-9);
        assert!((fresno.centroid.latitude - 36.5).abs() < 1e-9);
    }

    #[test]
    fn fallback_centroid_covers_every_merged_part() {
        let doc = r#"{"type": "FeatureCollection", "features": [
            {
                "type": "Feature",
                "properties": {
                    "name": "Kern",
                    "total_rooms": 1, "total_bedrooms": 1, "population": 1,
                    "households": 1, "ocean_proximity": "INLAND",
                    "rooms_per_household": 1, "bedrooms_per_room": 1,
                    "population_per_household": 1
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-120.0, 36.0], [-119.0, 36.0], [-119.0, 37.0], [-120.0, 37.0], [-120.0, 36.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "name": "Kern",
                    "total_rooms": 1, "total_bedrooms": 1, "population": 1,
                    "households": 1, "ocean_proximity": "INLAND",
                    "rooms_per_household": 1, "bedrooms_per_room": 1,
                    "population_per_household": 1
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-118.0, 36.0], [-117.0, 36.0], [-117.0, 37.0], [-118.0, 37.0], [-118.0, 36.0]]]
                }
            }
        ]}"#;
        let dataset = RegionDataset::from_geojson_str(doc).unwrap();
        let kern = dataset.get("Kern").unwrap();
        assert_eq!(kern.explode().count(), 2);
        assert!((kern.centroid.longitude - -118.5).abs() < 1e-9);
        assert!((kern.centroid.latitude - 36.5).abs() < 1e-9);
    }

    #[test]
    fn unknown_name_is_absent() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        assert!(dataset.get("Atlantis").is_none());
        assert!(dataset.get("alameda").is_none());
    }

    #[test]
    fn missing_aggregate_is_rejected() {
        let broken = SAMPLE.replacen("\"households\": 480,", "", 1);
        let err = RegionDataset::from_geojson_str(&broken).unwrap_err();
        assert!(
            matches!(err, GeoError::Properties { index: 1, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn point_geometry_is_rejected() {
        let doc = r#"{"type": "FeatureCollection", "features": [{
            "type": "Feature",
            "properties": {
                "name": "Nowhere",
                "total_rooms": 1, "total_bedrooms": 1, "population": 1,
                "households": 1, "ocean_proximity": "INLAND",
                "rooms_per_household": 1, "bedrooms_per_room": 1,
                "population_per_household": 1
            },
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }]}"#;
        let err = RegionDataset::from_geojson_str(doc).unwrap_err();
        assert!(matches!(err, GeoError::EmptyGeometry { index: 0, .. }));
    }

    #[test]
    fn bare_geometry_is_not_a_collection() {
        let doc = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(matches!(
            RegionDataset::from_geojson_str(doc),
            Err(GeoError::NotAFeatureCollection)
        ));
    }
}
