//! Map view of all counties with one county highlighted.
//!
//! Each county polygon part becomes its own `GeoJSON` feature carrying the
//! county `name` (used for hover tooltips) and a `selected` flag (used for
//! the highlight fill). The view is centered on the selected county.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;

use crate::{GeoError, GeoPoint, Region, RegionDataset};

/// A renderable map of every region with one highlighted.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    /// Name of the highlighted region.
    pub selected: String,
    /// Map center (the selected region's centroid).
    pub center: GeoPoint,
    /// One feature per polygon part of every region.
    pub regions: FeatureCollection,
}

impl RegionDataset {
    /// Builds the map view for a selected region.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::RegionNotFound`] if `selected` is not a region
    /// name in this dataset.
    pub fn map_view(&self, selected: &str) -> Result<MapView, GeoError> {
        let center = self
            .get(selected)
            .ok_or_else(|| GeoError::RegionNotFound {
                name: selected.to_string(),
            })?
            .centroid;

        let features = self
            .iter()
            .flat_map(|region| region_features(region, region.name == selected))
            .collect();

        Ok(MapView {
            selected: selected.to_string(),
            center,
            regions: FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            },
        })
    }
}

fn region_features(region: &Region, selected: bool) -> impl Iterator<Item = Feature> + '_ {
    region.explode().map(move |polygon| {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), region.name.clone().into());
        properties.insert("selected".to_string(), selected.into());

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(polygon))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::SAMPLE;

    fn feature_name(feature: &Feature) -> &str {
        feature
            .property("name")
            .and_then(serde_json::Value::as_str)
            .unwrap()
    }

    fn feature_selected(feature: &Feature) -> bool {
        feature
            .property("selected")
            .and_then(serde_json::Value::as_bool)
            .unwrap()
    }

    #[test]
    fn highlights_exactly_the_selected_region() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();

        for name in dataset.names() {
            let view = dataset.map_view(name).unwrap();
            assert_eq!(view.selected, name);

            let highlighted: Vec<&Feature> = view
                .regions
                .features
                .iter()
                .filter(|f| feature_selected(f))
                .collect();
            assert!(!highlighted.is_empty(), "{name} has no highlighted parts");
            for feature in highlighted {
                assert_eq!(feature_name(feature), name);
            }
        }
    }

    #[test]
    fn renders_every_polygon_part() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        let view = dataset.map_view("Fresno").unwrap();

        // Alameda has two parts, Fresno one.
        assert_eq!(view.regions.features.len(), 3);
        let alameda_parts = view
            .regions
            .features
            .iter()
            .filter(|f| feature_name(f) == "Alameda")
            .count();
        assert_eq!(alameda_parts, 2);
    }

    #[test]
    fn centers_on_selected_centroid() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        let view = dataset.map_view("Alameda").unwrap();
        assert_eq!(
            view.center,
            GeoPoint {
                longitude: -122.1,
                latitude: 37.7,
            }
        );
    }

    #[test]
    fn unknown_selection_is_an_error() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        assert!(matches!(
            dataset.map_view("Atlantis"),
            Err(GeoError::RegionNotFound { name }) if name == "Atlantis"
        ));
    }

    #[test]
    fn serializes_as_geojson() {
        let dataset = RegionDataset::from_geojson_str(SAMPLE).unwrap();
        let view = dataset.map_view("Alameda").unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["regions"]["type"], "FeatureCollection");
        assert_eq!(json["regions"]["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(json["center"]["longitude"], -122.1);
    }
}
