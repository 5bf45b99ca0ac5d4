//! Builds model feature records from a region and the user's inputs.

use house_price_geography::{Region, RegionDataset};
use house_price_housing_models::{FeatureRecord, HousingInput, IncomeCategory};

use crate::PredictError;

/// Assembles the feature record for `region_name`.
///
/// # Errors
///
/// Returns [`PredictError::RegionNotFound`] if no region has that exact
/// name.
pub fn assemble_features(
    regions: &RegionDataset,
    region_name: &str,
    input: HousingInput,
) -> Result<FeatureRecord, PredictError> {
    let region = regions
        .get(region_name)
        .ok_or_else(|| PredictError::RegionNotFound {
            name: region_name.to_string(),
        })?;

    Ok(features_for_region(region, input))
}

/// Merges a region's centroid and aggregates with the user's inputs.
#[must_use]
pub fn features_for_region(region: &Region, input: HousingInput) -> FeatureRecord {
    let aggregates = &region.aggregates;
    let median_income = input.normalized_income();

    FeatureRecord {
        longitude: region.centroid.longitude,
        latitude: region.centroid.latitude,
        housing_median_age: f64::from(input.housing_median_age()),
        total_rooms: aggregates.total_rooms,
        total_bedrooms: aggregates.total_bedrooms,
        population: aggregates.population,
        households: aggregates.households,
        median_income,
        ocean_proximity: aggregates.ocean_proximity,
        median_income_cat: IncomeCategory::from_normalized_income(median_income),
        rooms_per_household: aggregates.rooms_per_household,
        bedrooms_per_room: aggregates.bedrooms_per_room,
        population_per_household: aggregates.population_per_household,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use house_price_housing_models::{FEATURE_NAMES, OceanProximity};

    pub(crate) const REGIONS: &str = r#"{
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
        "coordinates": [[[-122.4, 37.5], [-121.5, 37.5], [-121.5, 37.9], [-122.4, 37.9], [-122.4, 37.5]]]
      }
    },
    {
      "type": "Feature",
      "properties": {
        "name": "Fresno", "longitude": -119.6, "latitude": 36.8,
        "total_rooms": 2600, "total_bedrooms": 520, "population": 1500,
        "households": 480, "ocean_proximity": "INLAND",
        "rooms_per_household": 5.4, "bedrooms_per_room": 0.2,
        "population_per_household": 3.1
      },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[-120.0, 36.0], [-119.0, 36.0], [-119.0, 37.0], [-120.0, 37.0], [-120.0, 36.0]]]
      }
    }
  ]
}"#;

    #[test]
    fn assembles_alameda_record() {
        let regions = RegionDataset::from_geojson_str(REGIONS).unwrap();
        let input = HousingInput::new(10, 45).unwrap();

        let record = assemble_features(&regions, "Alameda", input).unwrap();

        assert_eq!(
            record,
            FeatureRecord {
                longitude: -122.1,
                latitude: 37.7,
                housing_median_age: 10.0,
                total_rooms: 5000.0,
                total_bedrooms: 1000.0,
                population: 3000.0,
                households: 1100.0,
                median_income: 4.5,
                ocean_proximity: OceanProximity::NearBay,
                median_income_cat: IncomeCategory::from_normalized_income(4.5),
                rooms_per_household: 4.5,
                bedrooms_per_room: 0.2,
                population_per_household: 2.7,
            }
        );
        assert_eq!(record.median_income_cat.value(), 3);
    }

    #[test]
    fn every_region_produces_the_full_schema() {
        let regions = RegionDataset::from_geojson_str(REGIONS).unwrap();

        for name in regions.names() {
            let record = assemble_features(&regions, name, HousingInput::default()).unwrap();
            let json = serde_json::to_value(record).unwrap();
            let keys: Vec<&str> = json
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            let mut expected = FEATURE_NAMES.to_vec();
            expected.sort_unstable();
            let mut keys = keys;
            keys.sort_unstable();
            assert_eq!(keys, expected, "schema mismatch for {name}");
        }
    }

    #[test]
    fn region_lookup_is_exact() {
        let regions = RegionDataset::from_geojson_str(REGIONS).unwrap();
        for name in ["alameda", "Alameda ", "Atlantis", ""] {
            assert!(
                matches!(
                    assemble_features(&regions, name, HousingInput::default()),
                    Err(PredictError::RegionNotFound { .. })
                ),
                "{name:?} should not match"
            );
        }
    }

    #[test]
    fn income_is_normalized_to_tens_of_thousands() {
        let regions = RegionDataset::from_geojson_str(REGIONS).unwrap();
        let input = HousingInput::new(0, 100).unwrap();
        let record = assemble_features(&regions, "Fresno", input).unwrap();
        assert!((record.median_income - 10.0).abs() < f64::EPSILON);
        assert_eq!(record.median_income_cat.value(), 5);
        assert!(record.housing_median_age.abs() < f64::EPSILON);
    }
}
