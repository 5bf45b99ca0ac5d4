//! Runs the model on an assembled record and formats the price.

use house_price_housing_models::FeatureRecord;
use house_price_model::PriceModel;
use serde::Serialize;

use crate::PredictError;

/// A predicted price, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// The model output as returned.
    pub raw: f64,
    /// The output rounded to the nearest hundred.
    pub rounded: f64,
    /// The rounded price formatted as `US$ 1,234,500`.
    pub display: String,
}

impl Prediction {
    /// Rounds and formats a raw model output.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        let rounded = round_to_hundreds(raw);
        Self {
            raw,
            rounded,
            display: format_usd(rounded),
        }
    }
}

/// Invokes the model on a single record.
///
/// # Errors
///
/// Returns [`PredictError::Model`] if the model fails,
/// [`PredictError::EmptyPrediction`] if it returns no value, or
/// [`PredictError::NonFinitePrediction`] if the value is `NaN` or infinite.
pub fn invoke(model: &dyn PriceModel, record: &FeatureRecord) -> Result<Prediction, PredictError> {
    let outputs = model.predict(std::slice::from_ref(record))?;
    let raw = outputs
        .first()
        .copied()
        .ok_or(PredictError::EmptyPrediction)?;

    if !raw.is_finite() {
        log::error!("Model {} returned {raw}", model.name());
        return Err(PredictError::NonFinitePrediction { value: raw });
    }

    Ok(Prediction::from_raw(raw))
}

/// Rounds to the nearest hundred, with exact halves rounded away from
/// zero (`1250` becomes `1300`, `-1250` becomes `-1300`).
#[must_use]
pub fn round_to_hundreds(value: f64) -> f64 {
    (value / 100.0).round() * 100.0
}

/// Formats an amount as whole US dollars with `,` thousands separators.
///
/// Cents are rounded half away from zero.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    // Prices are far below i64::MAX; saturating casts cover the rest.
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.round() as i64;

    let digits = whole.unsigned_abs().to_string();
    let sign = if whole < 0 { "-" } else { "" };

    format!("US$ {sign}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_price_geography::RegionDataset;
    use house_price_housing_models::HousingInput;
    use house_price_model::ModelError;

    use crate::assembler::{assemble_features, tests::REGIONS};

    struct FixedModel(Vec<f64>);

    impl PriceModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError> {
            Ok(self.0.iter().copied().take(rows.len()).collect())
        }
    }

    struct FailingModel;

    impl PriceModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _rows: &[FeatureRecord]) -> Result<Vec<f64>, ModelError> {
            Err(ModelError::SchemaMismatch {
                message: "expected 14 columns".to_string(),
            })
        }
    }

    fn alameda() -> FeatureRecord {
        let regions = RegionDataset::from_geojson_str(REGIONS).unwrap();
        assemble_features(&regions, "Alameda", HousingInput::new(10, 45).unwrap()).unwrap()
    }

    #[test]
    fn rounds_to_nearest_hundred() {
        assert!((round_to_hundreds(1234.0) - 1200.0).abs() < f64::EPSILON);
        assert!((round_to_hundreds(1249.99) - 1200.0).abs() < f64::EPSILON);
        assert!((round_to_hundreds(1250.0) - 1300.0).abs() < f64::EPSILON);
        assert!((round_to_hundreds(-1250.0) - -1300.0).abs() < f64::EPSILON);
        assert!((round_to_hundreds(49.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rounding_is_idempotent() {
        for value in [0.0, 1234.0, 1250.0, 98_765.4, 452_649.0, -1250.0] {
            let once = round_to_hundreds(value);
            assert!(
                (round_to_hundreds(once) - once).abs() < f64::EPSILON,
                "{value} not idempotent"
            );
        }
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_usd(0.0), "US$ 0");
        assert_eq!(format_usd(100.0), "US$ 100");
        assert_eq!(format_usd(1200.0), "US$ 1,200");
        assert_eq!(format_usd(123_456.0), "US$ 123,456");
        assert_eq!(format_usd(1_234_500.0), "US$ 1,234,500");
        assert_eq!(format_usd(-1300.0), "US$ -1,300");
        assert_eq!(format_usd(-0.2), "US$ 0");
    }

    #[test]
    fn invokes_model_and_formats_result() {
        let model = FixedModel(vec![261_249.7]);
        let prediction = invoke(&model, &alameda()).unwrap();
        assert_eq!(
            prediction,
            Prediction {
                raw: 261_249.7,
                rounded: 261_200.0,
                display: "US$ 261,200".to_string(),
            }
        );
    }

    #[test]
    fn empty_output_is_an_error() {
        let model = FixedModel(Vec::new());
        assert!(matches!(
            invoke(&model, &alameda()),
            Err(PredictError::EmptyPrediction)
        ));
    }

    #[test]
    fn non_finite_output_is_an_error() {
        let model = FixedModel(vec![f64::NAN]);
        assert!(matches!(
            invoke(&model, &alameda()),
            Err(PredictError::NonFinitePrediction { .. })
        ));
    }

    #[test]
    fn model_failure_propagates() {
        assert!(matches!(
            invoke(&FailingModel, &alameda()),
            Err(PredictError::Model(ModelError::SchemaMismatch { .. }))
        ));
    }
}
