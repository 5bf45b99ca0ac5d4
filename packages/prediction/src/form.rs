//! The dashboard's submit-to-predict flow.
//!
//! A price is only shown after an explicit submission. Changing the county
//! or any input afterwards discards the shown price until the next
//! submission.

use house_price_geography::RegionDataset;
use house_price_housing_models::HousingInput;
use house_price_model::PriceModel;

use crate::{PredictError, Prediction, assemble_features, invoke};

/// Where the form is in its flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// Inputs may be edited; no price is shown.
    AwaitingSubmission,
    /// A price was predicted for the current inputs.
    Predicted(Prediction),
}

/// The county selection and inputs of one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    region: String,
    input: HousingInput,
    state: FormState,
}

impl PredictionForm {
    /// Creates a form for `region` with the default inputs.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            input: HousingInput::default(),
            state: FormState::AwaitingSubmission,
        }
    }

    /// Creates a form preselecting the first county in alphabetical order,
    /// or `None` if the dataset is empty.
    #[must_use]
    pub fn for_dataset(regions: &RegionDataset) -> Option<Self> {
        regions.names().first().map(|name| Self::new(*name))
    }

    /// The selected county.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The current inputs.
    #[must_use]
    pub const fn input(&self) -> HousingInput {
        self.input
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// The shown price, if the form was submitted since the last change.
    #[must_use]
    pub const fn prediction(&self) -> Option<&Prediction> {
        match &self.state {
            FormState::Predicted(prediction) => Some(prediction),
            FormState::AwaitingSubmission => None,
        }
    }

    /// Selects a county, discarding any shown price if it changed.
    pub fn select_region(&mut self, region: impl Into<String>) {
        let region = region.into();
        if region != self.region {
            self.region = region;
            self.state = FormState::AwaitingSubmission;
        }
    }

    /// Sets the inputs, discarding any shown price if they changed.
    pub fn set_input(&mut self, input: HousingInput) {
        if input != self.input {
            self.input = input;
            self.state = FormState::AwaitingSubmission;
        }
    }

    /// Predicts the price for the current selection and inputs.
    ///
    /// On failure the form stays in [`FormState::AwaitingSubmission`].
    ///
    /// # Errors
    ///
    /// Returns [`PredictError`] if the county is unknown or the model fails.
    pub fn submit(
        &mut self,
        regions: &RegionDataset,
        model: &dyn PriceModel,
    ) -> Result<Prediction, PredictError> {
        self.state = FormState::AwaitingSubmission;

        let record = assemble_features(regions, &self.region, self.input)?;
        let prediction = invoke(model, &record)?;

        self.state = FormState::Predicted(prediction.clone());
        Ok(prediction)
    }
}
