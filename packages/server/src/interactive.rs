//! Interactive terminal mode.
//!
//! Walks the user through the same form as the dashboard page: pick a
//! county, set the housing median age and median income, then submit.

use dialoguer::{Confirm, Input, Select};
use house_price_housing_models::{
    HOUSING_MEDIAN_AGE_MAX, HOUSING_MEDIAN_AGE_MIN, HousingInput, MEDIAN_INCOME_MAX,
    MEDIAN_INCOME_MIN, MEDIAN_INCOME_STEP,
};
use house_price_prediction::{ArtifactStore, PredictionForm};

/// Runs the prediction form in the terminal until the user stops.
///
/// # Errors
///
/// Returns an error if an artifact fails to load, a prompt cannot be
/// read, or the model fails.
pub fn run(store: &ArtifactStore) -> Result<(), Box<dyn std::error::Error>> {
    println!("House Price Dashboard");
    println!();

    let regions = store.regions()?;
    let model = store.model()?;

    let Some(mut form) = PredictionForm::for_dataset(&regions) else {
        println!("No counties available in {}", store.paths().regions.display());
        return Ok(());
    };

    let names = regions.names();

    loop {
        let current = names.iter().position(|n| *n == form.region()).unwrap_or(0);
        let idx = Select::new()
            .with_prompt("County")
            .items(&names)
            .default(current)
            .interact()?;
        form.select_region(names[idx]);

        let age: u8 = Input::new()
            .with_prompt(format!(
                "Housing median age ({HOUSING_MEDIAN_AGE_MIN}-{HOUSING_MEDIAN_AGE_MAX})"
            ))
            .default(form.input().housing_median_age())
            .validate_with(|age: &u8| -> Result<(), String> {
                HousingInput::new(*age, MEDIAN_INCOME_MIN)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        let income: u8 = Input::new()
            .with_prompt(format!(
                "Median income in thousands of US$ ({MEDIAN_INCOME_MIN}-{MEDIAN_INCOME_MAX}, step {MEDIAN_INCOME_STEP})"
            ))
            .default(form.input().median_income())
            .validate_with(|income: &u8| -> Result<(), String> {
                HousingInput::new(HOUSING_MEDIAN_AGE_MIN, *income)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        form.set_input(HousingInput::new(age, income)?);

        if Confirm::new()
            .with_prompt("Predict price?")
            .default(true)
            .interact()?
        {
            let prediction = form.submit(&regions, model.as_ref())?;
            println!();
            println!("Predicted price for {}: {}", form.region(), prediction.display);
            println!();
        }

        if !Confirm::new()
            .with_prompt("Predict another?")
            .default(true)
            .interact()?
        {
            return Ok(());
        }
    }
}
