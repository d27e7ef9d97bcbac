use dialoguer::{Confirm, Input};

use crate::error::{Result, StockError};
use crate::models::{IntakeTarget, Nutrient};

/// Prompt for one daily minimum.
pub fn prompt_daily_amount(nutrient: Nutrient, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!(
            "Daily minimum {} ({})",
            nutrient.name(),
            nutrient.unit()
        ))
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| StockError::InvalidInput(format!("Invalid number: {}", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(StockError::InvalidInput(format!(
            "Daily {} must be >= 0",
            nutrient
        )));
    }

    Ok(value)
}

/// Prompt for every daily minimum, offering `defaults` as answers.
pub fn prompt_intake_target(defaults: &IntakeTarget) -> Result<IntakeTarget> {
    let mut target = *defaults;
    for nutrient in Nutrient::ALL {
        let value = prompt_daily_amount(nutrient, defaults.get(nutrient))?;
        target.set(nutrient, value);
    }
    Ok(target)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
