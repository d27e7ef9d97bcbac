use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockError};
use crate::models::nutrient::{NUTRIENT_COUNT, Nutrient};
use crate::planner::constants::{
    DEFAULT_CALORIES, DEFAULT_CARBOHYDRATES, DEFAULT_FAT, DEFAULT_PROTEIN, DEFAULT_SUGAR,
};

/// Daily minimum intake, one amount per nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeTarget {
    pub calories: f64,
    pub protein: f64,
    pub sugar: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl Default for IntakeTarget {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIES,
            protein: DEFAULT_PROTEIN,
            sugar: DEFAULT_SUGAR,
            carbohydrates: DEFAULT_CARBOHYDRATES,
            fat: DEFAULT_FAT,
        }
    }
}

impl IntakeTarget {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Sugar => self.sugar,
            Nutrient::Carbohydrates => self.carbohydrates,
            Nutrient::Fat => self.fat,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        match nutrient {
            Nutrient::Calories => self.calories = value,
            Nutrient::Protein => self.protein = value,
            Nutrient::Sugar => self.sugar = value,
            Nutrient::Carbohydrates => self.carbohydrates = value,
            Nutrient::Fat => self.fat = value,
        }
    }

    /// Targets in `Nutrient::ALL` order.
    pub fn as_array(&self) -> [f64; NUTRIENT_COUNT] {
        Nutrient::ALL.map(|n| self.get(n))
    }

    /// Reject negative or non-finite amounts. Zero is allowed and reported
    /// as undefined downstream.
    pub fn validate(&self) -> Result<()> {
        for nutrient in Nutrient::ALL {
            let value = self.get(nutrient);
            if !value.is_finite() || value < 0.0 {
                return Err(StockError::InvalidInput(format!(
                    "daily {} target must be a non-negative number, got {}",
                    nutrient, value
                )));
            }
        }
        Ok(())
    }

    /// Load a target from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let target: IntakeTarget = serde_json::from_str(&content)?;
        target.validate()?;
        Ok(target)
    }
}
