use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of tracked nutrient dimensions.
pub const NUTRIENT_COUNT: usize = 5;

/// The five nutrient dimensions tracked per item and per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Sugar,
    Carbohydrates,
    Fat,
}

impl Nutrient {
    /// All nutrients, in intake-target field order.
    pub const ALL: [Nutrient; NUTRIENT_COUNT] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Sugar,
        Nutrient::Carbohydrates,
        Nutrient::Fat,
    ];

    /// Inventory column holding this nutrient's density per 100g.
    pub const fn column(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal_per_100g",
            Nutrient::Protein => "grams_protein_per_100g",
            Nutrient::Sugar => "grams_sugar_per_100g",
            Nutrient::Carbohydrates => "grams_carbohydrates_per_100g",
            Nutrient::Fat => "grams_fat_per_100g",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Sugar => "sugar",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::Fat => "fat",
        }
    }

    /// Display unit of the daily amount.
    pub const fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }

    /// Position in `Nutrient::ALL`.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-100g nutrient densities of an item. `None` marks missing data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile([Option<f64>; NUTRIENT_COUNT]);

impl NutrientProfile {
    pub fn new(values: [Option<f64>; NUTRIENT_COUNT]) -> Self {
        Self(values)
    }

    /// Profile with every density present.
    pub fn complete(values: [f64; NUTRIENT_COUNT]) -> Self {
        Self(values.map(Some))
    }

    /// Number of nutrients with a known density.
    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    /// Densities with missing values read as zero.
    pub fn filled(&self) -> [f64; NUTRIENT_COUNT] {
        self.0.map(|v| v.unwrap_or(0.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, Option<f64>)> + '_ {
        Nutrient::ALL.into_iter().map(|n| (n, self.0[n.index()]))
    }
}

impl Index<Nutrient> for NutrientProfile {
    type Output = Option<f64>;

    fn index(&self, nutrient: Nutrient) -> &Self::Output {
        &self.0[nutrient.index()]
    }
}

impl IndexMut<Nutrient> for NutrientProfile {
    fn index_mut(&mut self, nutrient: Nutrient) -> &mut Self::Output {
        &mut self.0[nutrient.index()]
    }
}
