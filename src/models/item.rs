use serde::{Deserialize, Serialize};

use crate::models::nutrient::NutrientProfile;
use crate::planner::constants::GRAMS_PER_DENSITY_UNIT;

/// A stocked food item with its nutritional data.
///
/// Densities are per 100g; `weight_grams` is the weight of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub weight_grams: f64,
    pub item_count: u32,
    pub consumed: bool,
    pub density: NutrientProfile,
}

impl ItemRecord {
    /// Total grams physically in stock.
    #[inline]
    pub fn available_grams(&self) -> f64 {
        self.weight_grams * self.item_count as f64
    }

    /// Stock expressed in multiples of 100g.
    #[inline]
    pub fn density_units(&self) -> f64 {
        self.available_grams() / GRAMS_PER_DENSITY_UNIT
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        let densities: Vec<String> = self
            .density
            .iter()
            .map(|(n, v)| match v {
                Some(v) => format!("{}={}", n, v),
                None => format!("{}=?", n),
            })
            .collect();
        format!(
            "{}: {} x {}g{}, {}",
            self.name,
            self.item_count,
            self.weight_grams,
            if self.consumed { " (consumed)" } else { "" },
            densities.join(" ")
        )
    }
}
