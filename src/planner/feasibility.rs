use crate::models::ItemRecord;
use crate::planner::constants::GRAMS_PER_DENSITY_UNIT;

/// An item whose prescribed amount exceeds its stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortfall {
    pub item: String,
    pub required_grams: f64,
    pub available_grams: f64,
}

/// Grams implied by a fitted coefficient.
#[inline]
pub fn required_grams(coefficient: f64) -> f64 {
    coefficient * GRAMS_PER_DENSITY_UNIT
}

/// True when every item has enough stock for its coefficient.
///
/// `items` and `coefficients` are index-aligned.
pub fn is_feasible(items: &[&ItemRecord], coefficients: &[f64]) -> bool {
    debug_assert_eq!(items.len(), coefficients.len());
    items
        .iter()
        .zip(coefficients)
        .all(|(item, &coef)| required_grams(coef) <= item.available_grams())
}

/// Items that cannot cover their prescribed amount.
pub fn shortfalls(items: &[&ItemRecord], coefficients: &[f64]) -> Vec<Shortfall> {
    items
        .iter()
        .zip(coefficients)
        .filter_map(|(item, &coef)| {
            let required = required_grams(coef);
            let available = item.available_grams();
            (required > available).then(|| Shortfall {
                item: item.name.clone(),
                required_grams: required,
                available_grams: available,
            })
        })
        .collect()
}
