use tracing::debug;

use crate::models::{IntakeTarget, ItemRecord, Metric, Nutrient, UndefinedReason};
use crate::planner::constants::DAYS_LEFT_DECIMALS;

/// Days-left estimate for one nutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaysLeft {
    pub nutrient: Nutrient,
    /// Total amount of the nutrient left in stock.
    pub remaining: f64,
    pub days: Metric,
}

/// Days-left estimates in intake-target order.
#[derive(Debug, Clone, PartialEq)]
pub struct DaysLeftReport {
    pub entries: Vec<DaysLeft>,
}

impl DaysLeftReport {
    pub fn get(&self, nutrient: Nutrient) -> Option<&DaysLeft> {
        self.entries.iter().find(|e| e.nutrient == nutrient)
    }

    /// The nutrient that runs out first, if any estimate is defined.
    pub fn limiting(&self) -> Option<&DaysLeft> {
        self.entries
            .iter()
            .filter(|e| e.days.is_defined())
            .min_by(|a, b| a.days.rank_cmp(&b.days))
    }
}

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Amount of a nutrient left across unconsumed items.
///
/// Items with a missing density for the nutrient contribute nothing.
pub fn remaining_amount<'a, I>(items: I, nutrient: Nutrient) -> f64
where
    I: IntoIterator<Item = &'a ItemRecord>,
{
    items
        .into_iter()
        .filter(|item| !item.consumed)
        .filter_map(|item| {
            item.density[nutrient].map(|density| item.density_units() * density)
        })
        .sum()
}

/// Days the remaining amount lasts at the daily target, to one decimal.
pub fn days_for(remaining: f64, daily_target: f64) -> Metric {
    if daily_target == 0.0 {
        return Metric::Undefined(UndefinedReason::ZeroTarget);
    }
    Metric::Value(round_to(remaining / daily_target, DAYS_LEFT_DECIMALS))
}

/// Estimate how many days the stock covers each nutrient target.
pub fn days_left(items: &[ItemRecord], target: &IntakeTarget) -> DaysLeftReport {
    let entries = Nutrient::ALL
        .into_iter()
        .map(|nutrient| {
            let remaining = remaining_amount(items, nutrient);
            let days = days_for(remaining, target.get(nutrient));
            debug!(%nutrient, remaining, %days, "estimated days left");
            DaysLeft {
                nutrient,
                remaining,
                days,
            }
        })
        .collect();

    DaysLeftReport { entries }
}
