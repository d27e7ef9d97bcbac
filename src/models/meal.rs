use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::planner::constants::GRAMS_PER_DENSITY_UNIT;

/// Why a metric has no numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The daily target for the nutrient is zero.
    ZeroTarget,
    /// The target vector has no variance, so R² is undefined.
    ZeroVariance,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::ZeroTarget => f.write_str("undefined (target is zero)"),
            UndefinedReason::ZeroVariance => f.write_str("undefined (fit-trivial)"),
        }
    }
}

/// A number, or a tagged reason why there is none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Value(f64),
    Undefined(UndefinedReason),
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    /// Ranking order: any value beats undefined, values compare numerically.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Metric::Value(a), Metric::Value(b)) => a.total_cmp(b),
            (Metric::Value(_), Metric::Undefined(_)) => Ordering::Greater,
            (Metric::Undefined(_), Metric::Value(_)) => Ordering::Less,
            (Metric::Undefined(_), Metric::Undefined(_)) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{}", v),
            Metric::Undefined(reason) => write!(f, "{}", reason),
        }
    }
}

/// A fitted combination of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealCandidate {
    /// Position in enumeration order; breaks score ties.
    pub index: u64,

    pub item_names: Vec<String>,

    /// Non-negative multiples of 100g, aligned with `item_names`.
    pub coefficients: Vec<f64>,

    /// Coefficient of determination of the fit.
    pub score: Metric,
}

impl MealCandidate {
    pub fn new(index: u64, item_names: Vec<String>, coefficients: Vec<f64>, score: Metric) -> Self {
        debug_assert_eq!(item_names.len(), coefficients.len());
        Self {
            index,
            item_names,
            coefficients,
            score,
        }
    }

    /// Prescribed amount of each item in grams.
    pub fn grams(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .map(|c| c * GRAMS_PER_DENSITY_UNIT)
            .collect()
    }

    /// Total ordering used by the ranker: higher score first, then earlier
    /// enumeration index first.
    pub fn rank_order(&self, other: &Self) -> Ordering {
        other
            .score
            .rank_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}
