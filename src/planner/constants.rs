/// Densities are given per this many grams.
pub const GRAMS_PER_DENSITY_UNIT: f64 = 100.0;

/// Decimal places kept for days-left estimates.
pub const DAYS_LEFT_DECIMALS: i32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Meal search
// ─────────────────────────────────────────────────────────────────────────────

/// L1 penalty strength of the meal fit.
pub const LASSO_ALPHA: f64 = 0.001;

/// Coordinate descent sweep limit per fit.
pub const LASSO_MAX_ITERATIONS: usize = 10_000;

/// Largest coefficient update (in 100g units) still counted as movement.
pub const LASSO_TOLERANCE: f64 = 1e-7;

/// Items need at least this many known densities to join a meal search.
pub const MIN_PRESENT_NUTRIENTS: usize = 4;

/// Candidates between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 110;

/// Items per meal when none is given.
pub const DEFAULT_MEAL_SIZE: usize = 2;

/// Meals listed when none is given.
pub const DEFAULT_TOP_MEALS: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Default daily intake (adult, rough guideline values)
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_CALORIES: f64 = 2000.0;
pub const DEFAULT_PROTEIN: f64 = 50.0;
pub const DEFAULT_SUGAR: f64 = 25.0;
pub const DEFAULT_CARBOHYDRATES: f64 = 130.0;
pub const DEFAULT_FAT: f64 = 44.0;
