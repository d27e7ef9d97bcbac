pub mod cancel;
pub mod combinations;
pub mod constants;
pub mod depletion;
pub mod feasibility;
pub mod lasso;
pub mod ranking;
pub mod search;

pub use cancel::CancelToken;
pub use combinations::{Combinations, combination_count};
pub use constants::*;
pub use depletion::{DaysLeft, DaysLeftReport, days_for, days_left, remaining_amount, round_to};
pub use feasibility::{Shortfall, is_feasible, required_grams, shortfalls};
pub use lasso::{Column, FitOutcome, LassoFitter, r_squared};
pub use ranking::{BestMeal, rank_top, satisfies_required};
pub use search::{MealSearch, MealSearchOutcome, SearchMode, SearchStatus, candidate_pool};
