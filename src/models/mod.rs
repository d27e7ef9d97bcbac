pub mod intake;
pub mod item;
pub mod meal;
pub mod nutrient;

pub use intake::IntakeTarget;
pub use item::ItemRecord;
pub use meal::{MealCandidate, Metric, UndefinedReason};
pub use nutrient::{NUTRIENT_COUNT, Nutrient, NutrientProfile};
