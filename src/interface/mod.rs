pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_meals_csv, write_meals_json};
pub use prompts::{prompt_daily_amount, prompt_intake_target, prompt_yes_no};
pub use render::{display_days_left, display_item_list, display_meal, display_meals};
