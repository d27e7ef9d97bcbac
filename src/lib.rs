pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod planner;

pub use config::SearchConfig;
pub use error::{Result, StockError};
pub use inventory::{Inventory, load_inventory, parse_inventory};
pub use models::{IntakeTarget, ItemRecord, MealCandidate, Metric, Nutrient, NutrientProfile};
