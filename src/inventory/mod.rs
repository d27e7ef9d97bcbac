mod loader;
mod store;

pub use loader::{load_inventory, parse_inventory};
pub use store::Inventory;
