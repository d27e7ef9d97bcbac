use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{Result, StockError};
use crate::models::{IntakeTarget, ItemRecord};
use crate::planner::depletion::{self, DaysLeftReport};

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Read-only snapshot of the stocked items.
///
/// Keeps file order, which fixes the meal enumeration order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<ItemRecord>,
    /// Lowercase name to position in `items`.
    index: HashMap<String, usize>,
}

impl Inventory {
    /// Build an inventory. Item names must be unique (case-insensitive).
    pub fn new(items: Vec<ItemRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.key(), i).is_some() {
                return Err(StockError::DuplicateItem(item.name.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Get an item by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.items[i])
    }

    /// All items in file order.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Items not yet consumed.
    pub fn unconsumed(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter().filter(|item| !item.consumed)
    }

    /// Closest item name to `name`, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.items
            .iter()
            .map(|item| (item, jaro_winkler(&item.key(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(item, _)| item.name.as_str())
    }

    /// Map a user-supplied name to the stored item name.
    pub fn resolve_name(&self, name: &str) -> Result<&str> {
        if let Some(item) = self.get(name.trim()) {
            return Ok(item.name.as_str());
        }
        let message = match self.suggest(name.trim()) {
            Some(suggestion) => format!("'{}' (did you mean '{}'?)", name, suggestion),
            None => format!("'{}'", name),
        };
        Err(StockError::ItemNotFound(message))
    }

    /// Days of supply left for each nutrient of the target.
    pub fn days_left(&self, target: &IntakeTarget) -> DaysLeftReport {
        depletion::days_left(&self.items, target)
    }

    /// Count of items in the inventory.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the inventory has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
