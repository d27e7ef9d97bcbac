use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Result, StockError};
use crate::inventory::store::Inventory;
use crate::models::{ItemRecord, NUTRIENT_COUNT, Nutrient, NutrientProfile};

pub const ITEM_COLUMN: &str = "item";
pub const WEIGHT_COLUMN: &str = "weight_grams";
pub const COUNT_COLUMN: &str = "item_count";
pub const CONSUMED_COLUMN: &str = "consumed";

/// Column positions of the required fields.
struct Layout {
    item: usize,
    weight: usize,
    count: usize,
    consumed: usize,
    densities: [usize; NUTRIENT_COUNT],
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| StockError::MissingColumn(name.to_string()))
        };

        let mut densities = [0; NUTRIENT_COUNT];
        for nutrient in Nutrient::ALL {
            densities[nutrient.index()] = find(nutrient.column())?;
        }

        Ok(Self {
            item: find(ITEM_COLUMN)?,
            weight: find(WEIGHT_COLUMN)?,
            count: find(COUNT_COLUMN)?,
            consumed: find(CONSUMED_COLUMN)?,
            densities,
        })
    }
}

/// One row being parsed, for error reporting.
struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl Row<'_> {
    fn field(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or("")
    }

    fn malformed(&self, column: &str, value: &str) -> StockError {
        StockError::MalformedField {
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn number(&self, idx: usize, column: &str) -> Result<f64> {
        let raw = self.field(idx);
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.malformed(column, raw))
    }

    fn optional_density(&self, idx: usize, column: &str) -> Result<Option<f64>> {
        let raw = self.field(idx);
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        let value = self.number(idx, column)?;
        if value < 0.0 {
            return Err(self.malformed(column, raw));
        }
        Ok(Some(value))
    }

    fn count(&self, idx: usize) -> Result<u32> {
        let raw = self.field(idx);
        raw.parse::<u32>()
            .map_err(|_| self.malformed(COUNT_COLUMN, raw))
    }

    fn flag(&self, idx: usize) -> Result<bool> {
        let raw = self.field(idx);
        match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(self.malformed(CONSUMED_COLUMN, raw)),
        }
    }
}

fn parse_item(row: &Row<'_>, layout: &Layout) -> Result<ItemRecord> {
    let name = row.field(layout.item).to_string();
    if name.is_empty() {
        return Err(row.malformed(ITEM_COLUMN, ""));
    }

    let weight_grams = row.number(layout.weight, WEIGHT_COLUMN)?;
    if weight_grams <= 0.0 {
        return Err(row.malformed(WEIGHT_COLUMN, row.field(layout.weight)));
    }

    let mut density = NutrientProfile::default();
    for nutrient in Nutrient::ALL {
        density[nutrient] =
            row.optional_density(layout.densities[nutrient.index()], nutrient.column())?;
    }

    Ok(ItemRecord {
        name,
        weight_grams,
        item_count: row.count(layout.count)?,
        consumed: row.flag(layout.consumed)?,
        density,
    })
}

/// Parse a semicolon-delimited inventory table.
///
/// Fails on the first missing column or malformed value.
pub fn parse_inventory<R: Read>(reader: R) -> Result<Inventory> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .trim(Trim::All)
        .from_reader(reader);

    let layout = Layout::from_headers(rdr.headers()?)?;

    let mut items = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let item = parse_item(&Row { record: &record, line }, &layout)?;
        debug!(item = %item.debug_string(), "loaded item");
        items.push(item);
    }

    Inventory::new(items)
}

/// Load the inventory from a file.
pub fn load_inventory<P: AsRef<Path>>(path: P) -> Result<Inventory> {
    let file = File::open(path)?;
    parse_inventory(file)
}
