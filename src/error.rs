use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Inventory is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed value '{value}' in column '{column}' on line {line}")]
    MalformedField {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Duplicate item in inventory: {0}")]
    DuplicateItem(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No candidates to evaluate: cannot pick {size} items from a pool of {pool}")]
    NoCandidates { pool: usize, size: usize },

    #[error("No feasible combination found among {evaluated} evaluated candidates")]
    NoFeasibleMeal { evaluated: u64 },

    #[error("Search cancelled after {evaluated} candidates")]
    Cancelled { evaluated: u64 },
}

pub type Result<T> = std::result::Result<T, StockError>;
