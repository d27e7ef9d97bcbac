use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::planner::{DEFAULT_MEAL_SIZE, DEFAULT_TOP_MEALS};

/// SurvivalStock: how long the pantry lasts, and which meals to cook from it.
#[derive(Parser, Debug)]
#[command(name = "survival_stock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the `;`-separated inventory file.
    #[arg(short, long, default_value = "inventory.csv", global = true)]
    pub file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Daily minimum intake. Flags override values from `--intake`.
#[derive(Args, Debug, Default, Clone)]
pub struct IntakeArgs {
    /// JSON file with daily minimums.
    #[arg(long)]
    pub intake: Option<PathBuf>,

    /// Daily minimum calories (kcal).
    #[arg(long)]
    pub calories: Option<f64>,

    /// Daily minimum protein (g).
    #[arg(long)]
    pub protein: Option<f64>,

    /// Daily minimum sugar (g).
    #[arg(long)]
    pub sugar: Option<f64>,

    /// Daily minimum carbohydrates (g).
    #[arg(long)]
    pub carbohydrates: Option<f64>,

    /// Daily minimum fat (g).
    #[arg(long)]
    pub fat: Option<f64>,

    /// Ask for each daily minimum.
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate how many days the stock lasts per nutrient.
    DaysLeft {
        #[command(flatten)]
        intake: IntakeArgs,
    },

    /// Search for meals that best match the daily minimums.
    Meals {
        #[command(flatten)]
        intake: IntakeArgs,

        /// Items per meal.
        #[arg(short, long, default_value_t = DEFAULT_MEAL_SIZE)]
        size: usize,

        /// Number of meals to show.
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_MEALS)]
        top: usize,

        /// Item every meal must contain (repeatable).
        #[arg(short, long = "require", value_name = "ITEM")]
        require: Vec<String>,

        /// Only report the single best feasible meal.
        #[arg(long)]
        best: bool,

        /// Evaluate candidates in parallel.
        #[arg(long)]
        parallel: bool,

        /// JSON file with search settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the meals to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the meals to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Stop the search after this many seconds.
        #[arg(long, value_name = "SECS")]
        time_limit: Option<u64>,
    },

    /// List inventory items.
    List,
}

impl Default for Command {
    fn default() -> Self {
        Command::DaysLeft {
            intake: IntakeArgs::default(),
        }
    }
}
