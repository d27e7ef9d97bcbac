use clap::Parser;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use survival_stock_rs::cli::{Cli, Command, IntakeArgs};
use survival_stock_rs::config::SearchConfig;
use survival_stock_rs::error::Result;
use survival_stock_rs::interface::{
    display_days_left, display_item_list, display_meal, display_meals, prompt_intake_target,
    prompt_yes_no, write_meals_csv, write_meals_json,
};
use survival_stock_rs::inventory::load_inventory;
use survival_stock_rs::logging;
use survival_stock_rs::models::{IntakeTarget, Nutrient};
use survival_stock_rs::planner::{
    CancelToken, MealSearch, MealSearchOutcome, SearchMode, SearchStatus,
};

/// Searches with more candidates than this ask before starting.
const LARGE_SEARCH: u64 = 1_000_000;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::DaysLeft { intake } => cmd_days_left(&cli.file, &intake),
        Command::Meals {
            intake,
            size,
            top,
            require,
            best,
            parallel,
            config,
            csv,
            json,
            time_limit,
        } => cmd_meals(
            &cli.file,
            &intake,
            MealsOptions {
                size,
                top,
                require,
                best,
                parallel,
                config,
                csv,
                json,
                time_limit,
            },
        ),
        Command::List => cmd_list(&cli.file),
    }
}

struct MealsOptions {
    size: usize,
    top: usize,
    require: Vec<String>,
    best: bool,
    parallel: bool,
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    time_limit: Option<u64>,
}

/// Build the daily target: file or defaults, then flags, then prompts.
fn resolve_intake(args: &IntakeArgs) -> Result<IntakeTarget> {
    let mut target = match &args.intake {
        Some(path) => IntakeTarget::load(path)?,
        None => IntakeTarget::default(),
    };

    let overrides = [
        (Nutrient::Calories, args.calories),
        (Nutrient::Protein, args.protein),
        (Nutrient::Sugar, args.sugar),
        (Nutrient::Carbohydrates, args.carbohydrates),
        (Nutrient::Fat, args.fat),
    ];
    for (nutrient, value) in overrides {
        if let Some(value) = value {
            target.set(nutrient, value);
        }
    }

    if args.interactive {
        target = prompt_intake_target(&target)?;
    }

    target.validate()?;
    Ok(target)
}

/// Report how long each nutrient lasts.
fn cmd_days_left(file: &Path, intake: &IntakeArgs) -> Result<()> {
    let inventory = load_inventory(file)?;
    let target = resolve_intake(intake)?;

    info!(items = inventory.len(), "inventory loaded");
    if inventory.unconsumed().next().is_none() {
        println!("All items are consumed.");
    }

    let report = inventory.days_left(&target);
    display_days_left(&report, &target);
    Ok(())
}

/// Search for the meals that best cover the daily target.
fn cmd_meals(file: &Path, intake: &IntakeArgs, opts: MealsOptions) -> Result<()> {
    let inventory = load_inventory(file)?;
    let target = resolve_intake(intake)?;

    let mut config = match &opts.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    config.parallel |= opts.parallel;

    let search = MealSearch::new(&inventory, &target, &config);
    println!(
        "{} of {} items take part in the search.",
        search.pool().len(),
        inventory.len()
    );

    let count = search.candidate_count(opts.size);
    match count {
        Some(count) if count > LARGE_SEARCH && intake.interactive => {
            let proceed = prompt_yes_no(
                &format!("{} candidate meals to evaluate. Continue?", count),
                false,
            )?;
            if !proceed {
                println!("Search skipped.");
                return Ok(());
            }
        }
        None => warn!(size = opts.size, "candidate count overflows; search may not finish"),
        _ => {}
    }

    let cancel = CancelToken::new();
    if let Some(secs) = opts.time_limit {
        let token = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            token.cancel();
        });
    }

    let mode = if opts.best {
        if !opts.require.is_empty() {
            warn!("required items are ignored when searching for the single best meal");
        }
        SearchMode::Best
    } else {
        SearchMode::Top {
            n: opts.top,
            required: opts.require.clone(),
        }
    };

    let outcome = match search.run(opts.size, &mode, &cancel)? {
        SearchStatus::Finished(outcome) => outcome,
        SearchStatus::Cancelled { evaluated } => {
            println!("Time limit reached after {} candidates.", evaluated);
            return Ok(());
        }
    };

    match mode {
        SearchMode::Best => {
            println!();
            for meal in &outcome.meals {
                display_meal(1, meal);
            }
        }
        SearchMode::Top { .. } => display_meals(&outcome),
    }
    export(&outcome, &opts)
}

fn export(outcome: &MealSearchOutcome, opts: &MealsOptions) -> Result<()> {
    if let Some(path) = &opts.csv {
        write_meals_csv(&outcome.meals, path)?;
        println!("Meals written to {}", path.display());
    }
    if let Some(path) = &opts.json {
        write_meals_json(outcome, path)?;
        println!("Meals written to {}", path.display());
    }
    Ok(())
}

/// List every item, consumed ones separately.
fn cmd_list(file: &Path) -> Result<()> {
    let inventory = load_inventory(file)?;

    let (consumed, in_stock): (Vec<_>, Vec<_>) =
        inventory.items().iter().partition(|item| item.consumed);

    display_item_list(&in_stock, "In stock");
    display_item_list(&consumed, "Consumed");
    Ok(())
}
