use crate::models::{IntakeTarget, ItemRecord, MealCandidate, Metric};
use crate::planner::{DaysLeftReport, MealSearchOutcome};

/// Display how many days the stock lasts per nutrient.
pub fn display_days_left(report: &DaysLeftReport, target: &IntakeTarget) {
    println!();
    println!("=== Days Left ===");
    println!();

    let width = report
        .entries
        .iter()
        .map(|e| e.nutrient.name().len())
        .max()
        .unwrap_or(8);

    for entry in &report.entries {
        let unit = entry.nutrient.unit();
        let days = match entry.days {
            Metric::Value(days) => format!("{:.1} days", days),
            Metric::Undefined(reason) => reason.to_string(),
        };
        println!(
            "  - {:<width$}  {:>10}  ({:.0} {} left, {} {} per day)",
            entry.nutrient.name(),
            days,
            entry.remaining,
            unit,
            target.get(entry.nutrient),
            unit,
            width = width
        );
    }

    if let Some(limiting) = report.limiting() {
        println!();
        println!("{} runs out first.", capitalize(limiting.nutrient.name()));
    }
    println!();
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_score(score: &Metric) -> String {
    match score {
        Metric::Value(v) => format!("{:.4}", v),
        Metric::Undefined(reason) => reason.to_string(),
    }
}

/// Display one meal with its item amounts.
pub fn display_meal(rank: usize, meal: &MealCandidate) {
    println!("--------- Meal {} ----------", rank);
    let width = meal.item_names.iter().map(|n| n.len()).max().unwrap_or(10);
    for (name, grams) in meal.item_names.iter().zip(meal.grams()) {
        println!("  {:<width$}  {:>8.1} g", name, grams, width = width);
    }
    println!("  R²: {}", format_score(&meal.score));
    println!();
}

/// Display ranked meals from a top-N search.
pub fn display_meals(outcome: &MealSearchOutcome) {
    println!();
    println!("=== Best Meals ===");
    println!();

    for (i, meal) in outcome.meals.iter().enumerate() {
        display_meal(i + 1, meal);
    }

    println!("--- Summary ---");
    println!("Candidates evaluated: {}", outcome.evaluated);
    println!("Feasible candidates: {}", outcome.accepted);
    println!("Meals shown: {}", outcome.meals.len());
    println!();
}

/// Display a simple list of items with their details.
pub fn display_item_list(items: &[&ItemRecord], title: &str) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    for item in items {
        println!("  {}", item.debug_string());
    }

    println!();
}
