use assert_float_eq::assert_float_absolute_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

use survival_stock_rs::models::{IntakeTarget, ItemRecord, NutrientProfile};
use survival_stock_rs::interface::write_meals_json;
use survival_stock_rs::planner::{
    CancelToken, Combinations, LassoFitter, MealSearch, SearchMode, SearchStatus, is_feasible,
};
use survival_stock_rs::{Inventory, SearchConfig, StockError};

fn item(name: &str, weight: f64, count: u32, density: [f64; 5]) -> ItemRecord {
    ItemRecord {
        name: name.to_string(),
        weight_grams: weight,
        item_count: count,
        consumed: false,
        density: NutrientProfile::complete(density),
    }
}

/// Four items where only the pairs (A, P) and (B, P) fit within stock.
///
/// A covers calories, B covers protein, P covers both, Z covers sugar.
/// A, B and Z each hold 5000g but any fit that leans on them needs ~10kg.
fn four_item_pantry() -> (Inventory, IntakeTarget) {
    let inventory = Inventory::new(vec![
        item("A", 1000.0, 5, [1.0, 0.0, 0.0, 0.0, 0.0]),
        item("B", 1000.0, 5, [0.0, 1.0, 0.0, 0.0, 0.0]),
        item("P", 1000.0, 20, [1.0, 1.0, 0.0, 0.0, 0.0]),
        item("Z", 1000.0, 5, [0.0, 0.0, 1.0, 0.0, 0.0]),
    ])
    .unwrap();
    let target = IntakeTarget {
        calories: 100.0,
        protein: 100.0,
        sugar: 100.0,
        carbohydrates: 0.0,
        fat: 0.0,
    };
    (inventory, target)
}

fn pantry() -> Inventory {
    Inventory::new(vec![
        item("Rice", 1000.0, 5, [360.0, 7.0, 0.1, 80.0, 1.0]),
        item("Lentils", 500.0, 4, [350.0, 25.0, 2.0, 60.0, 1.0]),
        item("Oil", 1000.0, 1, [884.0, 0.0, 0.0, 0.0, 100.0]),
        item("Jam", 400.0, 2, [250.0, 0.4, 60.0, 65.0, 0.1]),
        item("Tuna", 150.0, 6, [130.0, 28.0, 0.0, 0.0, 1.0]),
        item("Oats", 1000.0, 2, [380.0, 13.0, 1.0, 60.0, 7.0]),
    ])
    .unwrap()
}

#[test]
fn test_only_feasible_pairs_are_ranked() {
    let (inventory, target) = four_item_pantry();
    let config = SearchConfig::default();
    let search = MealSearch::new(&inventory, &target, &config);

    assert_eq!(search.candidate_count(2), Some(6));

    let outcome = search.top_meals(2, 2, &[], &CancelToken::new()).unwrap();
    assert_eq!(outcome.evaluated, 6);
    assert_eq!(outcome.accepted, 2);

    let mut names: Vec<Vec<String>> =
        outcome.meals.iter().map(|m| m.item_names.clone()).collect();
    names.sort();
    assert_eq!(names, vec![vec!["A", "P"], vec!["B", "P"]]);

    for meal in &outcome.meals {
        let grams = meal.grams();
        assert_float_absolute_eq!(grams[0], 0.0, 1e-3);
        assert_float_absolute_eq!(grams[1], 10_000.0, 1.0);
    }
    assert!(outcome.meals[0].score.rank_cmp(&outcome.meals[1].score).is_ge());
}

#[test]
fn test_best_meal_counts_only_feasible_pairs() {
    let (inventory, target) = four_item_pantry();
    let config = SearchConfig::default();
    let search = MealSearch::new(&inventory, &target, &config);

    let outcome = search.best_meal(2, &CancelToken::new()).unwrap();
    assert_eq!(outcome.evaluated, 6);
    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.meals.len(), 1);
    assert_eq!(outcome.meals[0].item_names[1], "P");
}

#[test]
fn test_best_meal_export_keeps_counts() {
    let (inventory, target) = four_item_pantry();
    let config = SearchConfig::default();
    let search = MealSearch::new(&inventory, &target, &config);

    let outcome = match search.run(2, &SearchMode::Best, &CancelToken::new()).unwrap() {
        SearchStatus::Finished(outcome) => outcome,
        SearchStatus::Cancelled { .. } => panic!("search was not cancelled"),
    };

    let file = NamedTempFile::new().unwrap();
    write_meals_json(&outcome, file.path()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(value["evaluated"], 6);
    assert_eq!(value["accepted"], 2);
    assert_eq!(value["meals"].as_array().unwrap().len(), 1);
}

#[test]
fn test_time_limit_ends_both_modes_alike() {
    let inventory = pantry();
    let target = IntakeTarget::default();
    let cancel = CancelToken::new();
    cancel.cancel();

    let modes = [
        SearchMode::Top {
            n: 3,
            required: vec!["Rice".to_string()],
        },
        SearchMode::Best,
    ];
    for parallel in [false, true] {
        let config = SearchConfig {
            parallel,
            ..Default::default()
        };
        let search = MealSearch::new(&inventory, &target, &config);
        for mode in &modes {
            let status = search.run(2, mode, &cancel).unwrap();
            assert!(
                matches!(status, SearchStatus::Cancelled { evaluated: 0 }),
                "{:?} (parallel: {}) gave {:?}",
                mode,
                parallel,
                status
            );
        }
    }
}

#[test]
fn test_asking_for_more_meals_than_feasible() {
    let (inventory, target) = four_item_pantry();
    let config = SearchConfig::default();
    let search = MealSearch::new(&inventory, &target, &config);

    let outcome = search.top_meals(2, 10, &[], &CancelToken::new()).unwrap();
    assert_eq!(outcome.meals.len(), 2);
}

#[test]
fn test_no_feasible_meal() {
    let (inventory, target) = four_item_pantry();
    let config = SearchConfig::default();
    let search = MealSearch::new(&inventory, &target, &config);

    // Every pair holding Z needs about 10kg of it
    let result = search.top_meals(2, 1, &["Z".to_string()], &CancelToken::new());
    assert!(matches!(
        result,
        Err(StockError::NoFeasibleMeal { evaluated: 6 })
    ));
}

#[test]
fn test_best_meal_matches_top_one() {
    let inventory = pantry();
    let config = SearchConfig::default();
    let target = IntakeTarget::default();
    let search = MealSearch::new(&inventory, &target, &config);
    let cancel = CancelToken::new();

    for size in 1..=3 {
        let top = search.top_meals(size, 1, &[], &cancel);
        let best = search.best_meal(size, &cancel);
        match (top, best) {
            (Ok(top), Ok(best)) => {
                assert_eq!(top.meals[0], best.meals[0]);
                assert_eq!(top.evaluated, best.evaluated);
                assert_eq!(top.accepted, best.accepted);
            }
            (Err(StockError::NoFeasibleMeal { .. }), Err(StockError::NoFeasibleMeal { .. })) => {}
            (top, best) => panic!("size {}: {:?} vs {:?}", size, top, best),
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let inventory = pantry();
    let target = IntakeTarget::default();
    let sequential = SearchConfig::default();
    let parallel = SearchConfig {
        parallel: true,
        ..Default::default()
    };
    let cancel = CancelToken::new();

    let seq = MealSearch::new(&inventory, &target, &sequential);
    let par = MealSearch::new(&inventory, &target, &parallel);

    for size in 1..=3 {
        let a = seq.top_meals(size, 20, &[], &cancel);
        let b = par.top_meals(size, 20, &[], &cancel);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.evaluated, b.evaluated);
                assert_eq!(a.accepted, b.accepted);
                assert_eq!(a.meals, b.meals);
            }
            (Err(StockError::NoFeasibleMeal { .. }), Err(StockError::NoFeasibleMeal { .. })) => {}
            (a, b) => panic!("size {}: {:?} vs {:?}", size, a, b),
        }

        let a = seq.best_meal(size, &cancel).ok().map(|o| (o.meals, o.accepted));
        let b = par.best_meal(size, &cancel).ok().map(|o| (o.meals, o.accepted));
        assert_eq!(a, b);
    }
}

#[test]
fn test_cancelled_search_stops() {
    let inventory = pantry();
    let target = IntakeTarget::default();
    let cancel = CancelToken::new();
    cancel.cancel();

    for parallel in [false, true] {
        let config = SearchConfig {
            parallel,
            ..Default::default()
        };
        let search = MealSearch::new(&inventory, &target, &config);

        assert!(matches!(
            search.top_meals(2, 3, &[], &cancel),
            Err(StockError::Cancelled { evaluated: 0 })
        ));
        assert!(matches!(
            search.best_meal(2, &cancel),
            Err(StockError::Cancelled { evaluated: 0 })
        ));
    }
}

#[test]
fn test_random_fits_are_non_negative() {
    let mut rng = StdRng::seed_from_u64(7);
    let fitter = LassoFitter::default();

    for _ in 0..200 {
        let size = rng.gen_range(1..=4);
        let columns: Vec<[f64; 5]> = (0..size)
            .map(|_| std::array::from_fn(|_| rng.gen_range(0.0..500.0)))
            .collect();
        let target: [f64; 5] = std::array::from_fn(|_| rng.gen_range(0.0..2500.0));

        let fit = fitter.fit(&columns, &target);
        assert_eq!(fit.coefficients.len(), size);
        assert!(fit.coefficients.iter().all(|c| c.is_finite() && *c >= 0.0));
    }
}

#[test]
fn test_more_stock_keeps_meals_feasible() {
    let inventory = pantry();
    let fitter = SearchConfig::default().fitter();
    let target = IntakeTarget::default().as_array();
    let items = inventory.items();

    for combo in Combinations::new(items.len(), 2) {
        let chosen: Vec<&ItemRecord> = combo.iter().map(|&i| &items[i]).collect();
        let columns: Vec<[f64; 5]> = chosen.iter().map(|i| i.density.filled()).collect();
        let fit = fitter.fit(&columns, &target);

        if is_feasible(&chosen, &fit.coefficients) {
            let richer: Vec<ItemRecord> = chosen
                .iter()
                .map(|i| ItemRecord {
                    item_count: i.item_count + 3,
                    ..(*i).clone()
                })
                .collect();
            let richer: Vec<&ItemRecord> = richer.iter().collect();
            assert!(is_feasible(&richer, &fit.coefficients));
        }
    }
}
