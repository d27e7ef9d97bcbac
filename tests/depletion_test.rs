use assert_float_eq::assert_float_absolute_eq;
use std::io::Write;
use tempfile::NamedTempFile;

use survival_stock_rs::models::{
    IntakeTarget, ItemRecord, Metric, Nutrient, NutrientProfile, UndefinedReason,
};
use survival_stock_rs::{Inventory, load_inventory};

fn rice(count: u32) -> ItemRecord {
    ItemRecord {
        name: "riceX".to_string(),
        weight_grams: 500.0,
        item_count: count,
        consumed: false,
        density: NutrientProfile::complete([360.0, 7.0, 0.0, 80.0, 1.0]),
    }
}

#[test]
fn test_single_item_calories() {
    let inventory = Inventory::new(vec![rice(4)]).unwrap();
    let target = IntakeTarget {
        calories: 2000.0,
        ..Default::default()
    };

    let report = inventory.days_left(&target);
    let calories = report.get(Nutrient::Calories).unwrap();
    assert_float_absolute_eq!(calories.remaining, 7200.0, 1e-9);
    assert_eq!(calories.days, Metric::Value(3.6));
}

#[test]
fn test_zero_target_is_undefined() {
    let inventory = Inventory::new(vec![rice(4)]).unwrap();
    let target = IntakeTarget {
        calories: 0.0,
        ..Default::default()
    };

    let report = inventory.days_left(&target);
    assert_eq!(
        report.get(Nutrient::Calories).unwrap().days,
        Metric::Undefined(UndefinedReason::ZeroTarget)
    );
    assert_eq!(
        report.get(Nutrient::Calories).unwrap().days.to_string(),
        "undefined (target is zero)"
    );
    // Other nutrients still get estimates
    assert!(report.get(Nutrient::Protein).unwrap().days.is_defined());
}

#[test]
fn test_all_consumed_gives_zero_days() {
    let mut item = rice(4);
    item.consumed = true;
    let inventory = Inventory::new(vec![item]).unwrap();

    let report = inventory.days_left(&IntakeTarget::default());
    for entry in &report.entries {
        assert_eq!(entry.remaining, 0.0);
        assert_eq!(entry.days, Metric::Value(0.0));
    }
}

#[test]
fn test_more_stock_never_means_fewer_days() {
    let target = IntakeTarget::default();
    let mut previous = 0.0;

    for count in 0..20 {
        let inventory = Inventory::new(vec![rice(count)]).unwrap();
        let report = inventory.days_left(&target);
        let days = report
            .get(Nutrient::Calories)
            .unwrap()
            .days
            .value()
            .unwrap();
        assert!(days >= previous, "count {} gave {} < {}", count, days, previous);
        previous = days;
    }
}

#[test]
fn test_days_left_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "item;weight_grams;item_count;consumed;kcal_per_100g;grams_protein_per_100g;\
         grams_sugar_per_100g;grams_carbohydrates_per_100g;grams_fat_per_100g"
    )
    .unwrap();
    writeln!(file, "riceX;500;4;false;360;7;0;80;1").unwrap();
    writeln!(file, "oil;1000;1;true;884;0;0;0;100").unwrap();
    writeln!(file, "jam;400;2;false;250;0.4;;65;").unwrap();
    file.flush().unwrap();

    let inventory = load_inventory(file.path()).unwrap();
    assert_eq!(inventory.len(), 3);

    let target = IntakeTarget::default();
    let report = inventory.days_left(&target);

    // 7200 kcal from rice + 2000 kcal from jam; oil is consumed
    let calories = report.get(Nutrient::Calories).unwrap();
    assert_float_absolute_eq!(calories.remaining, 9200.0, 1e-9);
    assert_eq!(calories.days, Metric::Value(4.6));

    // Jam has no fat density, so only rice counts
    let fat = report.get(Nutrient::Fat).unwrap();
    assert_float_absolute_eq!(fat.remaining, 20.0, 1e-9);
    assert_eq!(fat.days, Metric::Value(0.5));

    assert_eq!(report.limiting().unwrap().nutrient, Nutrient::Sugar);
}
