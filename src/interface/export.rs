use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{MealCandidate, Metric};
use crate::planner::{MealSearchOutcome, round_to};

fn score_cell(score: &Metric) -> String {
    match score {
        Metric::Value(v) => format!("{:.6}", v),
        Metric::Undefined(_) => String::new(),
    }
}

/// Write ranked meals to a CSV file, one row per item.
pub fn write_meals_csv(meals: &[MealCandidate], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["rank", "item", "grams", "score"])?;

    for (i, meal) in meals.iter().enumerate() {
        for (name, grams) in meal.item_names.iter().zip(meal.grams()) {
            wtr.write_record([
                (i + 1).to_string(),
                name.clone(),
                format!("{:.1}", grams),
                score_cell(&meal.score),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the search outcome to a JSON file.
pub fn write_meals_json(outcome: &MealSearchOutcome, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "evaluated": outcome.evaluated,
        "accepted": outcome.accepted,
        "meals": outcome.meals.iter().enumerate().map(|(i, meal)| {
            serde_json::json!({
                "rank": i + 1,
                "items": meal.item_names,
                "grams": meal.grams().into_iter().map(|g| round_to(g, 1)).collect::<Vec<_>>(),
                "score": meal.score,
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UndefinedReason;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_outcome() -> MealSearchOutcome {
        MealSearchOutcome {
            meals: vec![
                MealCandidate::new(
                    2,
                    vec!["Rice".to_string(), "Oil".to_string()],
                    vec![5.123, 0.25],
                    Metric::Value(0.97),
                ),
                MealCandidate::new(
                    0,
                    vec!["Rice".to_string(), "Jam".to_string()],
                    vec![0.0, 0.0],
                    Metric::Undefined(UndefinedReason::ZeroVariance),
                ),
            ],
            evaluated: 3,
            accepted: 2,
        }
    }

    #[test]
    fn test_write_meals_csv() {
        let file = NamedTempFile::new().unwrap();
        write_meals_csv(&sample_outcome().meals, file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "rank,item,grams,score");
        assert_eq!(lines[1], "1,Rice,512.3,0.970000");
        assert_eq!(lines[2], "1,Oil,25.0,0.970000");
        assert_eq!(lines[3], "2,Rice,0.0,");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_write_meals_json() {
        let file = NamedTempFile::new().unwrap();
        write_meals_json(&sample_outcome(), file.path()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(value["evaluated"], 3);
        assert_eq!(value["meals"][0]["items"][1], "Oil");
        assert_eq!(value["meals"][0]["grams"][0], 512.3);
        assert_eq!(value["meals"][0]["score"]["value"], 0.97);
        assert_eq!(value["meals"][1]["score"]["undefined"], "zero_variance");
    }
}
