use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::error::{Result, StockError};
use crate::inventory::Inventory;
use crate::models::{IntakeTarget, ItemRecord, MealCandidate};
use crate::planner::cancel::CancelToken;
use crate::planner::combinations::{Combinations, combination_count};
use crate::planner::feasibility::{is_feasible, shortfalls};
use crate::planner::lasso::{Column, LassoFitter};
use crate::planner::ranking::{BestMeal, rank_top, satisfies_required};

/// Ranked meals from a top-N search.
#[derive(Debug, Clone)]
pub struct MealSearchOutcome {
    pub meals: Vec<MealCandidate>,
    /// Candidates fitted.
    pub evaluated: u64,
    /// Candidates that were feasible and contained the required items.
    pub accepted: u64,
}

/// Which meals a search reports.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMode {
    /// Best `n` feasible meals containing every required item.
    Top { n: usize, required: Vec<String> },
    /// The single best feasible meal.
    Best,
}

/// How a search ended.
#[derive(Debug, Clone)]
pub enum SearchStatus {
    Finished(MealSearchOutcome),
    Cancelled { evaluated: u64 },
}

/// A fitted candidate and whether stock covers it.
struct Evaluation {
    candidate: MealCandidate,
    feasible: bool,
}

/// Counts evaluated candidates and reports progress.
struct Progress {
    total: Option<u64>,
    interval: u64,
    seen: AtomicU64,
}

impl Progress {
    fn new(total: Option<u64>, interval: u64) -> Self {
        Self {
            total,
            interval,
            seen: AtomicU64::new(0),
        }
    }

    fn tick(&self) {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval == 0 || seen % self.interval != 0 {
            return;
        }
        match self.total {
            Some(total) if total > 0 => {
                let pct = (seen as f64 * 100.0 / total as f64 * 10.0).round() / 10.0;
                info!(evaluated = seen, total, "{}% of candidates evaluated", pct);
            }
            _ => info!(evaluated = seen, "candidates evaluated"),
        }
    }

    fn seen(&self) -> u64 {
        self.seen.load(Ordering::Relaxed)
    }
}

/// Items eligible for meal search, in inventory order.
///
/// Drops items with too few known densities and, if configured, items
/// already consumed.
pub fn candidate_pool<'a>(inventory: &'a Inventory, config: &SearchConfig) -> Vec<&'a ItemRecord> {
    inventory
        .items()
        .iter()
        .filter(|item| !(config.skip_consumed && item.consumed))
        .filter(|item| {
            let keep = item.density.present_count() >= config.min_present_nutrients;
            if !keep {
                debug!(item = %item.name, "excluded from meal search: too many missing nutrients");
            }
            keep
        })
        .collect()
}

/// Meal search over one inventory snapshot and intake target.
pub struct MealSearch<'a> {
    pool: Vec<&'a ItemRecord>,
    columns: Vec<Column>,
    target: Column,
    fitter: LassoFitter,
    config: SearchConfig,
    inventory: &'a Inventory,
}

impl<'a> MealSearch<'a> {
    pub fn new(inventory: &'a Inventory, target: &IntakeTarget, config: &SearchConfig) -> Self {
        let pool = candidate_pool(inventory, config);
        let columns = pool.iter().map(|item| item.density.filled()).collect();
        Self {
            pool,
            columns,
            target: target.as_array(),
            fitter: config.fitter(),
            config: config.clone(),
            inventory,
        }
    }

    /// Items taking part in the search.
    pub fn pool(&self) -> &[&'a ItemRecord] {
        &self.pool
    }

    /// Number of subsets of `size` items, if it fits in a `u64`.
    pub fn candidate_count(&self, size: usize) -> Option<u64> {
        combination_count(self.pool.len(), size)
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(StockError::InvalidInput(
                "meal size must be at least 1".to_string(),
            ));
        }
        if size > self.pool.len() {
            return Err(StockError::NoCandidates {
                pool: self.pool.len(),
                size,
            });
        }
        Ok(())
    }

    /// Fit one subset and check it against stock.
    fn evaluate(&self, index: u64, combo: &[usize]) -> Evaluation {
        let items: Vec<&ItemRecord> = combo.iter().map(|&i| self.pool[i]).collect();
        let columns: Vec<Column> = combo.iter().map(|&i| self.columns[i]).collect();

        let fit = self.fitter.fit(&columns, &self.target);
        if !fit.converged {
            debug!(index, iterations = fit.iterations, "fit stopped before converging");
        }

        let feasible = is_feasible(&items, &fit.coefficients);
        if !feasible {
            for short in shortfalls(&items, &fit.coefficients) {
                trace!(
                    index,
                    item = %short.item,
                    required = short.required_grams,
                    available = short.available_grams,
                    "candidate exceeds stock"
                );
            }
        }

        let names = items.iter().map(|item| item.name.clone()).collect();
        Evaluation {
            candidate: MealCandidate::new(index, names, fit.coefficients, fit.score),
            feasible,
        }
    }

    /// Canonical names of required items, all of which must be in the pool.
    fn resolve_required(&self, required: &[String]) -> Result<Vec<String>> {
        required
            .iter()
            .map(|name| {
                let name = self.inventory.resolve_name(name)?;
                if !self.pool.iter().any(|item| item.name == name) {
                    return Err(StockError::InvalidInput(format!(
                        "required item '{}' is excluded from the search (consumed or too many missing nutrients)",
                        name
                    )));
                }
                Ok(name.to_string())
            })
            .collect()
    }

    /// Best `n` feasible meals of `size` items that contain every required
    /// item, ranked by fit score.
    pub fn top_meals(
        &self,
        size: usize,
        n: usize,
        required: &[String],
        cancel: &CancelToken,
    ) -> Result<MealSearchOutcome> {
        if n == 0 {
            return Err(StockError::InvalidInput(
                "number of meals must be at least 1".to_string(),
            ));
        }
        let required = self.resolve_required(required)?;
        self.check_size(size)?;

        let progress = Progress::new(self.candidate_count(size), self.config.progress_interval);
        info!(
            items = self.pool.len(),
            size,
            candidates = ?progress.total,
            "searching for best meals"
        );

        let keep = |eval: Evaluation| -> Option<MealCandidate> {
            (eval.feasible && satisfies_required(&eval.candidate.item_names, &required))
                .then_some(eval.candidate)
        };

        let accepted: Vec<MealCandidate> = if self.config.parallel {
            Combinations::new(self.pool.len(), size)
                .enumerate()
                .par_bridge()
                .map(|(index, combo)| {
                    if cancel.is_cancelled() {
                        return Err(StockError::Cancelled {
                            evaluated: progress.seen(),
                        });
                    }
                    let eval = self.evaluate(index as u64, &combo);
                    progress.tick();
                    Ok(keep(eval))
                })
                .filter_map(Result::transpose)
                .collect::<Result<Vec<_>>>()?
        } else {
            let mut accepted = Vec::new();
            for (index, combo) in Combinations::new(self.pool.len(), size).enumerate() {
                if cancel.is_cancelled() {
                    return Err(StockError::Cancelled {
                        evaluated: progress.seen(),
                    });
                }
                let eval = self.evaluate(index as u64, &combo);
                progress.tick();
                accepted.extend(keep(eval));
            }
            accepted
        };

        let evaluated = progress.seen();
        if accepted.is_empty() {
            return Err(StockError::NoFeasibleMeal { evaluated });
        }

        let accepted_count = accepted.len() as u64;
        info!(evaluated, accepted = accepted_count, "meal search done");

        Ok(MealSearchOutcome {
            meals: rank_top(accepted, n),
            evaluated,
            accepted: accepted_count,
        })
    }

    /// Single best feasible meal of `size` items, as a one-meal outcome.
    pub fn best_meal(&self, size: usize, cancel: &CancelToken) -> Result<MealSearchOutcome> {
        self.check_size(size)?;

        let progress = Progress::new(self.candidate_count(size), self.config.progress_interval);
        info!(
            items = self.pool.len(),
            size,
            candidates = ?progress.total,
            "searching for the best meal"
        );

        let best = if self.config.parallel {
            Combinations::new(self.pool.len(), size)
                .enumerate()
                .par_bridge()
                .try_fold(BestMeal::new, |mut best, (index, combo)| {
                    if cancel.is_cancelled() {
                        return Err(StockError::Cancelled {
                            evaluated: progress.seen(),
                        });
                    }
                    let eval = self.evaluate(index as u64, &combo);
                    progress.tick();
                    best.offer(eval.candidate, eval.feasible);
                    Ok(best)
                })
                .try_reduce(BestMeal::new, |a, b| Ok(a.merge(b)))?
        } else {
            let mut best = BestMeal::new();
            for (index, combo) in Combinations::new(self.pool.len(), size).enumerate() {
                if cancel.is_cancelled() {
                    return Err(StockError::Cancelled {
                        evaluated: progress.seen(),
                    });
                }
                let eval = self.evaluate(index as u64, &combo);
                progress.tick();
                if best.offer(eval.candidate, eval.feasible) {
                    debug!(index, "new best meal");
                }
            }
            best
        };

        let evaluated = progress.seen();
        let accepted = best.accepted();
        let meal = best
            .into_inner()
            .ok_or(StockError::NoFeasibleMeal { evaluated })?;
        info!(evaluated, accepted, "best meal search done");

        Ok(MealSearchOutcome {
            meals: vec![meal],
            evaluated,
            accepted,
        })
    }

    /// Run a search in the given mode. A cancelled search is reported as
    /// `SearchStatus::Cancelled` rather than an error.
    pub fn run(
        &self,
        size: usize,
        mode: &SearchMode,
        cancel: &CancelToken,
    ) -> Result<SearchStatus> {
        let result = match mode {
            SearchMode::Top { n, required } => self.top_meals(size, *n, required, cancel),
            SearchMode::Best => self.best_meal(size, cancel),
        };
        match result {
            Ok(outcome) => Ok(SearchStatus::Finished(outcome)),
            Err(StockError::Cancelled { evaluated }) => Ok(SearchStatus::Cancelled { evaluated }),
            Err(e) => Err(e),
        }
    }
}
