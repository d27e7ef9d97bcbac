use std::cmp::Ordering;

use crate::models::MealCandidate;

/// True when the candidate contains every required item.
pub fn satisfies_required(item_names: &[String], required: &[String]) -> bool {
    required.iter().all(|r| item_names.contains(r))
}

/// Best `n` candidates: score descending, enumeration order on ties.
///
/// Sorting on (score, index) keeps the result independent of the order
/// candidates arrived in.
pub fn rank_top(mut candidates: Vec<MealCandidate>, n: usize) -> Vec<MealCandidate> {
    candidates.sort_by(MealCandidate::rank_order);
    candidates.truncate(n);
    candidates
}

/// Running single-best selection.
///
/// Starts with no candidate; a feasible candidate replaces the current best
/// only with a strictly higher score, so the earliest of equal scores wins.
#[derive(Debug, Clone, Default)]
pub struct BestMeal {
    best: Option<MealCandidate>,
    accepted: u64,
}

impl BestMeal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate. Returns true if it became the new best.
    pub fn offer(&mut self, candidate: MealCandidate, feasible: bool) -> bool {
        if !feasible {
            return false;
        }
        self.accepted += 1;
        let accept = match &self.best {
            None => true,
            Some(best) => candidate.score.rank_cmp(&best.score) == Ordering::Greater,
        };
        if accept {
            self.best = Some(candidate);
        }
        accept
    }

    /// Combine two partial folds over disjoint candidates.
    pub fn merge(self, other: Self) -> Self {
        let best = match (self.best, other.best) {
            (Some(a), Some(b)) => {
                if b.rank_order(&a) == Ordering::Less {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (a, b) => a.or(b),
        };
        Self {
            best,
            accepted: self.accepted + other.accepted,
        }
    }

    /// Feasible candidates offered so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn current(&self) -> Option<&MealCandidate> {
        self.best.as_ref()
    }

    pub fn into_inner(self) -> Option<MealCandidate> {
        self.best
    }
}
