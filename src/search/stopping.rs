//! Composable stopping criteria for the ILS driver (spec §4.7, §9).

use std::cell::Cell;

/// Decides whether the ILS driver should stop, given the current
/// iteration count, elapsed wall-clock time, and best cost found so far.
pub trait StoppingCriterion {
    fn should_stop(&self, iteration: u64, elapsed_secs: f64, best_cost: i64) -> bool;
}

/// Stops once `iteration >= limit`.
pub struct MaxIterations(pub u64);

impl StoppingCriterion for MaxIterations {
    fn should_stop(&self, iteration: u64, _elapsed_secs: f64, _best_cost: i64) -> bool {
        iteration >= self.0
    }
}

/// Stops once `elapsed_secs >= limit`.
pub struct MaxRuntime(pub f64);

impl StoppingCriterion for MaxRuntime {
    fn should_stop(&self, _iteration: u64, elapsed_secs: f64, _best_cost: i64) -> bool {
        elapsed_secs >= self.0
    }
}

/// Stops once `best_cost` has fallen to or below a target.
pub struct TargetCost(pub i64);

impl StoppingCriterion for TargetCost {
    fn should_stop(&self, _iteration: u64, _elapsed_secs: f64, best_cost: i64) -> bool {
        best_cost <= self.0
    }
}

/// Stops once `patience` iterations have passed without `best_cost`
/// improving on the best value this criterion has seen.
pub struct NoImprovement {
    patience: u64,
    best_seen: Cell<i64>,
    stale_since: Cell<u64>,
}

impl NoImprovement {
    pub fn new(patience: u64) -> Self {
        Self {
            patience,
            best_seen: Cell::new(i64::MAX),
            stale_since: Cell::new(0),
        }
    }
}

impl StoppingCriterion for NoImprovement {
    fn should_stop(&self, iteration: u64, _elapsed_secs: f64, best_cost: i64) -> bool {
        if best_cost < self.best_seen.get() {
            self.best_seen.set(best_cost);
            self.stale_since.set(iteration);
            return false;
        }
        iteration.saturating_sub(self.stale_since.get()) >= self.patience
    }
}

/// Stops as soon as any one of its criteria would stop.
pub struct Any(pub Vec<Box<dyn StoppingCriterion>>);

impl StoppingCriterion for Any {
    fn should_stop(&self, iteration: u64, elapsed_secs: f64, best_cost: i64) -> bool {
        self.0
            .iter()
            .any(|c| c.should_stop(iteration, elapsed_secs, best_cost))
    }
}

/// Stops only once every one of its criteria would stop.
pub struct All(pub Vec<Box<dyn StoppingCriterion>>);

impl StoppingCriterion for All {
    fn should_stop(&self, iteration: u64, elapsed_secs: f64, best_cost: i64) -> bool {
        self.0
            .iter()
            .all(|c| c.should_stop(iteration, elapsed_secs, best_cost))
    }
}

pub fn max_iterations(limit: u64) -> MaxIterations {
    MaxIterations(limit)
}

pub fn max_runtime(limit_secs: f64) -> MaxRuntime {
    MaxRuntime(limit_secs)
}

pub fn target_cost(cost: i64) -> TargetCost {
    TargetCost(cost)
}

pub fn no_improvement(patience: u64) -> NoImprovement {
    NoImprovement::new(patience)
}

pub fn any(criteria: Vec<Box<dyn StoppingCriterion>>) -> Any {
    Any(criteria)
}

pub fn all(criteria: Vec<Box<dyn StoppingCriterion>>) -> All {
    All(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_iterations_stops_at_limit() {
        let c = max_iterations(10);
        assert!(!c.should_stop(9, 0.0, 0));
        assert!(c.should_stop(10, 0.0, 0));
    }

    #[test]
    fn max_runtime_stops_past_limit() {
        let c = max_runtime(5.0);
        assert!(!c.should_stop(0, 4.9, 0));
        assert!(c.should_stop(0, 5.0, 0));
    }

    #[test]
    fn target_cost_stops_once_reached() {
        let c = target_cost(100);
        assert!(!c.should_stop(0, 0.0, 101));
        assert!(c.should_stop(0, 0.0, 100));
    }

    #[test]
    fn no_improvement_tracks_staleness() {
        let c = no_improvement(3);
        assert!(!c.should_stop(0, 0.0, 100));
        assert!(!c.should_stop(1, 0.0, 100));
        assert!(!c.should_stop(2, 0.0, 100));
        assert!(c.should_stop(3, 0.0, 100));
        assert!(!c.should_stop(4, 0.0, 90));
        assert!(!c.should_stop(6, 0.0, 90));
        assert!(c.should_stop(7, 0.0, 90));
    }

    #[test]
    fn any_stops_when_one_criterion_fires() {
        let c = any(vec![Box::new(max_iterations(1000)), Box::new(max_runtime(1.0))]);
        assert!(c.should_stop(0, 1.0, 0));
        assert!(!c.should_stop(0, 0.5, 0));
    }

    #[test]
    fn all_requires_every_criterion() {
        let c = all(vec![Box::new(max_iterations(5)), Box::new(max_runtime(1.0))]);
        assert!(!c.should_stop(5, 0.5, 0));
        assert!(c.should_stop(5, 1.0, 0));
    }
}
