//! Owns the perturbation step of the ILS driver (spec §4.6, §4.7).

use tracing::debug;

use crate::data::ProblemData;
use crate::model::Solution;
use crate::perturbation::ruin::{ruin, PerturbationParams};
use crate::perturbation::route_swap::route_swap;
use crate::rng::Rng;

/// Alternates between ruin-and-recreate and route-swap perturbation,
/// tracking how many perturbations have been applied.
#[derive(Debug, Clone)]
pub struct PerturbationManager {
    params: PerturbationParams,
    count: u64,
}

impl PerturbationManager {
    pub fn new(params: PerturbationParams) -> Self {
        Self { params, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Applies one perturbation operator, chosen at random, to `solution`.
    pub fn shuffle(&mut self, data: &ProblemData, solution: &Solution, rng: &mut Rng) -> Solution {
        self.count += 1;
        let result = if rng.rand() < 0.5 {
            debug!(count = self.count, "perturbation: ruin-and-recreate");
            ruin(data, solution, rng, &self.params)
        } else {
            debug!(count = self.count, "perturbation: route swap");
            route_swap(data, solution, rng)
        };
        result
    }
}
