//! Local search over node and route operators (spec §4.5).
//!
//! Each client is tested in turn against its candidate neighbours
//! (spec §4.4); every applicable operator's delta penalised cost is
//! computed by cloning the solution, applying the move, and
//! recomputing route aggregates through [`crate::model::Route::update`]
//! (which itself folds a [`crate::segment::DurationSegment`] across the
//! route). This trades the strict O(1) concatenation-based evaluation
//! described for individual operators for a simpler whole-route
//! recomputation, documented in `DESIGN.md`.
//!
//! [`LocalSearch::run_until`] polls a caller-supplied deadline before
//! every sweep, so a convergence loop mid-way through many passes can
//! still be cut off promptly rather than running to completion
//! regardless of an outer time budget.

mod node_ops;
mod route_ops;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::data::ProblemData;
use crate::evaluation::CostEvaluator;
use crate::model::Solution;

/// A practically unreachable deadline, used by [`LocalSearch::run`] so it
/// shares the deadline-polling code path with [`LocalSearch::run_until`]
/// without ever actually cutting a sweep short.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400 * 365 * 100)
}

/// Parameters controlling [`LocalSearch`] (spec §4.5, §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchParams {
    /// `true`: evaluate every candidate move per client and apply the
    /// best one. `false`: apply the first improving move found.
    pub best_improving: bool,
    /// `true`: keep sweeping full passes until one yields no improving
    /// move anywhere. `false`: stop after a single pass.
    pub exhaustive: bool,
}

impl Default for LocalSearchParams {
    fn default() -> Self {
        Self {
            best_improving: true,
            exhaustive: true,
        }
    }
}

/// Runs node- and route-level local search to a local optimum (or a
/// single pass, depending on [`LocalSearchParams::exhaustive`]).
pub struct LocalSearch<'a> {
    data: &'a ProblemData,
    neighbours: &'a [Vec<usize>],
    evaluator: &'a CostEvaluator,
    params: LocalSearchParams,
    mutation_count: u64,
    last_tested_optional: Vec<u64>,
}

impl<'a> LocalSearch<'a> {
    pub fn new(
        data: &'a ProblemData,
        neighbours: &'a [Vec<usize>],
        evaluator: &'a CostEvaluator,
        params: LocalSearchParams,
    ) -> Self {
        Self {
            data,
            neighbours,
            evaluator,
            params,
            mutation_count: 0,
            last_tested_optional: vec![0; data.num_clients()],
        }
    }

    /// Improves `solution` until a local optimum (or a single pass) is
    /// reached, returning the final solution.
    pub fn run(&mut self, solution: Solution) -> Solution {
        self.run_until(solution, far_future())
    }

    /// As [`Self::run`], but polls `deadline` before every sweep (spec
    /// §4.7 "suspension points") so a mid-convergence timeout terminates
    /// promptly instead of running every sweep to completion regardless
    /// of how long that takes.
    pub fn run_until(&mut self, mut solution: Solution, deadline: Instant) -> Solution {
        solution.update(self.data);
        loop {
            if Instant::now() >= deadline {
                break;
            }
            let improved = self.sweep(&mut solution);
            if !improved || !self.params.exhaustive {
                break;
            }
        }
        solution
    }

    /// One operator loop over every client. Optional clients whose
    /// assigned route (or "unassigned" bucket) has not changed since they
    /// were last tested are skipped on passes after the first, damping
    /// insert/remove oscillation between high-prize clients.
    fn sweep(&mut self, solution: &mut Solution) -> bool {
        let first_pass = self.mutation_count == 0;
        let mut any_improved = false;
        for u in 0..self.data.num_clients() {
            if !self.data.clients()[u].is_required() && !first_pass {
                let route_changed = self.mutation_count > self.last_tested_optional[u];
                if !route_changed {
                    continue;
                }
            }
            self.last_tested_optional[u] = self.mutation_count;
            if self.improve_client(solution, u) {
                any_improved = true;
                self.mutation_count += 1;
            }
        }
        any_improved
    }

    fn improve_client(&self, solution: &mut Solution, u: usize) -> bool {
        let mut candidates = Vec::new();

        if node_ops::locate(solution, u).is_none() {
            candidates.extend(node_ops::append_candidates(self.data, solution, u));
        } else {
            candidates.extend(node_ops::reload_depot_candidates(self.data, solution, u));
        }

        for &v in &self.neighbours[u] {
            candidates.extend(node_ops::candidate_moves(self.data, solution, u, v));
            candidates.extend(route_ops::candidate_moves(self.data, solution, u, v));
            if let Some(candidate) = node_ops::swap_star(self.data, solution, u, v) {
                candidates.push(candidate);
            }
        }

        self.pick_best(solution, candidates)
    }

    fn pick_best(&self, solution: &mut Solution, candidates: Vec<Solution>) -> bool {
        if candidates.is_empty() {
            return false;
        }
        let current_cost = self.evaluator.penalised_cost(self.data, solution);
        let mut best: Option<(i64, Solution)> = None;

        for candidate in candidates {
            let cost = self.evaluator.penalised_cost(self.data, &candidate);
            if cost < current_cost {
                if !self.params.best_improving {
                    *solution = candidate;
                    debug!(cost, "local search accepted first-improving move");
                    return true;
                }
                if best.as_ref().map_or(true, |(b, _)| cost < *b) {
                    best = Some((cost, candidate));
                }
            }
        }

        match best {
            Some((cost, candidate)) => {
                *solution = candidate;
                debug!(cost, "local search accepted best-improving move");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, Groups, Matrix, ProfileMatrices, VehicleType};
    use crate::neighbourhood::{compute_neighbours, NeighbourhoodParams};

    fn line_problem(num_clients: usize) -> ProblemData {
        let depots = vec![Depot::new(0, 0)];
        let clients: Vec<Client> = (1..=num_clients as i64)
            .map(|x| Client::new(x * 10, 0, vec![1]))
            .collect();
        let vehicle_types = vec![VehicleType::new(vec![100], 0, num_clients as u32)];
        let n = num_clients + 1;
        let mut dist = Matrix::zeros(n);
        let mut dur = Matrix::zeros(n);
        let coords: Vec<i64> = std::iter::once(0)
            .chain((1..=num_clients as i64).map(|x| x * 10))
            .collect();
        for a in 0..n {
            for b in 0..n {
                let d = (coords[a] - coords[b]).unsigned_abs() as i64;
                dist.set(a, b, d);
                dur.set(a, b, d);
            }
        }
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap()
    }

    #[test]
    fn local_search_inserts_all_required_clients_from_empty() {
        let data = line_problem(3);
        let evaluator = CostEvaluator::new(vec![0], 1000, 1000).unwrap();
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let mut ls = LocalSearch::new(&data, &neighbours, &evaluator, LocalSearchParams::default());

        let solution = ls.run(Solution::new(vec![crate::model::Route::empty(&data, 0)]));
        assert!(solution.is_complete(&data));
    }

    #[test]
    fn local_search_does_not_increase_cost() {
        let data = line_problem(4);
        let evaluator = CostEvaluator::new(vec![0], 1000, 1000).unwrap();
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let mut ls = LocalSearch::new(&data, &neighbours, &evaluator, LocalSearchParams::default());

        let start = Solution::new(vec![crate::model::Route::empty(&data, 0)]);
        let start_cost = evaluator.penalised_cost(&data, &start);
        let solution = ls.run(start);
        let end_cost = evaluator.penalised_cost(&data, &solution);
        assert!(end_cost <= start_cost);
    }

    #[test]
    fn first_improving_mode_also_reaches_completeness() {
        let data = line_problem(3);
        let evaluator = CostEvaluator::new(vec![0], 1000, 1000).unwrap();
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let params = LocalSearchParams {
            best_improving: false,
            exhaustive: true,
        };
        let mut ls = LocalSearch::new(&data, &neighbours, &evaluator, params);
        let solution = ls.run(Solution::new(vec![crate::model::Route::empty(&data, 0)]));
        assert!(solution.is_complete(&data));
    }

    #[test]
    fn run_until_stops_at_an_already_past_deadline() {
        let data = line_problem(5);
        let evaluator = CostEvaluator::new(vec![0], 1000, 1000).unwrap();
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let mut ls = LocalSearch::new(&data, &neighbours, &evaluator, LocalSearchParams::default());

        let start = Solution::new(vec![crate::model::Route::empty(&data, 0)]);
        let deadline = std::time::Instant::now();
        let solution = ls.run_until(start, deadline);
        // A deadline already in the past must not even run one sweep.
        assert!(solution.unassigned_clients(&data).len() == 5);
    }
}
