//! The Iterated Local Search driver (spec §4.7).

use std::time::{Duration, Instant};

use tracing::info;

use crate::data::ProblemData;
use crate::evaluation::CostEvaluator;
use crate::local_search::{LocalSearch, LocalSearchParams};
use crate::model::{Route, Solution};
use crate::perturbation::{PerturbationManager, PerturbationParams};
use crate::rng::Rng;
use crate::search::stopping::StoppingCriterion;
use crate::stats::IterationStat;

/// Tunables for [`solve`] (spec §6.1, §9).
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    pub seed: u64,
    pub local_search_params: LocalSearchParams,
    pub perturbation_params: PerturbationParams,
    pub collect_stats: bool,
    /// Wall-clock budget for each inner local-search call. `None` (the
    /// default) leaves it unbounded; the outer loop's own `stopping`
    /// check remains the only cancellation point in that case. Set this
    /// alongside a runtime-based `stopping` criterion so a timeout can't
    /// be overrun by an entire local-search-to-convergence pass (spec
    /// §4.7 "suspension points").
    pub local_search_budget: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            local_search_params: LocalSearchParams::default(),
            perturbation_params: PerturbationParams::default(),
            collect_stats: true,
            local_search_budget: None,
        }
    }
}

/// The outcome of a [`solve`] run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub best: Solution,
    pub stats: Vec<IterationStat>,
    pub num_iterations: u64,
    pub runtime_seconds: f64,
}

/// Runs Iterated Local Search (spec §4.7): build an initial solution by
/// local search from an empty fleet, then repeatedly perturb, re-run
/// local search, and keep the result as the new current (and possibly
/// best) solution whenever it is both feasible and an improvement.
pub fn solve(
    data: &ProblemData,
    neighbours: &[Vec<usize>],
    evaluator: &CostEvaluator,
    options: &SolveOptions,
    stopping: &dyn StoppingCriterion,
) -> SolveResult {
    let start = Instant::now();
    let mut rng = Rng::new(options.seed);

    let initial_routes: Vec<Route> = data
        .vehicle_types()
        .iter()
        .enumerate()
        .flat_map(|(vt, v)| (0..v.num_available()).map(move |_| Route::empty(data, vt)))
        .collect();

    let run_ls = |ls: &mut LocalSearch, solution: Solution| match options.local_search_budget {
        Some(budget) => ls.run_until(solution, Instant::now() + budget),
        None => ls.run(solution),
    };

    let mut local_search = LocalSearch::new(data, neighbours, evaluator, options.local_search_params);
    let mut current = run_ls(&mut local_search, Solution::new(initial_routes));
    let mut best = current.clone();
    let mut best_cost = evaluator.cost(data, &best);

    let mut manager = PerturbationManager::new(options.perturbation_params);
    let mut stats = Vec::new();
    let mut iteration = 0u64;

    loop {
        let elapsed = start.elapsed().as_secs_f64();
        if stopping.should_stop(iteration, elapsed, best_cost) {
            break;
        }

        let current_cost = evaluator.cost(data, &current);
        let perturbed = manager.shuffle(data, &current, &mut rng);
        let candidate = run_ls(&mut local_search, perturbed);
        let candidate_cost = evaluator.cost(data, &candidate);
        let candidate_feasible = candidate.is_feasible();

        if candidate_feasible && candidate_cost < current_cost {
            current = candidate.clone();
        }
        if candidate_feasible && candidate_cost < best_cost {
            best = candidate.clone();
            best_cost = candidate_cost;
            info!(iteration, best_cost, "new best solution");
        }

        iteration += 1;
        if options.collect_stats {
            stats.push(IterationStat {
                iteration,
                current_cost,
                current_feasible: current.is_feasible(),
                candidate_cost,
                candidate_feasible,
                best_cost,
                best_feasible: best.is_feasible(),
                runtime_seconds: start.elapsed().as_secs_f64(),
            });
        }
    }

    SolveResult {
        best,
        stats,
        num_iterations: iteration,
        runtime_seconds: start.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, Groups, Matrix, ProfileMatrices, VehicleType};
    use crate::neighbourhood::{compute_neighbours, NeighbourhoodParams};
    use crate::search::stopping::max_iterations;

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
    fn solve_returns_a_complete_feasible_solution() {
        let data = line_problem(5);
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let evaluator = CostEvaluator::new(vec![1000], 1000, 1000).unwrap();
        let options = SolveOptions {
            seed: 7,
            ..SolveOptions::default()
        };
        let stopping = max_iterations(10);

        let result = solve(&data, &neighbours, &evaluator, &options, &stopping);
        assert!(result.best.is_complete(&data));
        assert!(result.best.is_feasible());
        assert_eq!(result.num_iterations, 10);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let data = line_problem(5);
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let evaluator = CostEvaluator::new(vec![1000], 1000, 1000).unwrap();
        let options = SolveOptions {
            seed: 3,
            collect_stats: false,
            ..SolveOptions::default()
        };

        let a = solve(&data, &neighbours, &evaluator, &options, &max_iterations(5));
        let b = solve(&data, &neighbours, &evaluator, &options, &max_iterations(5));
        assert_eq!(
            evaluator.cost(&data, &a.best),
            evaluator.cost(&data, &b.best)
        );
    }

    #[test]
    fn an_already_expired_local_search_budget_still_returns_a_usable_result() {
        let data = line_problem(5);
        let neighbours = compute_neighbours(&data, &NeighbourhoodParams::default()).unwrap();
        let evaluator = CostEvaluator::new(vec![1000], 1000, 1000).unwrap();
        let options = SolveOptions {
            seed: 1,
            local_search_budget: Some(std::time::Duration::from_nanos(1)),
            ..SolveOptions::default()
        };
        let result = solve(&data, &neighbours, &evaluator, &options, &max_iterations(3));
        // No panics, and the loop still ran the requested number of outer
        // iterations even though every inner local search bailed instantly.
        assert_eq!(result.num_iterations, 3);
    }
}
