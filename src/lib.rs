//! # routing-core
//!
//! Iterated Local Search core for heterogeneous-fleet vehicle routing:
//! problem data modelling and validation, a segment-based solution
//! representation for constant-time local-search move evaluation, a
//! penalised cost evaluator, and an ILS driver with fleet minimisation.
//!
//! ## Modules
//!
//! - [`data`] — the immutable problem instance: locations, vehicles, matrices, groups
//! - [`segment`] — concatenation segments backing O(1) move evaluation
//! - [`model`] — [`model::Route`] and [`model::Solution`]
//! - [`evaluation`] — [`evaluation::CostEvaluator`], the penalised cost function
//! - [`neighbourhood`] — per-client candidate lists by proximity
//! - [`local_search`] — node and route operators driven by the candidate lists
//! - [`perturbation`] — ruin-and-recreate and route-swap kicks
//! - [`search`] — the ILS driver, stopping criteria, and fleet minimisation
//! - [`rng`] — the deterministic, seedable generator used throughout
//! - [`stats`] — per-iteration search statistics and their CSV format
//! - [`error`] — validation and configuration error types

pub mod constants;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod model;
pub mod neighbourhood;
pub mod perturbation;
pub mod rng;
pub mod search;
pub mod segment;
pub mod stats;

use data::{Client, Depot, Groups, ProblemData, ProfileMatrices, VehicleType};
use error::Error;
use evaluation::CostEvaluator;
use local_search::{LocalSearch, LocalSearchParams};
use model::{Route, Solution};
use neighbourhood::NeighbourhoodParams;
use rng::Rng;
use search::{solve as ils_solve, SolveOptions, SolveResult, StoppingCriterion};

/// Validates and constructs a problem instance (spec §6.1).
pub fn problem_data_new(
    depots: Vec<Depot>,
    clients: Vec<Client>,
    vehicle_types: Vec<VehicleType>,
    profiles: Vec<ProfileMatrices>,
    groups: Groups,
) -> Result<ProblemData, Error> {
    Ok(ProblemData::new(
        depots,
        clients,
        vehicle_types,
        profiles,
        groups,
    )?)
}

/// Builds a penalty-weighted cost evaluator (spec §6.1).
pub fn cost_evaluator_new(
    load_penalties: Vec<i64>,
    tw_penalty: i64,
    dist_penalty: i64,
) -> Result<CostEvaluator, Error> {
    Ok(CostEvaluator::new(load_penalties, tw_penalty, dist_penalty)?)
}

/// Builds per-client candidate neighbour lists (spec §4.4, §6.1).
pub fn compute_neighbours(
    data: &ProblemData,
    params: &NeighbourhoodParams,
) -> Result<Vec<Vec<usize>>, Error> {
    Ok(neighbourhood::compute_neighbours(data, params)?)
}

/// Builds a random solution: one route per available vehicle, each
/// vehicle's clients assigned by repeatedly popping from a shuffled
/// required-client list (spec §6.1).
pub fn create_random_solution(data: &ProblemData, seed: u64) -> Solution {
    let mut rng = Rng::new(seed);
    let mut routes: Vec<Route> = data
        .vehicle_types()
        .iter()
        .enumerate()
        .flat_map(|(vt, v)| (0..v.num_available()).map(move |_| vt))
        .map(|vt| Route::empty(data, vt))
        .collect();

    let mut required: Vec<usize> = (0..data.num_clients())
        .filter(|&c| data.clients()[c].is_required())
        .collect();
    rng.shuffle(&mut required);

    if !routes.is_empty() {
        for (i, client) in required.into_iter().enumerate() {
            let r = i % routes.len();
            routes[r].visits_mut().push(model::Visit::Client(client));
        }
    }

    let mut solution = Solution::new(routes);
    solution.update(data);
    solution
}

/// Builds a solution from a caller-supplied route list (spec §6.1).
pub fn create_solution_from_routes(data: &ProblemData, routes: Vec<Route>) -> Solution {
    let mut solution = Solution::new(routes);
    solution.update(data);
    solution
}

/// The solution's penalised cost, including any infeasibility (spec §6.1).
pub fn solution_penalised_cost(data: &ProblemData, evaluator: &CostEvaluator, solution: &Solution) -> i64 {
    evaluator.penalised_cost(data, solution)
}

/// The solution's cost, or the infeasibility sentinel (spec §6.1, §6.2).
pub fn solution_cost(data: &ProblemData, evaluator: &CostEvaluator, solution: &Solution) -> i64 {
    evaluator.cost(data, solution)
}

/// `true` if no route in `solution` violates a capacity, time-window, or
/// distance constraint (spec §6.1).
pub fn solution_is_feasible(solution: &Solution) -> bool {
    solution.is_feasible()
}

/// `true` if `solution` assigns every required client exactly once and
/// respects group and fleet-size constraints (spec §6.1).
pub fn solution_is_complete(data: &ProblemData, solution: &Solution) -> bool {
    solution.is_complete(data)
}

/// Runs local search to a local optimum from `solution` (spec §4.5, §6.1).
pub fn local_search(
    data: &ProblemData,
    neighbours: &[Vec<usize>],
    evaluator: &CostEvaluator,
    params: LocalSearchParams,
    solution: Solution,
) -> Solution {
    let mut ls = LocalSearch::new(data, neighbours, evaluator, params);
    ls.run(solution)
}

/// Runs the full Iterated Local Search driver (spec §4.7, §6.1).
pub fn solve(
    data: &ProblemData,
    neighbours: &[Vec<usize>],
    evaluator: &CostEvaluator,
    options: &SolveOptions,
    stopping: &dyn StoppingCriterion,
) -> SolveResult {
    ils_solve(data, neighbours, evaluator, options, stopping)
}
