//! Ruin-and-recreate perturbation (spec §4.6): remove a random batch of
//! clients, then greedily reinsert each at its cheapest position.

use crate::data::ProblemData;
use crate::error::ConfigError;
use crate::model::{Solution, Visit};
use crate::rng::Rng;

/// Parameters for [`ruin`]. Defaults to removing between 1 and 25 clients
/// per call (spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerturbationParams {
    pub min_removed: u32,
    pub max_removed: u32,
}

impl Default for PerturbationParams {
    fn default() -> Self {
        Self {
            min_removed: 1,
            max_removed: 25,
        }
    }
}

impl PerturbationParams {
    pub fn new(min_removed: u32, max_removed: u32) -> Result<Self, ConfigError> {
        if min_removed > max_removed {
            return Err(ConfigError::MinExceedsMax {
                min: min_removed,
                max: max_removed,
            });
        }
        Ok(Self {
            min_removed,
            max_removed,
        })
    }
}

fn locate(solution: &Solution, client: usize) -> Option<(usize, usize)> {
    for (r, route) in solution.routes().iter().enumerate() {
        for (p, visit) in route.visits().iter().enumerate() {
            if *visit == Visit::Client(client) {
                return Some((r, p));
            }
        }
    }
    None
}

/// Inserts `client` at whichever route/position minimises that route's
/// resulting total distance.
fn cheapest_insertion(data: &ProblemData, solution: &Solution, client: usize) -> Solution {
    let mut best: Option<(i64, Solution)> = None;
    for r in 0..solution.routes().len() {
        let len = solution.routes()[r].len();
        for pos in 0..=len {
            let mut candidate = solution.clone();
            candidate.routes_mut()[r]
                .visits_mut()
                .insert(pos, Visit::Client(client));
            candidate.update(data);
            let cost = candidate.routes()[r].total_distance();
            if best.as_ref().map_or(true, |(b, _)| cost < *b) {
                best = Some((cost, candidate));
            }
        }
    }
    best.expect("solution has at least one route to insert into")
        .1
}

/// Removes a random batch of currently assigned clients (batch size drawn
/// uniformly from `[params.min_removed, params.max_removed]`, capped at
/// the number of assigned clients) and reinserts each at its cheapest
/// position, in random order.
pub fn ruin(
    data: &ProblemData,
    solution: &Solution,
    rng: &mut Rng,
    params: &PerturbationParams,
) -> Solution {
    let counts = solution.visit_counts(data);
    let mut assigned: Vec<usize> = (0..data.num_clients()).filter(|&c| counts[c] > 0).collect();
    if assigned.is_empty() {
        return solution.clone();
    }

    let span = params.max_removed - params.min_removed + 1;
    let k = (params.min_removed + rng.randint(span)) as usize;
    let k = k.min(assigned.len());

    rng.shuffle(&mut assigned);
    let to_remove = &assigned[..k];

    let mut candidate = solution.clone();
    for &client in to_remove {
        if let Some((r, p)) = locate(&candidate, client) {
            candidate.routes_mut()[r].visits_mut().remove(p);
        }
    }
    candidate.update(data);

    let mut order: Vec<usize> = to_remove.to_vec();
    rng.shuffle(&mut order);
    for client in order {
        candidate = cheapest_insertion(data, &candidate, client);
    }
    candidate.update(data);
    candidate
}
