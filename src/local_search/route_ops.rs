//! Route-level operators: relocate-star and swap-tails (spec §4.5).

use crate::data::ProblemData;
use crate::local_search::node_ops::locate;
use crate::model::Solution;

/// Moves an entire route's visits onto the end of another route, leaving
/// the source route empty. A whole-route approximation of "relocate-star"
/// (moving a sub-route between vehicles): this implementation operates at
/// route granularity rather than per-trip granularity.
fn relocate_star(data: &ProblemData, solution: &Solution, from: usize, to: usize) -> Option<Solution> {
    if from == to || solution.routes()[from].is_empty() {
        return None;
    }
    let mut candidate = solution.clone();
    let visits = std::mem::take(candidate.routes_mut()[from].visits_mut());
    candidate.routes_mut()[to].visits_mut().extend(visits);
    candidate.update(data);
    Some(candidate)
}

/// Cuts two routes right after their respective anchor positions and
/// swaps the tails (2-opt*).
fn swap_tails(data: &ProblemData, solution: &Solution, ru: usize, pu: usize, rv: usize, pv: usize) -> Option<Solution> {
    if ru == rv {
        return None;
    }
    let mut candidate = solution.clone();
    let tail_u = candidate.routes_mut()[ru].visits_mut().split_off(pu + 1);
    let tail_v = candidate.routes_mut()[rv].visits_mut().split_off(pv + 1);
    candidate.routes_mut()[ru].visits_mut().extend(tail_v);
    candidate.routes_mut()[rv].visits_mut().extend(tail_u);
    candidate.update(data);
    Some(candidate)
}

/// Candidate solutions from applying relocate-star and swap-tails around
/// anchor clients `u` and `v`.
pub fn candidate_moves(data: &ProblemData, solution: &Solution, u: usize, v: usize) -> Vec<Solution> {
    let mut out = Vec::new();
    let (Some((ru, pu)), Some((rv, pv))) = (locate(solution, u), locate(solution, v)) else {
        return out;
    };
    if ru == rv {
        return out;
    }

    if let Some(candidate) = relocate_star(data, solution, ru, rv) {
        out.push(candidate);
    }
    if let Some(candidate) = swap_tails(data, solution, ru, pu, rv, pv) {
        out.push(candidate);
    }
    out
}
