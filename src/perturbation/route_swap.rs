//! Route-swap perturbation (spec §4.6): exchange two random contiguous
//! sub-routes between two randomly chosen routes.

use crate::data::ProblemData;
use crate::model::{Solution, Visit};
use crate::rng::Rng;

fn random_subrange(rng: &mut Rng, len: usize) -> (usize, usize) {
    let a = rng.choose_index(len + 1).unwrap_or(0);
    let b = rng.choose_index(len + 1).unwrap_or(0);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Picks two distinct non-empty routes at random and swaps a random
/// contiguous sub-route between them. A no-op if fewer than two routes
/// have any visits.
pub fn route_swap(data: &ProblemData, solution: &Solution, rng: &mut Rng) -> Solution {
    let mut candidate = solution.clone();
    let non_empty: Vec<usize> = (0..candidate.routes().len())
        .filter(|&r| !candidate.routes()[r].is_empty())
        .collect();
    if non_empty.len() < 2 {
        return candidate;
    }

    let ia = rng.choose_index(non_empty.len()).unwrap();
    let mut ib = rng.choose_index(non_empty.len()).unwrap();
    while ib == ia {
        ib = rng.choose_index(non_empty.len()).unwrap();
    }
    let ra = non_empty[ia];
    let rb = non_empty[ib];

    let (sa, ea) = random_subrange(rng, candidate.routes()[ra].len());
    let (sb, eb) = random_subrange(rng, candidate.routes()[rb].len());

    let seg_a: Vec<Visit> = candidate.routes()[ra].visits()[sa..ea].to_vec();
    let seg_b: Vec<Visit> = candidate.routes()[rb].visits()[sb..eb].to_vec();
    candidate.routes_mut()[ra].visits_mut().splice(sa..ea, seg_b);
    candidate.routes_mut()[rb].visits_mut().splice(sb..eb, seg_a);
    candidate.update(data);
    candidate
}
