//! Node-level operators: Exchange(p, q), 2-opt, and optional-client
//! insertion/removal (spec §4.5).

use crate::data::ProblemData;
use crate::model::{Route, Solution, Visit};

/// The nine `(p, q)` pairs named in spec §4.5. `q == 0` is a pure
/// relocation of a `p`-length segment; `q > 0` swaps it with a
/// `q`-length segment elsewhere.
const EXCHANGE_PAIRS: [(usize, usize); 9] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (1, 1),
    (2, 1),
    (3, 1),
    (2, 2),
    (3, 2),
    (3, 3),
];

pub fn locate(solution: &Solution, client: usize) -> Option<(usize, usize)> {
    for (r, route) in solution.routes().iter().enumerate() {
        for (p, visit) in route.visits().iter().enumerate() {
            if *visit == Visit::Client(client) {
                return Some((r, p));
            }
        }
    }
    None
}

fn is_client_run(route: &Route, start: usize, len: usize) -> bool {
    start + len <= route.len() && route.visits()[start..start + len].iter().all(Visit::is_client)
}

/// `true` if `client` is blocked from insertion because another member of
/// one of its mutually-exclusive groups is already visited.
fn blocked_by_exclusive_group(data: &ProblemData, solution: &Solution, client: usize) -> bool {
    let counts = solution.visit_counts(data);
    data.groups().mutually_exclusive.iter().any(|g| {
        g.clients().contains(&client) && g.clients().iter().any(|&c| c != client && counts[c] > 0)
    })
}

fn relocate(
    data: &ProblemData,
    solution: &Solution,
    ru: usize,
    pu: usize,
    p: usize,
    rv: usize,
    pv: usize,
) -> Option<Solution> {
    if ru == rv && pv >= pu && pv < pu + p {
        return None;
    }
    let mut candidate = solution.clone();
    let segment: Vec<Visit> = candidate.routes_mut()[ru]
        .visits_mut()
        .drain(pu..pu + p)
        .collect();
    let insert_at = if ru == rv && pv > pu { pv - p + 1 } else { pv + 1 };
    candidate.routes_mut()[rv]
        .visits_mut()
        .splice(insert_at..insert_at, segment);
    candidate.update(data);
    Some(candidate)
}

fn exchange(
    data: &ProblemData,
    solution: &Solution,
    ru: usize,
    pu: usize,
    p: usize,
    rv: usize,
    pv: usize,
    q: usize,
) -> Solution {
    let mut candidate = solution.clone();
    let seg_u: Vec<Visit> = candidate.routes()[ru].visits()[pu..pu + p].to_vec();
    let seg_v: Vec<Visit> = candidate.routes()[rv].visits()[pv..pv + q].to_vec();
    candidate.routes_mut()[ru].visits_mut().splice(pu..pu + p, seg_v);
    candidate.routes_mut()[rv].visits_mut().splice(pv..pv + q, seg_u);
    candidate.update(data);
    candidate
}

fn two_opt(data: &ProblemData, solution: &Solution, r: usize, pu: usize, pv: usize) -> Solution {
    let mut candidate = solution.clone();
    let (lo, hi) = if pu < pv { (pu, pv) } else { (pv, pu) };
    candidate.routes_mut()[r].visits_mut()[lo..=hi].reverse();
    candidate.update(data);
    candidate
}

fn insert_single(data: &ProblemData, solution: &Solution, r: usize, pos: usize, client: usize) -> Solution {
    let mut candidate = solution.clone();
    candidate.routes_mut()[r]
        .visits_mut()
        .insert(pos + 1, Visit::Client(client));
    candidate.update(data);
    candidate
}

fn remove_single(data: &ProblemData, solution: &Solution, r: usize, pos: usize) -> Solution {
    let mut candidate = solution.clone();
    candidate.routes_mut()[r].visits_mut().remove(pos);
    candidate.update(data);
    candidate
}

/// Appends `client` (currently unassigned) to the end of every route, one
/// candidate per route. Used to bootstrap insertion before `client` has
/// any assigned neighbour to anchor against.
pub fn append_candidates(data: &ProblemData, solution: &Solution, client: usize) -> Vec<Solution> {
    if blocked_by_exclusive_group(data, solution, client) {
        return Vec::new();
    }
    (0..solution.routes().len())
        .map(|r| {
            let mut candidate = solution.clone();
            candidate.routes_mut()[r]
                .visits_mut()
                .push(Visit::Client(client));
            candidate.update(data);
            candidate
        })
        .collect()
}

/// Candidate solutions from applying Exchange(p, q) and 2-opt with anchor
/// clients `u` and `v`, plus optional-client insertion/removal.
pub fn candidate_moves(data: &ProblemData, solution: &Solution, u: usize, v: usize) -> Vec<Solution> {
    let mut out = Vec::new();
    let u_loc = locate(solution, u);
    let v_loc = locate(solution, v);

    if u_loc.is_none() {
        if !data.clients()[u].is_required() && !blocked_by_exclusive_group(data, solution, u) {
            if let Some((rv, pv)) = v_loc {
                out.push(insert_single(data, solution, rv, pv, u));
            }
        }
        return out;
    }
    let (ru, pu) = u_loc.unwrap();

    if !data.clients()[u].is_required() {
        out.push(remove_single(data, solution, ru, pu));
    }

    for &(p, q) in &EXCHANGE_PAIRS {
        if !is_client_run(&solution.routes()[ru], pu, p) {
            continue;
        }
        if q == 0 {
            if let Some((rv, pv)) = v_loc {
                if let Some(candidate) = relocate(data, solution, ru, pu, p, rv, pv) {
                    out.push(candidate);
                }
            }
        } else if let Some((rv, pv)) = v_loc {
            if ru != rv && is_client_run(&solution.routes()[rv], pv, q) {
                out.push(exchange(data, solution, ru, pu, p, rv, pv, q));
            }
        }
    }

    if let Some((rv, pv)) = v_loc {
        if ru == rv && pu != pv {
            out.push(two_opt(data, solution, ru, pu, pv));
        }
    }

    out
}

/// Multi-trip operator (spec §4.5 "Multi-trip"): inserts a reload depot
/// stop immediately before `client`'s current position, so a route that
/// would otherwise overrun its capacity/duration/distance limit can
/// split into an extra trip there. Also offers the reverse move — if
/// `client` is already preceded by a reload depot, dropping it — so local
/// search can undo an insertion that stops paying for itself.
pub fn reload_depot_candidates(data: &ProblemData, solution: &Solution, client: usize) -> Vec<Solution> {
    let Some((r, p)) = locate(solution, client) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let route = &solution.routes()[r];
    let vt = &data.vehicle_types()[route.vehicle_type()];

    if p > 0 && route.visits()[p - 1].is_depot() {
        let mut candidate = solution.clone();
        candidate.routes_mut()[r].visits_mut().remove(p - 1);
        candidate.update(data);
        out.push(candidate);
    }

    if vt.reload_depots().is_empty() {
        return out;
    }
    let used_reloads = route.visits().iter().filter(|v| v.is_depot()).count() as u32;
    if used_reloads >= vt.max_reloads() {
        return out;
    }
    for &depot in vt.reload_depots() {
        let mut candidate = solution.clone();
        candidate.routes_mut()[r]
            .visits_mut()
            .insert(p, Visit::ReloadDepot(depot));
        candidate.update(data);
        out.push(candidate);
    }
    out
}

/// Swap-star: remove single clients `u` and `v` from their (different)
/// routes and reinsert each at its cheapest position in the other's
/// route.
pub fn swap_star(data: &ProblemData, solution: &Solution, u: usize, v: usize) -> Option<Solution> {
    let (ru, _) = locate(solution, u)?;
    let (rv, _) = locate(solution, v)?;
    if ru == rv {
        return None;
    }

    let mut candidate = solution.clone();
    let pu = locate(&candidate, u)?.1;
    candidate.routes_mut()[ru].visits_mut().remove(pu);
    let pv = locate(&candidate, v)?.1;
    candidate.routes_mut()[rv].visits_mut().remove(pv);
    candidate.update(data);

    let best_u_route = best_insertion(data, &candidate, rv, u)?;
    candidate = best_u_route;
    let best_v_route = best_insertion(data, &candidate, ru, v)?;
    Some(best_v_route)
}

/// The cheapest position to insert `client` into `route`, by route-local
/// distance delta.
fn best_insertion(data: &ProblemData, solution: &Solution, route: usize, client: usize) -> Option<Solution> {
    let len = solution.routes()[route].len();
    let mut best: Option<(i64, Solution)> = None;
    for pos in 0..=len {
        let mut candidate = solution.clone();
        candidate.routes_mut()[route]
            .visits_mut()
            .insert(pos, Visit::Client(client));
        candidate.update(data);
        let cost = candidate.routes()[route].total_distance();
        if best.as_ref().map_or(true, |(b, _)| cost < *b) {
            best = Some((cost, candidate));
        }
    }
    best.map(|(_, c)| c)
}
