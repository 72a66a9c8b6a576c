//! Per-client candidate lists by proximity (spec §4.4).

use crate::data::ProblemData;
use crate::error::ConfigError;

/// Parameters controlling [`compute_neighbours`].
///
/// Defaults follow the values named in spec §9: `weight_wait_time = 0.2`,
/// `weight_time_warp = 1.0`, `num_neighbours = 60`, `symmetric_proximity =
/// true`, `symmetric_neighbours = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighbourhoodParams {
    pub weight_wait_time: f64,
    pub weight_time_warp: f64,
    pub num_neighbours: usize,
    pub symmetric_proximity: bool,
    pub symmetric_neighbours: bool,
}

impl Default for NeighbourhoodParams {
    fn default() -> Self {
        Self {
            weight_wait_time: 0.2,
            weight_time_warp: 1.0,
            num_neighbours: 60,
            symmetric_proximity: true,
            symmetric_neighbours: false,
        }
    }
}

fn expected_wait(data: &ProblemData, profile: usize, i: usize, j: usize) -> i64 {
    let ci = &data.clients()[i];
    let cj = &data.clients()[j];
    let travel = data.duration(profile, data.client_location(i), data.client_location(j));
    let arrival = ci
        .time_window()
        .early()
        .saturating_add(ci.service_duration())
        .saturating_add(travel);
    (cj.time_window().early() - arrival).max(0)
}

fn expected_time_warp(data: &ProblemData, profile: usize, i: usize, j: usize) -> i64 {
    let ci = &data.clients()[i];
    let cj = &data.clients()[j];
    let travel = data.duration(profile, data.client_location(i), data.client_location(j));
    let arrival = ci
        .time_window()
        .early()
        .saturating_add(ci.service_duration())
        .saturating_add(travel);
    (arrival - cj.time_window().late()).max(0)
}

fn proximity(data: &ProblemData, params: &NeighbourhoodParams, profile: usize, i: usize, j: usize) -> f64 {
    let travel = data.duration(profile, data.client_location(i), data.client_location(j)) as f64;
    let wait = expected_wait(data, profile, i, j) as f64;
    let warp = expected_time_warp(data, profile, i, j) as f64;
    let prize = data.clients()[j].prize() as f64;
    travel + params.weight_wait_time * wait + params.weight_time_warp * warp - prize
}

/// Builds, for each client, a list of at most `num_neighbours` other
/// clients ordered by proximity (spec §4.4). Static for the duration of a
/// search: callers compute it once per `ProblemData`/`params` pair.
pub fn compute_neighbours(
    data: &ProblemData,
    params: &NeighbourhoodParams,
) -> Result<Vec<Vec<usize>>, ConfigError> {
    if params.num_neighbours == 0 {
        return Err(ConfigError::InvalidNumNeighbours);
    }
    if params.weight_wait_time < 0.0 {
        return Err(ConfigError::NegativeWaitWeight(params.weight_wait_time));
    }
    if params.weight_time_warp < 0.0 {
        return Err(ConfigError::NegativeTimeWarpWeight(params.weight_time_warp));
    }

    let n = data.num_clients();
    let mut combined = vec![vec![f64::INFINITY; n]; n];
    for profile in 0..data.num_profiles() {
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let prox = proximity(data, params, profile, i, j);
                if prox < combined[i][j] {
                    combined[i][j] = prox;
                }
            }
        }
    }

    if params.symmetric_proximity {
        let original = combined.clone();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    combined[i][j] = (original[i][j] + original[j][i]) / 2.0;
                }
            }
        }
    }

    let mut neighbours: Vec<Vec<usize>> = Vec::with_capacity(n);
    for i in 0..n {
        let mut candidates: Vec<usize> = (0..n).filter(|&j| j != i).collect();
        candidates.sort_by(|&a, &b| combined[i][a].partial_cmp(&combined[i][b]).unwrap());
        candidates.truncate(params.num_neighbours);
        neighbours.push(candidates);
    }

    if params.symmetric_neighbours {
        let snapshot = neighbours.clone();
        for i in 0..n {
            for &j in &snapshot[i] {
                if !neighbours[j].contains(&i) {
                    neighbours[j].push(i);
                }
            }
        }
    }

    Ok(neighbours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, Groups, Matrix, ProfileMatrices, VehicleType};

    fn line_problem(num_clients: usize) -> ProblemData {
        let depots = vec![Depot::new(0, 0)];
        let clients: Vec<Client> = (1..=num_clients as i64)
            .map(|x| Client::new(x * 10, 0, vec![1]))
            .collect();
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
        let n = num_clients + 1;
        let mut dist = Matrix::zeros(n);
        let mut dur = Matrix::zeros(n);
        let coords: Vec<i64> = std::iter::once(0).chain((1..=num_clients as i64).map(|x| x * 10)).collect();
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
    fn rejects_zero_num_neighbours() {
        let data = line_problem(3);
        let params = NeighbourhoodParams {
            num_neighbours: 0,
            ..Default::default()
        };
        assert!(compute_neighbours(&data, &params).is_err());
    }

    #[test]
    fn excludes_self_and_respects_limit() {
        let data = line_problem(5);
        let params = NeighbourhoodParams {
            num_neighbours: 2,
            ..Default::default()
        };
        let neighbours = compute_neighbours(&data, &params).unwrap();
        assert_eq!(neighbours.len(), 5);
        for (i, list) in neighbours.iter().enumerate() {
            assert!(list.len() <= 2);
            assert!(!list.contains(&i));
        }
    }

    #[test]
    fn closest_client_is_nearest_neighbour() {
        let data = line_problem(4);
        let params = NeighbourhoodParams {
            num_neighbours: 1,
            weight_wait_time: 0.0,
            weight_time_warp: 0.0,
            symmetric_proximity: false,
            symmetric_neighbours: false,
        };
        let neighbours = compute_neighbours(&data, &params).unwrap();
        // Client 0 is at x=10; nearest other client is client 1 at x=20.
        assert_eq!(neighbours[0], vec![1]);
    }

    #[test]
    fn symmetric_neighbours_adds_reverse_edges() {
        let data = line_problem(3);
        let params = NeighbourhoodParams {
            num_neighbours: 1,
            symmetric_neighbours: true,
            ..Default::default()
        };
        let neighbours = compute_neighbours(&data, &params).unwrap();
        for i in 0..3 {
            for &j in &neighbours[i].clone() {
                assert!(neighbours[j].contains(&i));
            }
        }
    }
}
