//! Solution type: an assignment of clients to routes (spec §3.5).

use crate::data::{ProblemData, VehicleType};
use crate::model::route::{Route, Visit};

/// A candidate solution: a list of routes, one per dispatched vehicle.
///
/// Solutions are cheap to clone (no owning reference back to
/// [`ProblemData`]; every route indexes into it) and are created and
/// discarded freely during search (spec §3.6).
#[derive(Debug, Clone, Default)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The solution with no routes at all: nothing dispatched, nothing
    /// visited. The starting point for the initial local-search build
    /// (spec §4.7 step 1).
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub fn push_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn num_routes(&self) -> usize {
        self.routes.iter().filter(|r| r.is_dispatched()).count()
    }

    /// Recomputes every route's cached aggregates against `data`. Call
    /// after mutating `routes_mut()` directly (e.g. a local-search move).
    pub fn update(&mut self, data: &ProblemData) {
        for route in &mut self.routes {
            route.update(data);
        }
    }

    /// Per-client visit count across all routes, indexed by client index.
    pub fn visit_counts(&self, data: &ProblemData) -> Vec<u32> {
        let mut counts = vec![0u32; data.num_clients()];
        for route in &self.routes {
            for c in route.client_indices() {
                counts[c] += 1;
            }
        }
        counts
    }

    /// Required clients visited by no route.
    pub fn unassigned_clients(&self, data: &ProblemData) -> Vec<usize> {
        let counts = self.visit_counts(data);
        (0..data.num_clients())
            .filter(|&c| data.clients()[c].is_required() && counts[c] == 0)
            .collect()
    }

    /// The vehicle type of whichever route currently visits `client`, if
    /// any.
    pub fn vehicle_type_for_client(&self, client: usize) -> Option<usize> {
        self.routes
            .iter()
            .find(|r| r.client_indices().contains(&client))
            .map(Route::vehicle_type)
    }

    /// `true` if no route carries a capacity, time-window, or distance
    /// violation. Does not check completeness or group constraints: a
    /// feasible solution may still be incomplete.
    pub fn is_feasible(&self) -> bool {
        self.routes.iter().all(|r| !r.is_infeasible())
    }

    /// `true` if every required client is visited exactly once, every
    /// optional client at most once, mutually-exclusive and same-vehicle
    /// groups are respected, and no vehicle type is over-dispatched
    /// relative to `num_available` (spec §3.5 invariants).
    pub fn is_complete(&self, data: &ProblemData) -> bool {
        let counts = self.visit_counts(data);

        for (i, client) in data.clients().iter().enumerate() {
            if client.is_required() {
                if counts[i] != 1 {
                    return false;
                }
            } else if counts[i] > 1 {
                return false;
            }
        }

        for group in &data.groups().mutually_exclusive {
            let visited: u32 = group.clients().iter().map(|&c| counts[c]).sum();
            if group.is_required() {
                if visited != 1 {
                    return false;
                }
            } else if visited > 1 {
                return false;
            }
        }

        for group in &data.groups().same_vehicle {
            let vehicle_types: Vec<&VehicleType> = group
                .clients()
                .iter()
                .filter(|&&c| counts[c] > 0)
                .filter_map(|&c| {
                    self.vehicle_type_for_client(c)
                        .map(|vt| &data.vehicle_types()[vt])
                })
                .collect();
            if !vehicle_types
                .windows(2)
                .all(|w| w[0].shares_equivalence_with(w[1]))
            {
                return false;
            }
        }

        let mut dispatched = vec![0u32; data.num_vehicle_types()];
        for route in &self.routes {
            if route.is_dispatched() {
                dispatched[route.vehicle_type()] += 1;
            }
        }
        for (i, vt) in data.vehicle_types().iter().enumerate() {
            if dispatched[i] > vt.num_available() {
                return false;
            }
        }

        true
    }

    /// Total number of in-route reload-depot visits across the solution,
    /// used by the cost evaluator to charge each reload's depot cost.
    pub fn reload_cost(&self, data: &ProblemData) -> i64 {
        self.routes
            .iter()
            .flat_map(Route::visits)
            .filter_map(|v| match v {
                Visit::ReloadDepot(d) => Some(data.depots()[*d].reload_cost()),
                Visit::Client(_) => None,
            })
            .fold(0i64, |acc, c| acc.saturating_add(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, Groups, Matrix, MutuallyExclusiveGroup, ProfileMatrices};

    fn two_client_problem() -> ProblemData {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(1, 0, vec![10]), Client::new(2, 0, vec![10])];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
        let dist = Matrix::zeros(3);
        let dur = Matrix::zeros(3);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap()
    }

    #[test]
    fn empty_solution_is_feasible_but_incomplete() {
        let data = two_client_problem();
        let solution = Solution::empty();
        assert!(solution.is_feasible());
        assert!(!solution.is_complete(&data));
        assert_eq!(solution.unassigned_clients(&data), vec![0, 1]);
    }

    #[test]
    fn visiting_every_required_client_once_is_complete() {
        let data = two_client_problem();
        let route = Route::build(&data, 0, vec![Visit::Client(0), Visit::Client(1)]);
        let solution = Solution::new(vec![route]);
        assert!(solution.is_complete(&data));
        assert!(solution.unassigned_clients(&data).is_empty());
    }

    #[test]
    fn duplicate_required_visit_is_not_complete() {
        let data = two_client_problem();
        let route_a = Route::build(&data, 0, vec![Visit::Client(0)]);
        let route_b = Route::build(&data, 0, vec![Visit::Client(0), Visit::Client(1)]);
        let solution = Solution::new(vec![route_a, route_b]);
        assert!(!solution.is_complete(&data));
    }

    #[test]
    fn over_dispatch_is_not_complete() {
        let data = two_client_problem();
        let route_a = Route::build(&data, 0, vec![Visit::Client(0)]);
        let route_b = Route::build(&data, 0, vec![Visit::Client(1)]);
        let solution = Solution::new(vec![route_a, route_b]);
        // Only 1 vehicle of this type is available.
        assert!(!solution.is_complete(&data));
    }

    #[test]
    fn mutually_exclusive_group_required_needs_exactly_one() {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(1, 0, vec![10]), Client::new(2, 0, vec![10])];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 2)];
        let dist = Matrix::zeros(3);
        let dur = Matrix::zeros(3);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let groups = Groups::new(vec![MutuallyExclusiveGroup::new(vec![0, 1], true)], vec![]);
        let data =
            ProblemData::new(depots, clients, vehicle_types, profiles, groups).unwrap();

        let none = Solution::empty();
        assert!(!none.is_complete(&data));

        let one = Solution::new(vec![Route::build(&data, 0, vec![Visit::Client(0)])]);
        assert!(one.is_complete(&data));
    }

    #[test]
    fn reload_cost_sums_depot_reload_charges() {
        let depots = vec![Depot::new(0, 0).with_reload_cost(7)];
        let clients = vec![Client::new(1, 0, vec![10]), Client::new(2, 0, vec![10])];
        let vehicle_types =
            vec![VehicleType::new(vec![100], 0, 1).with_reload_depots(vec![0], 1)];
        let dist = Matrix::zeros(3);
        let dur = Matrix::zeros(3);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let data = ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default())
            .unwrap();
        let route = Route::build(
            &data,
            0,
            vec![Visit::Client(0), Visit::ReloadDepot(0), Visit::Client(1)],
        );
        let solution = Solution::new(vec![route]);
        assert_eq!(solution.reload_cost(&data), 7);
    }
}
