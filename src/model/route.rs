//! Route and visit types (spec §3.5).

use crate::constants::{sat_add, FORBIDDEN_EDGE, INFINITY};
use crate::data::{ProblemData, VehicleType};
use crate::segment::{DistanceSegment, DurationSegment, LoadSegment};

/// A single stop within a route: either a client or a mid-route reload
/// depot. The route's start and end depots are implicit (taken from the
/// vehicle type) and never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Index into [`ProblemData::clients`].
    Client(usize),
    /// Index into [`ProblemData::depots`], for an in-route reload stop.
    ReloadDepot(usize),
}

impl Visit {
    pub fn is_depot(&self) -> bool {
        matches!(self, Visit::ReloadDepot(_))
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Visit::Client(_))
    }

    /// The location index this visit resolves to.
    pub fn location(&self, data: &ProblemData) -> usize {
        match *self {
            Visit::Client(c) => data.client_location(c),
            Visit::ReloadDepot(d) => d,
        }
    }
}

/// The scheduled timing of one stop in a route's realised schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStop {
    pub location: usize,
    pub trip_index: usize,
    pub start_service: i64,
    pub end_service: i64,
}

/// An ordered sequence of visits assigned to one vehicle, with cached
/// aggregate statistics.
///
/// Successive depot visits (the implicit start/end plus any in-route
/// [`Visit::ReloadDepot`]) partition the route into trips; each trip has
/// its own load accumulator, reset to zero at every depot boundary rather
/// than carrying over `initial_load` between trips (spec §3.5, §4.5
/// "Multi-trip").
///
/// # Examples
///
/// ```
/// use routing_core::data::{ProblemData, Depot, Client, VehicleType, ProfileMatrices, Matrix, Groups};
/// use routing_core::model::{Route, Visit};
///
/// let depots = vec![Depot::new(0, 0)];
/// let clients = vec![Client::new(1, 0, vec![10])];
/// let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
/// let dist = Matrix::from_rows(2, vec![0, 1, 1, 0]).unwrap();
/// let dur = Matrix::from_rows(2, vec![0, 1, 1, 0]).unwrap();
/// let profiles = vec![ProfileMatrices::new(dist, dur)];
/// let data = ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
///
/// let route = Route::build(&data, 0, vec![Visit::Client(0)]);
/// assert_eq!(route.total_distance(), 2);
/// assert!(!route.is_infeasible());
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle_type: usize,
    visits: Vec<Visit>,
    total_distance: i64,
    total_duration: i64,
    delivery: Vec<i64>,
    pickup: Vec<i64>,
    load: Vec<i64>,
    time_warp: i64,
    excess_load: Vec<i64>,
    excess_distance: i64,
    overtime: i64,
    fixed_cost: i64,
    wait_time: i64,
    schedule: Vec<ScheduledStop>,
    num_trips: usize,
    forbidden_edge: bool,
}

impl Route {
    /// Builds a route for `vehicle_type` visiting `visits` in order,
    /// computing all cached aggregates from scratch.
    pub fn build(data: &ProblemData, vehicle_type: usize, visits: Vec<Visit>) -> Self {
        let dim = data.num_load_dimensions();
        let mut route = Self {
            vehicle_type,
            visits,
            total_distance: 0,
            total_duration: 0,
            delivery: vec![0; dim],
            pickup: vec![0; dim],
            load: vec![0; dim],
            time_warp: 0,
            excess_load: vec![0; dim],
            excess_distance: 0,
            overtime: 0,
            fixed_cost: 0,
            wait_time: 0,
            schedule: Vec::new(),
            num_trips: 0,
            forbidden_edge: false,
        };
        route.update(data);
        route
    }

    /// An empty (undispatched) route for `vehicle_type`.
    pub fn empty(data: &ProblemData, vehicle_type: usize) -> Self {
        Self::build(data, vehicle_type, Vec::new())
    }

    pub fn vehicle_type(&self) -> usize {
        self.vehicle_type
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn visits_mut(&mut self) -> &mut Vec<Visit> {
        &mut self.visits
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// `true` if this route is dispatched (has at least one visit) and
    /// therefore incurs the vehicle's fixed cost.
    pub fn is_dispatched(&self) -> bool {
        !self.visits.is_empty()
    }

    pub fn client_indices(&self) -> Vec<usize> {
        self.visits
            .iter()
            .filter_map(|v| match v {
                Visit::Client(c) => Some(*c),
                Visit::ReloadDepot(_) => None,
            })
            .collect()
    }

    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    pub fn delivery(&self) -> &[i64] {
        &self.delivery
    }

    pub fn pickup(&self) -> &[i64] {
        &self.pickup
    }

    /// Per-dimension maximum instantaneous load reached in any single
    /// trip of this route.
    pub fn load(&self) -> &[i64] {
        &self.load
    }

    pub fn time_warp(&self) -> i64 {
        self.time_warp
    }

    pub fn excess_load(&self) -> &[i64] {
        &self.excess_load
    }

    pub fn excess_distance(&self) -> i64 {
        self.excess_distance
    }

    pub fn overtime(&self) -> i64 {
        self.overtime
    }

    pub fn fixed_cost(&self) -> i64 {
        self.fixed_cost
    }

    pub fn wait_time(&self) -> i64 {
        self.wait_time
    }

    pub fn schedule(&self) -> &[ScheduledStop] {
        &self.schedule
    }

    pub fn num_trips(&self) -> usize {
        self.num_trips
    }

    /// `true` if this route traverses an edge at or above
    /// [`FORBIDDEN_EDGE`] (spec §3.3, §6.2): such an edge forces
    /// infeasibility regardless of how small the raw distance/duration
    /// penalty would otherwise be.
    pub fn crosses_forbidden_edge(&self) -> bool {
        self.forbidden_edge
    }

    /// `true` if any constraint (capacity, time window, distance,
    /// duration, forbidden edge) is violated anywhere in the route.
    pub fn is_infeasible(&self) -> bool {
        self.time_warp > 0
            || self.excess_distance > 0
            || self.excess_load.iter().any(|&e| e > 0)
            || self.forbidden_edge
    }

    /// Recomputes every cached aggregate from `self.visits` (spec §8
    /// "Route aggregate consistency"): this is the sole path that ever
    /// mutates them, so a freshly built route and a recomputed one always
    /// agree.
    pub fn update(&mut self, data: &ProblemData) {
        let vt: &VehicleType = &data.vehicle_types()[self.vehicle_type];
        let dim = data.num_load_dimensions();

        self.delivery = vec![0; dim];
        self.pickup = vec![0; dim];
        self.load = vec![0; dim];
        self.excess_load = vec![0; dim];
        self.schedule.clear();

        if self.visits.is_empty() {
            self.total_distance = 0;
            self.total_duration = 0;
            self.time_warp = 0;
            self.excess_distance = 0;
            self.overtime = 0;
            self.fixed_cost = 0;
            self.wait_time = 0;
            self.num_trips = 0;
            self.forbidden_edge = false;
            return;
        }

        self.fixed_cost = vt.fixed_cost();
        self.forbidden_edge = false;

        // Full stop chain including the implicit start/end depots.
        let mut locations = Vec::with_capacity(self.visits.len() + 2);
        locations.push(vt.start_depot());
        for v in &self.visits {
            locations.push(v.location(data));
        }
        locations.push(vt.end_depot());

        let mut distance_seg = DistanceSegment::single();
        for w in locations.windows(2) {
            let edge = data.distance(vt.profile(), w[0], w[1]);
            if edge >= FORBIDDEN_EDGE {
                self.forbidden_edge = true;
            }
            distance_seg = DistanceSegment::merge(edge, &distance_seg, &DistanceSegment::single());
        }
        self.total_distance = distance_seg.distance();

        let mut duration_seg: Option<DurationSegment> = None;
        let mut trip_load: Vec<Option<LoadSegment>> = vec![None; dim];
        let mut trip_index = 0usize;
        let last = locations.len() - 1;

        for (pos, &loc) in locations.iter().enumerate() {
            let is_boundary = pos == 0 || pos == last;

            let (service, tw, release) = if is_boundary {
                let depot = &data.depots()[loc];
                (depot.service_duration(), depot.time_window(), 0)
            } else {
                match self.visits[pos - 1] {
                    Visit::Client(c) => {
                        let client = &data.clients()[c];
                        for d in 0..dim {
                            self.delivery[d] = sat_add(self.delivery[d], client.delivery()[d]);
                            self.pickup[d] = sat_add(self.pickup[d], client.pickup()[d]);
                            let node = LoadSegment::single(client.delivery()[d], client.pickup()[d]);
                            trip_load[d] = Some(match trip_load[d] {
                                None => node,
                                Some(acc) => LoadSegment::merge(&acc, &node),
                            });
                        }
                        (
                            client.service_duration(),
                            client.time_window(),
                            client.release_time(),
                        )
                    }
                    Visit::ReloadDepot(d) => {
                        let depot = &data.depots()[d];
                        (depot.service_duration(), depot.time_window(), 0)
                    }
                }
            };

            let node_seg = DurationSegment::single(service, tw.early(), tw.late(), release);
            duration_seg = Some(match duration_seg {
                None => node_seg,
                Some(acc) => {
                    let prev = locations[pos - 1];
                    let edge = data.duration(vt.profile(), prev, loc);
                    if edge >= FORBIDDEN_EDGE {
                        self.forbidden_edge = true;
                    }
                    DurationSegment::merge(edge, &acc, &node_seg)
                }
            });

            if !is_boundary {
                self.schedule.push(ScheduledStop {
                    location: loc,
                    trip_index,
                    start_service: 0,
                    end_service: 0,
                });
            }

            // Any depot stop (start, end, or an in-route reload) closes the
            // trip that has been accumulating load up to this point.
            let is_depot_stop =
                is_boundary || matches!(self.visits.get(pos - 1), Some(Visit::ReloadDepot(_)));
            if is_depot_stop {
                for d in 0..dim {
                    if let Some(seg) = trip_load[d] {
                        self.load[d] = self.load[d].max(seg.load());
                    }
                }
                trip_load = vec![None; dim];
                if pos != last {
                    trip_index += 1;
                }
            }
        }

        let duration_seg = duration_seg.expect("route has at least the two implicit depots");
        self.total_duration = duration_seg.duration();

        let max_duration = if vt.max_duration() >= INFINITY {
            None
        } else {
            Some(vt.max_duration())
        };
        self.time_warp = duration_seg.time_warp(max_duration);

        self.excess_distance = if vt.max_distance() >= INFINITY {
            0
        } else {
            (self.total_distance - vt.max_distance()).max(0)
        };

        let raw_overtime = if vt.max_duration() >= INFINITY {
            0
        } else {
            (self.total_duration - vt.max_duration()).max(0)
        };
        self.overtime = raw_overtime.min(vt.max_overtime());

        for d in 0..dim {
            self.excess_load[d] = (self.load[d] - vt.capacity()[d]).max(0);
        }

        self.wait_time = 0;
        self.num_trips = trip_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, Groups, Matrix, ProfileMatrices, TimeWindow};

    fn line_problem() -> ProblemData {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![
            Client::new(10, 0, vec![10]),
            Client::new(20, 0, vec![20]),
            Client::new(30, 0, vec![15]),
        ];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 2)];
        let n = 4;
        let mut dist = Matrix::zeros(n);
        let mut dur = Matrix::zeros(n);
        let coords = [0i64, 10, 20, 30];
        for i in 0..n {
            for j in 0..n {
                let d = (coords[i] - coords[j]).unsigned_abs() as i64;
                dist.set(i, j, d);
                dur.set(i, j, d);
            }
        }
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap()
    }

    #[test]
    fn empty_route_has_zero_aggregates() {
        let data = line_problem();
        let route = Route::empty(&data, 0);
        assert!(route.is_empty());
        assert_eq!(route.total_distance(), 0);
        assert_eq!(route.fixed_cost(), 0);
        assert!(!route.is_infeasible());
    }

    #[test]
    fn route_accumulates_distance_and_load() {
        let data = line_problem();
        let route = Route::build(
            &data,
            0,
            vec![Visit::Client(0), Visit::Client(1), Visit::Client(2)],
        );
        // depot(0)->10->20->30->depot(0): 10+10+10+30 = 60
        assert_eq!(route.total_distance(), 60);
        assert_eq!(route.delivery(), &[45]);
        assert!(!route.is_infeasible());
        assert_eq!(route.num_trips(), 1);
    }

    #[test]
    fn capacity_violation_marks_infeasible() {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(10, 0, vec![60]), Client::new(20, 0, vec![60])];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
        let mut dist = Matrix::zeros(3);
        let mut dur = Matrix::zeros(3);
        for i in 0..3 {
            for j in 0..3 {
                let d = (i as i64 - j as i64).abs() * 10;
                dist.set(i, j, d);
                dur.set(i, j, d);
            }
        }
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let tight =
            ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
        let route = Route::build(&tight, 0, vec![Visit::Client(0), Visit::Client(1)]);
        assert_eq!(route.excess_load(), &[20]);
        assert!(route.is_infeasible());
    }

    #[test]
    fn tight_time_window_produces_time_warp() {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(100, 0, vec![1]).with_time_window(TimeWindow::new(0, 10))];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
        let mut dist = Matrix::zeros(2);
        let mut dur = Matrix::zeros(2);
        dist.set(0, 1, 100);
        dist.set(1, 0, 100);
        dur.set(0, 1, 100);
        dur.set(1, 0, 100);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let data =
            ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
        let route = Route::build(&data, 0, vec![Visit::Client(0)]);
        assert!(route.time_warp() > 0);
        assert!(route.is_infeasible());
    }

    #[test]
    fn reload_depot_splits_trips_and_resets_load() {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(10, 0, vec![60]), Client::new(20, 0, vec![60])];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1).with_reload_depots(vec![0], 1)];
        let mut dist = Matrix::zeros(3);
        let mut dur = Matrix::zeros(3);
        for i in 0..3 {
            for j in 0..3 {
                let d = (i as i64 - j as i64).abs() * 10;
                dist.set(i, j, d);
                dur.set(i, j, d);
            }
        }
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let data =
            ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
        let route = Route::build(
            &data,
            0,
            vec![Visit::Client(0), Visit::ReloadDepot(0), Visit::Client(1)],
        );
        assert_eq!(route.num_trips(), 2);
        assert_eq!(route.excess_load(), &[0]);
    }

    #[test]
    fn pickup_only_client_raises_load_past_delivery_side() {
        // delivery=0, pickup=20 against a 10-unit vehicle: the vehicle
        // must carry the picked-up load back to the depot, so peak load
        // is 20, not max(0, 0 - 20) = 0.
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(10, 0, vec![0]).with_pickup(vec![20])];
        let vehicle_types = vec![VehicleType::new(vec![10], 0, 1)];
        let mut dist = Matrix::zeros(2);
        let mut dur = Matrix::zeros(2);
        dist.set(0, 1, 10);
        dist.set(1, 0, 10);
        dur.set(0, 1, 10);
        dur.set(1, 0, 10);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let data =
            ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
        let route = Route::build(&data, 0, vec![Visit::Client(0)]);
        assert_eq!(route.load(), &[20]);
        assert_eq!(route.excess_load(), &[10]);
        assert!(route.is_infeasible());
    }

    #[test]
    fn forbidden_edge_forces_infeasible_even_with_unbounded_distance() {
        let depots = vec![Depot::new(0, 0)];
        let clients = vec![Client::new(10, 0, vec![1])];
        let vehicle_types = vec![VehicleType::new(vec![100], 0, 1)];
        let mut dist = Matrix::zeros(2);
        let mut dur = Matrix::zeros(2);
        dist.set(0, 1, crate::constants::FORBIDDEN_EDGE);
        dist.set(1, 0, 1);
        dur.set(0, 1, 1);
        dur.set(1, 0, 1);
        let profiles = vec![ProfileMatrices::new(dist, dur)];
        let data =
            ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
        let route = Route::build(&data, 0, vec![Visit::Client(0)]);
        assert!(route.crosses_forbidden_edge());
        assert!(route.is_infeasible());
    }

    #[test]
    fn recompute_matches_cached_values() {
        let data = line_problem();
        let mut route = Route::build(
            &data,
            0,
            vec![Visit::Client(0), Visit::Client(1), Visit::Client(2)],
        );
        let cached_distance = route.total_distance();
        let cached_duration = route.total_duration();
        route.update(&data);
        assert_eq!(route.total_distance(), cached_distance);
        assert_eq!(route.total_duration(), cached_duration);
    }
}
