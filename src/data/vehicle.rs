//! Vehicle type definitions.

use crate::constants::INFINITY;
use crate::data::location::TimeWindow;

/// A class of vehicle available to the fleet.
///
/// `num_available` vehicles of this type may be dispatched, each starting
/// at `start_depot` and ending at `end_depot`, using matrix profile
/// `profile` for distance/duration lookups.
///
/// `vehicle_id` resolves the Open Question in spec §9: when several
/// `VehicleType` entries share the same `vehicle_id`, they represent
/// different shifts of one physical vehicle for the purpose of
/// same-vehicle groups. When `vehicle_id` is `None`, membership in a
/// same-vehicle group instead falls back to matching by
/// `equivalence_group` name, for configurations that never set an
/// explicit identity.
#[derive(Debug, Clone)]
pub struct VehicleType {
    capacity: Vec<i64>,
    shift_time_window: TimeWindow,
    max_duration: i64,
    max_distance: i64,
    fixed_cost: i64,
    unit_distance_cost: i64,
    unit_duration_cost: i64,
    max_overtime: i64,
    overtime_unit_cost: i64,
    start_depot: usize,
    end_depot: usize,
    profile: usize,
    reload_depots: Vec<usize>,
    max_reloads: u32,
    initial_load: Vec<i64>,
    equivalence_group: String,
    vehicle_id: Option<u32>,
    num_available: u32,
}

impl VehicleType {
    /// Creates a vehicle type with the given capacity vector, starting and
    /// ending at `depot`, available as `num_available` units. All other
    /// attributes default to unconstrained / zero-cost.
    pub fn new(capacity: Vec<i64>, depot: usize, num_available: u32) -> Self {
        let dim = capacity.len();
        Self {
            capacity,
            shift_time_window: TimeWindow::unconstrained(),
            max_duration: INFINITY,
            max_distance: INFINITY,
            fixed_cost: 0,
            unit_distance_cost: 0,
            unit_duration_cost: 0,
            max_overtime: 0,
            overtime_unit_cost: 0,
            start_depot: depot,
            end_depot: depot,
            profile: 0,
            reload_depots: Vec::new(),
            max_reloads: 0,
            initial_load: vec![0; dim],
            equivalence_group: String::new(),
            vehicle_id: None,
            num_available,
        }
    }

    pub fn with_end_depot(mut self, depot: usize) -> Self {
        self.end_depot = depot;
        self
    }

    pub fn with_shift_time_window(mut self, tw: TimeWindow) -> Self {
        self.shift_time_window = tw;
        self
    }

    pub fn with_max_duration(mut self, max_duration: i64) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn with_max_distance(mut self, max_distance: i64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_fixed_cost(mut self, cost: i64) -> Self {
        self.fixed_cost = cost;
        self
    }

    pub fn with_unit_distance_cost(mut self, cost: i64) -> Self {
        self.unit_distance_cost = cost;
        self
    }

    pub fn with_unit_duration_cost(mut self, cost: i64) -> Self {
        self.unit_duration_cost = cost;
        self
    }

    pub fn with_overtime(mut self, max_overtime: i64, unit_cost: i64) -> Self {
        self.max_overtime = max_overtime;
        self.overtime_unit_cost = unit_cost;
        self
    }

    pub fn with_profile(mut self, profile: usize) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_reload_depots(mut self, depots: Vec<usize>, max_reloads: u32) -> Self {
        self.reload_depots = depots;
        self.max_reloads = max_reloads;
        self
    }

    pub fn with_initial_load(mut self, load: Vec<i64>) -> Self {
        self.initial_load = load;
        self
    }

    pub fn with_equivalence_group(mut self, name: impl Into<String>) -> Self {
        self.equivalence_group = name.into();
        self
    }

    pub fn with_vehicle_id(mut self, id: u32) -> Self {
        self.vehicle_id = Some(id);
        self
    }

    pub fn capacity(&self) -> &[i64] {
        &self.capacity
    }

    pub fn load_dimension(&self) -> usize {
        self.capacity.len()
    }

    pub fn shift_time_window(&self) -> TimeWindow {
        self.shift_time_window
    }

    pub fn max_duration(&self) -> i64 {
        self.max_duration
    }

    pub fn max_distance(&self) -> i64 {
        self.max_distance
    }

    pub fn fixed_cost(&self) -> i64 {
        self.fixed_cost
    }

    pub fn unit_distance_cost(&self) -> i64 {
        self.unit_distance_cost
    }

    pub fn unit_duration_cost(&self) -> i64 {
        self.unit_duration_cost
    }

    pub fn max_overtime(&self) -> i64 {
        self.max_overtime
    }

    pub fn overtime_unit_cost(&self) -> i64 {
        self.overtime_unit_cost
    }

    pub fn start_depot(&self) -> usize {
        self.start_depot
    }

    pub fn end_depot(&self) -> usize {
        self.end_depot
    }

    pub fn profile(&self) -> usize {
        self.profile
    }

    pub fn reload_depots(&self) -> &[usize] {
        &self.reload_depots
    }

    pub fn max_reloads(&self) -> u32 {
        self.max_reloads
    }

    pub fn initial_load(&self) -> &[i64] {
        &self.initial_load
    }

    pub fn equivalence_group(&self) -> &str {
        &self.equivalence_group
    }

    pub fn vehicle_id(&self) -> Option<u32> {
        self.vehicle_id
    }

    pub fn num_available(&self) -> u32 {
        self.num_available
    }

    /// `true` if `other` belongs to the same physical-vehicle equivalence
    /// class: same explicit `vehicle_id` if both set it, otherwise same
    /// non-empty `equivalence_group` name.
    pub fn shares_equivalence_with(&self, other: &VehicleType) -> bool {
        match (self.vehicle_id, other.vehicle_id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                !self.equivalence_group.is_empty()
                    && self.equivalence_group == other.equivalence_group
            }
        }
    }

    /// Effective per-dimension capacity accounting for multi-trip reloads:
    /// `(max_reloads + 1) * capacity`, used by fleet minimisation's lower
    /// bound (spec §4.8).
    pub fn effective_capacity(&self) -> Vec<i64> {
        let factor = i64::from(self.max_reloads) + 1;
        self.capacity.iter().map(|c| c * factor).collect()
    }

    /// Returns a copy of this vehicle type with `num_available` reduced by
    /// one, saturating at zero.
    pub fn with_one_fewer_available(&self) -> Self {
        let mut copy = self.clone();
        copy.num_available = copy.num_available.saturating_sub(1);
        copy
    }
}
