//! The immutable problem instance (spec §3, §4.2).

use tracing::error;

use crate::data::group::Groups;
use crate::data::location::{Client, Depot};
use crate::data::matrix::ProfileMatrices;
use crate::data::vehicle::VehicleType;
use crate::error::ValidationError;

/// An immutable, validated Vehicle Routing Problem instance.
///
/// Locations are indexed with depots first `[0, num_depots)` followed by
/// clients `[num_depots, num_depots + num_clients)`. Construction is the
/// only place validation happens; every accessor on a constructed
/// `ProblemData` can assume the invariants in spec §3 hold.
///
/// # Examples
///
/// ```
/// use routing_core::data::{ProblemData, Depot, Client, VehicleType, ProfileMatrices, Matrix, Groups};
///
/// let depots = vec![Depot::new(0, 0)];
/// let clients = vec![Client::new(1, 1, vec![10]), Client::new(2, 2, vec![5])];
/// let vehicle_types = vec![VehicleType::new(vec![100], 0, 2)];
/// let dist = Matrix::from_rows(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).unwrap();
/// let dur = Matrix::from_rows(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).unwrap();
/// let profiles = vec![ProfileMatrices::new(dist, dur)];
///
/// let data = ProblemData::new(depots, clients, vehicle_types, profiles, Groups::default()).unwrap();
/// assert_eq!(data.num_clients(), 2);
/// assert_eq!(data.num_locations(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemData {
    depots: Vec<Depot>,
    clients: Vec<Client>,
    vehicle_types: Vec<VehicleType>,
    profiles: Vec<ProfileMatrices>,
    groups: Groups,
}

impl ProblemData {
    /// Validates and constructs a problem instance.
    ///
    /// See spec §4.2 for the full list of validation failures; each is
    /// reported as a distinct [`ValidationError`] variant rather than a
    /// panic.
    pub fn new(
        depots: Vec<Depot>,
        clients: Vec<Client>,
        vehicle_types: Vec<VehicleType>,
        profiles: Vec<ProfileMatrices>,
        groups: Groups,
    ) -> Result<Self, ValidationError> {
        validate(&depots, &clients, &vehicle_types, &profiles, &groups)?;
        Ok(Self {
            depots,
            clients,
            vehicle_types,
            profiles,
            groups,
        })
    }

    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn num_locations(&self) -> usize {
        self.depots.len() + self.clients.len()
    }

    pub fn num_vehicle_types(&self) -> usize {
        self.vehicle_types.len()
    }

    pub fn total_vehicles(&self) -> u32 {
        self.vehicle_types.iter().map(|v| v.num_available()).sum()
    }

    pub fn num_profiles(&self) -> usize {
        self.profiles.len()
    }

    /// Load vector dimension shared by every client and vehicle type.
    /// Zero if there are no clients.
    pub fn num_load_dimensions(&self) -> usize {
        self.clients.first().map_or(0, |c| c.load_dimension())
    }

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    pub fn profiles(&self) -> &[ProfileMatrices] {
        &self.profiles
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Converts a client index (`0..num_clients`) to a location index.
    pub fn client_location(&self, client: usize) -> usize {
        self.depots.len() + client
    }

    /// Converts a location index to a client index, if it refers to a
    /// client rather than a depot.
    pub fn location_to_client(&self, location: usize) -> Option<usize> {
        location.checked_sub(self.depots.len())
    }

    /// `true` if `location` refers to a depot.
    pub fn is_depot(&self, location: usize) -> bool {
        location < self.depots.len()
    }

    pub fn client(&self, location: usize) -> &Client {
        &self.clients[location - self.depots.len()]
    }

    pub fn distance(&self, profile: usize, from: usize, to: usize) -> i64 {
        self.profiles[profile].distance.get(from, to)
    }

    pub fn duration(&self, profile: usize, from: usize, to: usize) -> i64 {
        self.profiles[profile].duration.get(from, to)
    }

    /// `true` iff any client carries a finite time window.
    pub fn has_time_windows(&self) -> bool {
        self.clients.iter().any(|c| c.time_window().is_finite())
    }

    /// Mean `(x, y)` coordinate across clients only (depots excluded).
    /// `(0.0, 0.0)` if there are no clients.
    pub fn client_centroid(&self) -> (f64, f64) {
        if self.clients.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.clients.len() as f64;
        let sx: i64 = self.clients.iter().map(|c| c.x()).sum();
        let sy: i64 = self.clients.iter().map(|c| c.y()).sum();
        (sx as f64 / n, sy as f64 / n)
    }
}

fn validate(
    depots: &[Depot],
    clients: &[Client],
    vehicle_types: &[VehicleType],
    profiles: &[ProfileMatrices],
    groups: &Groups,
) -> Result<(), ValidationError> {
    if depots.is_empty() {
        return Err(log_err(ValidationError::NoDepot));
    }
    if vehicle_types.is_empty() {
        return Err(log_err(ValidationError::NoVehicleType));
    }
    if clients.is_empty() {
        return Err(log_err(ValidationError::NoClient));
    }

    let dim = clients[0].load_dimension();
    for (i, c) in clients.iter().enumerate() {
        if c.load_dimension() != dim {
            return Err(log_err(ValidationError::InconsistentLoadDimension {
                client: i,
                expected: dim,
                actual: c.load_dimension(),
            }));
        }
        if c.service_duration() < 0 {
            return Err(log_err(ValidationError::NegativeServiceDuration {
                client: i,
                duration: c.service_duration(),
            }));
        }
        for (d, &v) in c.delivery().iter().enumerate() {
            if v < 0 {
                return Err(log_err(ValidationError::NegativeDelivery {
                    client: i,
                    dimension: d,
                    value: v,
                }));
            }
        }
        for (d, &v) in c.pickup().iter().enumerate() {
            if v < 0 {
                return Err(log_err(ValidationError::NegativePickup {
                    client: i,
                    dimension: d,
                    value: v,
                }));
            }
        }
        let tw = c.time_window();
        if tw.late() < tw.early() {
            return Err(log_err(ValidationError::TimeWindowInverted {
                location: depots.len() + i,
                early: tw.early(),
                late: tw.late(),
            }));
        }
        if c.release_time() > tw.late() {
            return Err(log_err(ValidationError::ReleaseAfterDue {
                client: i,
                release_time: c.release_time(),
                tw_late: tw.late(),
            }));
        }
    }

    for (i, d) in depots.iter().enumerate() {
        let tw = d.time_window();
        if tw.late() < tw.early() {
            return Err(log_err(ValidationError::TimeWindowInverted {
                location: i,
                early: tw.early(),
                late: tw.late(),
            }));
        }
    }

    let n = depots.len() + clients.len();
    if profiles.is_empty() {
        return Err(log_err(ValidationError::WrongProfileCount {
            expected: 1,
            actual: 0,
        }));
    }

    for (p, pm) in profiles.iter().enumerate() {
        if pm.distance.size() != n || pm.duration.size() != n {
            let (rows, cols) = if pm.distance.size() != n {
                (pm.distance.size(), pm.distance.size())
            } else {
                (pm.duration.size(), pm.duration.size())
            };
            return Err(log_err(ValidationError::MatrixWrongShape {
                profile: p,
                rows,
                cols,
                expected: n,
            }));
        }
        if let Some(idx) = pm.distance.first_nonzero_diagonal() {
            return Err(log_err(ValidationError::MatrixNonzeroDiagonal {
                profile: p,
                index: idx,
            }));
        }
        if let Some(idx) = pm.duration.first_nonzero_diagonal() {
            return Err(log_err(ValidationError::MatrixNonzeroDiagonal {
                profile: p,
                index: idx,
            }));
        }
    }

    for (i, v) in vehicle_types.iter().enumerate() {
        if v.load_dimension() != dim {
            return Err(log_err(ValidationError::InconsistentVehicleLoadDimension {
                vehicle_type: i,
                expected: dim,
                actual: v.load_dimension(),
            }));
        }
        for (d, &cap) in v.capacity().iter().enumerate() {
            if cap < 0 {
                return Err(log_err(ValidationError::NegativeCapacity {
                    vehicle_type: i,
                    dimension: d,
                    value: cap,
                }));
            }
        }
        if v.num_available() == 0 {
            return Err(log_err(ValidationError::NoVehiclesAvailable {
                vehicle_type: i,
            }));
        }
        if v.start_depot() >= depots.len() {
            return Err(log_err(ValidationError::InvalidDepot {
                vehicle_type: i,
                depot: v.start_depot(),
            }));
        }
        if v.end_depot() >= depots.len() {
            return Err(log_err(ValidationError::InvalidDepot {
                vehicle_type: i,
                depot: v.end_depot(),
            }));
        }
        for &rd in v.reload_depots() {
            if rd >= depots.len() {
                return Err(log_err(ValidationError::InvalidReloadDepot {
                    vehicle_type: i,
                    depot: rd,
                }));
            }
        }
        if v.profile() >= profiles.len() {
            return Err(log_err(ValidationError::InvalidProfile {
                vehicle_type: i,
                profile: v.profile(),
            }));
        }
    }

    for (g, group) in groups.mutually_exclusive.iter().enumerate() {
        for &c in group.clients() {
            if c >= clients.len() {
                return Err(log_err(ValidationError::InvalidGroupMember {
                    group: g,
                    client: c,
                }));
            }
        }
    }
    for (g, group) in groups.same_vehicle.iter().enumerate() {
        for &c in group.clients() {
            if c >= clients.len() {
                return Err(log_err(ValidationError::InvalidGroupMember {
                    group: g,
                    client: c,
                }));
            }
        }
    }

    Ok(())
}

fn log_err(e: ValidationError) -> ValidationError {
    error!(error = %e, "problem data validation failed");
    e
}
