//! Error types for problem construction, configuration, and validation.

use thiserror::Error;

/// A structural problem in a [`crate::data::ProblemData`] instance.
///
/// Construction never panics on bad input; every failure mode is
/// enumerated here instead so that callers can match on `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("problem has no depot")]
    NoDepot,
    #[error("problem has no vehicle type")]
    NoVehicleType,
    #[error("problem has no client")]
    NoClient,
    #[error("load dimension mismatch: expected {expected}, got {actual} at client {client}")]
    InconsistentLoadDimension {
        client: usize,
        expected: usize,
        actual: usize,
    },
    #[error(
        "load dimension mismatch: expected {expected}, got {actual} at vehicle type {vehicle_type}"
    )]
    InconsistentVehicleLoadDimension {
        vehicle_type: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix for profile {profile} is {rows}x{cols}, expected {expected}x{expected}")]
    MatrixWrongShape {
        profile: usize,
        rows: usize,
        cols: usize,
        expected: usize,
    },
    #[error("matrix for profile {profile} has nonzero diagonal at index {index}")]
    MatrixNonzeroDiagonal { profile: usize, index: usize },
    #[error("expected {expected} profiles, got {actual}")]
    WrongProfileCount { expected: usize, actual: usize },
    #[error("client {client} has negative service duration {duration}")]
    NegativeServiceDuration { client: usize, duration: i64 },
    #[error("vehicle type {vehicle_type} has negative capacity in dimension {dimension}: {value}")]
    NegativeCapacity {
        vehicle_type: usize,
        dimension: usize,
        value: i64,
    },
    #[error("client {client} has negative delivery in dimension {dimension}: {value}")]
    NegativeDelivery {
        client: usize,
        dimension: usize,
        value: i64,
    },
    #[error("client {client} has negative pickup in dimension {dimension}: {value}")]
    NegativePickup {
        client: usize,
        dimension: usize,
        value: i64,
    },
    #[error("location {location} has tw_late ({late}) < tw_early ({early})")]
    TimeWindowInverted {
        location: usize,
        early: i64,
        late: i64,
    },
    #[error("client {client} has release_time ({release_time}) > tw_late ({tw_late})")]
    ReleaseAfterDue {
        client: usize,
        release_time: i64,
        tw_late: i64,
    },
    #[error("vehicle type {vehicle_type} has num_available = 0")]
    NoVehiclesAvailable { vehicle_type: usize },
    #[error("vehicle type {vehicle_type} references invalid depot {depot}")]
    InvalidDepot { vehicle_type: usize, depot: usize },
    #[error("vehicle type {vehicle_type} references invalid reload depot {depot}")]
    InvalidReloadDepot { vehicle_type: usize, depot: usize },
    #[error("vehicle type {vehicle_type} references invalid profile {profile}")]
    InvalidProfile { vehicle_type: usize, profile: usize },
    #[error("group {group} references invalid client {client}")]
    InvalidGroupMember { group: usize, client: usize },
}

/// A misconfiguration of a solver component (not the problem data itself).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("load penalty must be non-negative, got {0}")]
    NegativeLoadPenalty(i64),
    #[error("time-warp penalty must be non-negative, got {0}")]
    NegativeTimeWarpPenalty(i64),
    #[error("distance penalty must be non-negative, got {0}")]
    NegativeDistancePenalty(i64),
    #[error("load_penalties length {actual} does not match load dimension {expected}")]
    LoadPenaltyDimensionMismatch { expected: usize, actual: usize },
    #[error("num_neighbours must be > 0")]
    InvalidNumNeighbours,
    #[error("weight_wait_time must be >= 0, got {0}")]
    NegativeWaitWeight(f64),
    #[error("weight_time_warp must be >= 0, got {0}")]
    NegativeTimeWarpWeight(f64),
    #[error("perturbation min ({min}) must be <= max ({max})")]
    MinExceedsMax { min: u32, max: u32 },
    #[error("fleet minimisation requires exactly one vehicle type, found {0}")]
    FleetMinimiseRequiresSingleType(usize),
    #[error("fleet minimisation requires no optional clients")]
    FleetMinimiseRequiresNoOptionalClients,
}

/// Top-level error type surfaced by the crate's public API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
