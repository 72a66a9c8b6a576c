//! The immutable problem instance: locations, vehicles, matrices, groups.
//!
//! - [`ProblemData`] — validated instance, constructed once and shared
//! - [`Depot`] / [`Client`] / [`TimeWindow`] — locations
//! - [`VehicleType`] — a class of vehicle in the fleet
//! - [`Matrix`] / [`ProfileMatrices`] — per-profile distance/duration data
//! - [`Groups`] / [`MutuallyExclusiveGroup`] / [`SameVehicleGroup`] — grouping constraints

mod group;
mod location;
mod matrix;
mod problem;
mod vehicle;

pub use group::{Groups, MutuallyExclusiveGroup, SameVehicleGroup};
pub use location::{Client, Depot, TimeWindow};
pub use matrix::{Matrix, ProfileMatrices};
pub use problem::ProblemData;
pub use vehicle::VehicleType;
