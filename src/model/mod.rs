//! Route and Solution types (spec §3.5).

mod route;
mod solution;

pub use route::{Route, ScheduledStop, Visit};
pub use solution::Solution;
