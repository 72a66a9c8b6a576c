//! The Iterated Local Search driver, its stopping criteria, and fleet
//! minimisation (spec §4.7, §4.8).

pub mod fleet;
pub mod stopping;

mod ils;

pub use fleet::minimise_fleet;
pub use ils::{solve, SolveOptions, SolveResult};
pub use stopping::StoppingCriterion;
