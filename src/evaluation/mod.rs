//! Turns raw route statistics and penalties into a scalar cost (spec §4.3).

mod cost;

pub use cost::CostEvaluator;
