//! Penalised cost function over feasibility violations (spec §4.3).

use crate::constants::{sat_add, sat_sub, INFEASIBLE_COST};
use crate::data::ProblemData;
use crate::error::ConfigError;
use crate::model::Solution;

/// Turns a solution's raw route statistics into a single scalar cost.
///
/// Holds per-dimension load penalties, a time-warp penalty, and a
/// distance penalty, all non-negative.
///
/// # Examples
///
/// ```
/// use routing_core::evaluation::CostEvaluator;
///
/// let evaluator = CostEvaluator::new(vec![10], 100, 1).unwrap();
/// assert!(CostEvaluator::new(vec![-1], 0, 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CostEvaluator {
    load_penalties: Vec<i64>,
    tw_penalty: i64,
    dist_penalty: i64,
}

impl CostEvaluator {
    /// Creates an evaluator. Fails if any penalty is negative.
    pub fn new(
        load_penalties: Vec<i64>,
        tw_penalty: i64,
        dist_penalty: i64,
    ) -> Result<Self, ConfigError> {
        if let Some(&bad) = load_penalties.iter().find(|&&p| p < 0) {
            return Err(ConfigError::NegativeLoadPenalty(bad));
        }
        if tw_penalty < 0 {
            return Err(ConfigError::NegativeTimeWarpPenalty(tw_penalty));
        }
        if dist_penalty < 0 {
            return Err(ConfigError::NegativeDistancePenalty(dist_penalty));
        }
        Ok(Self {
            load_penalties,
            tw_penalty,
            dist_penalty,
        })
    }

    pub fn load_penalties(&self) -> &[i64] {
        &self.load_penalties
    }

    pub fn tw_penalty(&self) -> i64 {
        self.tw_penalty
    }

    pub fn dist_penalty(&self) -> i64 {
        self.dist_penalty
    }

    /// The solution's cost, including penalties for any infeasibility.
    /// Always finite-valued; never the sentinel returned by [`Self::cost`].
    pub fn penalised_cost(&self, data: &ProblemData, solution: &Solution) -> i64 {
        let mut cost = 0i64;

        for route in solution.routes() {
            if !route.is_dispatched() {
                continue;
            }
            let vt = &data.vehicle_types()[route.vehicle_type()];
            cost = sat_add(cost, vt.fixed_cost());
            cost = sat_add(cost, vt.unit_distance_cost().saturating_mul(route.total_distance()));
            cost = sat_add(cost, vt.unit_duration_cost().saturating_mul(route.total_duration()));
            cost = sat_add(cost, vt.overtime_unit_cost().saturating_mul(route.overtime()));

            for (d, &excess) in route.excess_load().iter().enumerate() {
                let penalty = self.load_penalties.get(d).copied().unwrap_or(0);
                cost = sat_add(cost, penalty.saturating_mul(excess));
            }
            cost = sat_add(cost, self.tw_penalty.saturating_mul(route.time_warp()));
            cost = sat_add(cost, self.dist_penalty.saturating_mul(route.excess_distance()));
        }

        cost = sat_add(cost, solution.reload_cost(data));

        let counts = solution.visit_counts(data);
        for (i, client) in data.clients().iter().enumerate() {
            if !client.is_required() && counts[i] > 0 {
                cost = sat_sub(cost, client.prize());
            }
        }

        cost
    }

    /// `penalised_cost` if the solution is feasible; otherwise the
    /// [`crate::constants::INFEASIBLE_COST`] sentinel (spec §6.2).
    pub fn cost(&self, data: &ProblemData, solution: &Solution) -> i64 {
        if solution.is_feasible() {
            self.penalised_cost(data, solution)
        } else {
            INFEASIBLE_COST
        }
    }
}
