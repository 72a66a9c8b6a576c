//! Fleet minimisation (spec §4.8): repeatedly remove a vehicle and
//! re-run local search, stopping at the first removal that can no longer
//! produce a feasible, complete solution.

use crate::data::ProblemData;
use crate::error::ConfigError;
use crate::evaluation::CostEvaluator;
use crate::local_search::{LocalSearch, LocalSearchParams};
use crate::model::{Route, Solution};

fn lower_bound_vehicles(data: &ProblemData) -> u32 {
    let vt = &data.vehicle_types()[0];
    let capacity = vt.effective_capacity();
    let mut bound = 1u32;
    for d in 0..data.num_load_dimensions() {
        let cap = capacity[d];
        if cap <= 0 {
            continue;
        }
        let total_delivery: i64 = data.clients().iter().map(|c| c.delivery()[d]).sum();
        let total_pickup: i64 = data.clients().iter().map(|c| c.pickup()[d]).sum();
        let need_delivery = total_delivery.div_ceil(cap) as u32;
        let need_pickup = total_pickup.div_ceil(cap) as u32;
        bound = bound.max(need_delivery).max(need_pickup);
    }
    bound
}

fn with_one_fewer_vehicle(data: &ProblemData) -> ProblemData {
    let vt = data.vehicle_types()[0].with_one_fewer_available();
    ProblemData::new(
        data.depots().to_vec(),
        data.clients().to_vec(),
        vec![vt],
        data.profiles().to_vec(),
        data.groups().clone(),
    )
    .expect("reducing num_available by one preserves every other invariant")
}

/// Repeatedly tries a problem instance with one fewer vehicle, accepting
/// the reduction if local search still finds a feasible, complete
/// solution, down to the capacity-implied lower bound (spec §4.8).
///
/// Requires exactly one vehicle type and no optional clients, matching
/// the preconditions in spec §4.8.
pub fn minimise_fleet(
    data: &ProblemData,
    neighbours: &[Vec<usize>],
    evaluator: &CostEvaluator,
    ls_params: LocalSearchParams,
) -> Result<ProblemData, ConfigError> {
    if data.num_vehicle_types() != 1 {
        return Err(ConfigError::FleetMinimiseRequiresSingleType(
            data.num_vehicle_types(),
        ));
    }
    if data.clients().iter().any(|c| !c.is_required()) {
        return Err(ConfigError::FleetMinimiseRequiresNoOptionalClients);
    }

    let lower_bound = lower_bound_vehicles(data).max(1);
    let mut current = data.clone();

    loop {
        if current.vehicle_types()[0].num_available() <= lower_bound {
            break;
        }
        let reduced = with_one_fewer_vehicle(&current);
        let n = reduced.vehicle_types()[0].num_available() as usize;
        let empty = vec![Route::empty(&reduced, 0); n];
        let mut ls = LocalSearch::new(&reduced, neighbours, evaluator, ls_params);
        let solution = ls.run(Solution::new(empty));

        if solution.is_feasible() && solution.is_complete(&reduced) {
            current = reduced;
        } else {
            break;
        }
    }

    Ok(current)
}
