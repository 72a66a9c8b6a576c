//! Per-dimension load concatenation segment (spec §4.1.2).

use crate::constants::sat_add;

/// The load profile of a contiguous subsequence of a route, for one load
/// dimension.
///
/// `load` tracks the maximum instantaneous load reached anywhere in the
/// segment (assuming deliveries ride from the segment's start and
/// pickups accumulate from there), which is what makes capacity
/// violations exact under concatenation: a route is feasible in this
/// dimension iff its whole-route `load <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSegment {
    delivery: i64,
    pickup: i64,
    load: i64,
}

impl LoadSegment {
    /// A single client's contribution to one load dimension.
    pub fn single(delivery: i64, pickup: i64) -> Self {
        let load = delivery.max(pickup);
        Self {
            delivery,
            pickup,
            load,
        }
    }

    pub fn delivery(&self) -> i64 {
        self.delivery
    }

    pub fn pickup(&self) -> i64 {
        self.pickup
    }

    /// Maximum instantaneous load reached within the segment.
    pub fn load(&self) -> i64 {
        self.load
    }

    /// Amount by which `load` exceeds `capacity`; zero if feasible.
    pub fn excess_load(&self, capacity: i64) -> i64 {
        (self.load - capacity).max(0)
    }

    /// Concatenates `B` after `A`.
    ///
    /// `load` is the max of: `A`'s running load plus everything `B` still
    /// has to deliver (which rides through all of `A`), and `B`'s running
    /// load plus everything `A` already picked up (which still rides
    /// through all of `B`).
    pub fn merge(a: &Self, b: &Self) -> Self {
        Self {
            delivery: sat_add(a.delivery, b.delivery),
            pickup: sat_add(a.pickup, b.pickup),
            load: sat_add(a.load, b.delivery).max(sat_add(b.load, a.pickup)),
        }
    }
}

impl Default for LoadSegment {
    fn default() -> Self {
        Self::single(0, 0)
    }
}
