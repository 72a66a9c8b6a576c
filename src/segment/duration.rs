//! Duration/time-warp concatenation segment (spec §4.1.3).

use crate::constants::{sat_add, sat_sub, INFINITY};

/// Shifts `value` backward by `shift`, preserving the unconstrained
/// [`INFINITY`] sentinel instead of letting it saturate to the smaller
/// [`crate::constants::SATURATION_CAP`].
fn shift_back(value: i64, shift: i64) -> i64 {
    if value >= INFINITY {
        INFINITY
    } else {
        sat_sub(value, shift)
    }
}

/// The timing profile of a contiguous subsequence of a route.
///
/// `duration` is service plus waiting time accumulated so far; `time_warp`
/// is the cumulative "push back in time" needed to paper over late
/// arrivals; `[start_early, start_late]` is the feasible window for when
/// the segment's first node may begin service; `release_time` is the
/// latest release time among the segment's clients.
///
/// `merge` is associative but **not** commutative: swapping `A` and `B`
/// changes which window constrains which arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSegment {
    duration: i64,
    time_warp: i64,
    start_early: i64,
    start_late: i64,
    release_time: i64,
    prev_end_late: i64,
}

impl DurationSegment {
    /// A single location's contribution: `service_duration` at a node
    /// whose own window is `[tw_early, tw_late]` and whose release time is
    /// `release_time`.
    pub fn single(service_duration: i64, tw_early: i64, tw_late: i64, release_time: i64) -> Self {
        let mut seg = Self {
            duration: service_duration,
            time_warp: 0,
            start_early: tw_early,
            start_late: tw_late,
            release_time,
            prev_end_late: tw_late,
        };
        if release_time > seg.start_late {
            let extra = release_time - seg.start_late;
            seg.time_warp = sat_add(seg.time_warp, extra);
            seg.start_late = release_time;
        }
        seg
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn start_early(&self) -> i64 {
        self.start_early
    }

    pub fn start_late(&self) -> i64 {
        self.start_late
    }

    pub fn release_time(&self) -> i64 {
        self.release_time
    }

    /// Latest time the segment preceding this one (pre-finalisation) was
    /// allowed to end; meaningful only after [`Self::finalise_back`].
    pub fn prev_end_late(&self) -> i64 {
        self.prev_end_late
    }

    /// Time warp, optionally inflated by violation of a route-duration
    /// cap (spec §4.1.3: "An optional `max_duration` argument").
    pub fn time_warp(&self, max_duration: Option<i64>) -> i64 {
        match max_duration {
            Some(max) if max < INFINITY && self.duration > max => {
                sat_add(self.time_warp, self.duration - max)
            }
            _ => self.time_warp,
        }
    }

    /// Concatenates `B` after `A` with travel time `edge_duration` between
    /// them, per spec §4.1.3.
    pub fn merge(edge_duration: i64, a: &Self, b: &Self) -> Self {
        // How far "forward" A's tail sits relative to A's own start: this
        // is the offset used to shift B's window back to be comparable
        // with A's start.
        let shift = sat_add(sat_add(a.duration, -a.time_warp), edge_duration);
        let arrival = sat_add(a.start_early, shift);

        let new_time_warp = (arrival - b.start_late).max(0);
        let new_wait = (b.start_early - arrival).max(0);

        let mut duration = sat_add(sat_add(a.duration, b.duration), edge_duration);
        duration = sat_add(duration, new_wait);

        let mut time_warp = sat_add(a.time_warp, b.time_warp);
        time_warp = sat_add(time_warp, new_time_warp);

        let mut start_early = a.start_early.max(shift_back(b.start_early, shift));
        let mut start_late = a.start_late.min(shift_back(b.start_late, shift));

        if start_early > start_late {
            time_warp = sat_add(time_warp, start_early - start_late);
            start_late = start_early;
        }

        let release_time = a.release_time.max(b.release_time);
        if release_time > start_late {
            time_warp = sat_add(time_warp, release_time - start_late);
            start_late = release_time;
        }

        Self {
            duration,
            time_warp,
            start_early,
            start_late,
            release_time,
            prev_end_late: b.prev_end_late,
        }
    }

    /// Prepares this segment to be the last piece concatenated into a
    /// route: the tail no longer has an outgoing edge to satisfy, so its
    /// upper bound on start time no longer constrains anything and is
    /// converted into slack (recorded in `prev_end_late` instead).
    pub fn finalise_back(&self) -> Self {
        Self {
            prev_end_late: self.start_late,
            start_late: INFINITY,
            ..*self
        }
    }

    /// Prepares this segment to be the first piece of a route. Nothing
    /// precedes the first piece, so its natural `[start_early, start_late]`
    /// window already holds with no adjustment needed; this is provided
    /// for symmetry with [`Self::finalise_back`] and for the finalisation
    /// equivalence invariant (spec §8).
    pub fn finalise_front(&self) -> Self {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconstrained(service: i64) -> DurationSegment {
        DurationSegment::single(service, 0, INFINITY, 0)
    }

    #[test]
    fn single_with_release_after_due_adds_warp() {
        let seg = DurationSegment::single(0, 0, 10, 15);
        assert_eq!(seg.time_warp(None), 5);
        assert_eq!(seg.start_late(), 15);
    }

    #[test]
    fn merge_accumulates_duration_and_edge() {
        let a = unconstrained(5);
        let b = unconstrained(3);
        let merged = DurationSegment::merge(10, &a, &b);
        assert_eq!(merged.duration(), 18);
        assert_eq!(merged.time_warp(None), 0);
    }

    #[test]
    fn merge_detects_time_warp_on_late_arrival() {
        // B must start by time 5, but edge + A's duration push arrival to 10.
        let a = DurationSegment::single(0, 0, INFINITY, 0);
        let b = DurationSegment::single(0, 0, 5, 0);
        let merged = DurationSegment::merge(10, &a, &b);
        assert_eq!(merged.time_warp(None), 5);
    }

    #[test]
    fn merge_detects_wait_on_early_arrival() {
        // B cannot start before 20; arrival is only 3.
        let a = DurationSegment::single(0, 0, INFINITY, 0);
        let b = DurationSegment::single(0, 20, INFINITY, 0);
        let merged = DurationSegment::merge(3, &a, &b);
        assert_eq!(merged.duration(), 20);
        assert_eq!(merged.time_warp(None), 0);
    }

    #[test]
    fn merge_is_associative() {
        let a = DurationSegment::single(3, 0, 100, 0);
        let b = DurationSegment::single(2, 5, 50, 0);
        let c = DurationSegment::single(4, 10, 80, 0);

        let left = DurationSegment::merge(7, &a, &DurationSegment::merge(6, &b, &c));
        let right = DurationSegment::merge(6, &DurationSegment::merge(7, &a, &b), &c);

        assert_eq!(left.duration(), right.duration());
        assert_eq!(left.time_warp(None), right.time_warp(None));
    }

    #[test]
    fn finalisation_equivalence_duration() {
        let a = DurationSegment::single(3, 0, 100, 0);
        let b = DurationSegment::single(2, 5, 50, 0);

        let via_back = DurationSegment::merge(0, &a.finalise_back(), &b);
        let via_front = DurationSegment::merge(0, &a, &b.finalise_front());

        assert_eq!(via_back.duration(), via_front.duration());
    }

    #[test]
    fn max_duration_cap_inflates_time_warp() {
        let seg = unconstrained(100);
        assert_eq!(seg.time_warp(Some(50)), 50);
        assert_eq!(seg.time_warp(Some(1000)), 0);
        assert_eq!(seg.time_warp(Some(INFINITY)), 0);
    }

    #[test]
    fn start_late_max_value_does_not_overflow() {
        let a = DurationSegment::single(0, 0, INFINITY, 0);
        let b = DurationSegment::single(0, 0, INFINITY, 0);
        let merged = DurationSegment::merge(1_000_000, &a, &b);
        assert_eq!(merged.start_late(), INFINITY);
        assert_eq!(merged.time_warp(None), 0);
    }
}
