//! Composable route statistics supporting O(1) concatenation (spec §4.1).
//!
//! - [`DistanceSegment`] — cumulative distance
//! - [`LoadSegment`] — cumulative load, per dimension
//! - [`DurationSegment`] — cumulative duration, time warp, and feasible
//!   start window
//!
//! Each type's `merge` is associative, so in principle it lets a move's
//! cost delta be evaluated by composing a handful of precomputed segments
//! rather than rescanning the whole route. In this crate, though,
//! [`crate::model::Route::update`] is the only production caller of these
//! `merge` functions: it folds one segment of each kind across the
//! *entire* visit chain whenever a route is rebuilt, and every local
//! search and perturbation operator rebuilds the whole route it touches
//! rather than composing segments around just the changed span. So the
//! O(1)-per-move evaluation this module's types would support is not
//! what the crate actually does today; see `DESIGN.md` for the tradeoff
//! and what using them for incremental move evaluation would take.

mod distance;
mod duration;
mod load;

pub use distance::DistanceSegment;
pub use duration::DurationSegment;
pub use load::LoadSegment;
