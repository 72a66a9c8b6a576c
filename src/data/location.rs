//! Depot and client location types.

use crate::constants::INFINITY;

/// A time window over which service may begin.
///
/// `late == `[`INFINITY`] means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    early: i64,
    late: i64,
}

impl TimeWindow {
    /// Creates a time window. Does not validate `early <= late`; that is
    /// checked once, for all locations, by
    /// [`crate::data::ProblemData::new`].
    pub fn new(early: i64, late: i64) -> Self {
        Self { early, late }
    }

    /// An unconstrained window: `[0, INFINITY]`.
    pub fn unconstrained() -> Self {
        Self {
            early: 0,
            late: INFINITY,
        }
    }

    pub fn early(&self) -> i64 {
        self.early
    }

    pub fn late(&self) -> i64 {
        self.late
    }

    /// `true` if `late` is not the [`INFINITY`] sentinel.
    pub fn is_finite(&self) -> bool {
        self.late < INFINITY
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// A depot: a start/end point for vehicle routes.
#[derive(Debug, Clone)]
pub struct Depot {
    x: i64,
    y: i64,
    time_window: TimeWindow,
    service_duration: i64,
    reload_cost: i64,
}

impl Depot {
    /// Creates a depot at `(x, y)` with an unconstrained time window, zero
    /// service duration and zero reload cost.
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            time_window: TimeWindow::unconstrained(),
            service_duration: 0,
            reload_cost: 0,
        }
    }

    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    pub fn with_service_duration(mut self, duration: i64) -> Self {
        self.service_duration = duration;
        self
    }

    pub fn with_reload_cost(mut self, cost: i64) -> Self {
        self.reload_cost = cost;
        self
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn service_duration(&self) -> i64 {
        self.service_duration
    }

    pub fn reload_cost(&self) -> i64 {
        self.reload_cost
    }
}

/// A client: a required or optional stop with delivery/pickup load,
/// a time window, and optional group membership.
///
/// Load dimensions (`delivery().len()` and `pickup().len()`) must match
/// across every client in a problem instance; this is checked once by
/// [`crate::data::ProblemData::new`], not here.
#[derive(Debug, Clone)]
pub struct Client {
    x: i64,
    y: i64,
    delivery: Vec<i64>,
    pickup: Vec<i64>,
    service_duration: i64,
    time_window: TimeWindow,
    release_time: i64,
    required: bool,
    prize: i64,
}

impl Client {
    /// Creates a required client with the given delivery load vector and
    /// no pickup load, an unconstrained time window, and no service time.
    pub fn new(x: i64, y: i64, delivery: Vec<i64>) -> Self {
        let dim = delivery.len();
        Self {
            x,
            y,
            delivery,
            pickup: vec![0; dim],
            service_duration: 0,
            time_window: TimeWindow::unconstrained(),
            release_time: 0,
            required: true,
            prize: 0,
        }
    }

    pub fn with_pickup(mut self, pickup: Vec<i64>) -> Self {
        self.pickup = pickup;
        self
    }

    pub fn with_service_duration(mut self, duration: i64) -> Self {
        self.service_duration = duration;
        self
    }

    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    pub fn with_release_time(mut self, release_time: i64) -> Self {
        self.release_time = release_time;
        self
    }

    /// Marks the client optional with the given prize, collected if the
    /// client is visited and forfeited otherwise.
    pub fn with_prize(mut self, prize: i64) -> Self {
        self.required = false;
        self.prize = prize;
        self
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn delivery(&self) -> &[i64] {
        &self.delivery
    }

    pub fn pickup(&self) -> &[i64] {
        &self.pickup
    }

    pub fn load_dimension(&self) -> usize {
        self.delivery.len()
    }

    pub fn service_duration(&self) -> i64 {
        self.service_duration
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn release_time(&self) -> i64 {
        self.release_time
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Prize collected for visiting this client; zero for required clients.
    pub fn prize(&self) -> i64 {
        self.prize
    }
}
