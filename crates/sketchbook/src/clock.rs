//! Frame timing.
//!
//! Turns raw timestamps from the host's animation loop into the per-frame
//! `dt` that springs and physics consume. The delta is clamped so a
//! suspended tab or a debugger pause shows up as one slow frame instead of
//! a huge jump.

use std::time::Duration;

/// Largest frame delta handed out by [`FrameClock::default`], in seconds.
pub const DEFAULT_MAX_DT: f64 = 0.1;

/// Converts successive timestamps into clamped frame deltas.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sketchbook::FrameClock;
///
/// let mut clock = FrameClock::new(0.1);
/// assert_eq!(clock.tick(Duration::from_millis(1_000)), 0.0);
/// assert!((clock.tick(Duration::from_millis(1_016)) - 0.016).abs() < 1e-9);
///
/// // a five second stall is reported as a single 0.1 s frame
/// assert_eq!(clock.tick(Duration::from_millis(6_016)), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    max_dt: f64,
    last: Option<Duration>,
    elapsed: f64,
    frame: u64,
}

impl FrameClock {
    /// Creates a clock that never reports more than `max_dt` seconds.
    ///
    /// A non-positive, infinite or NaN `max_dt` falls back to
    /// [`DEFAULT_MAX_DT`].
    pub fn new(max_dt: f64) -> Self {
        let max_dt = if max_dt > 0.0 && max_dt.is_finite() {
            max_dt
        } else {
            DEFAULT_MAX_DT
        };
        Self {
            max_dt,
            last: None,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Records a frame at `now` and returns the clamped delta in seconds.
    ///
    /// The first tick returns 0. A timestamp earlier than the previous one
    /// also returns 0 and becomes the new reference.
    pub fn tick(&mut self, now: Duration) -> f64 {
        let dt = match self.last {
            Some(last) => now
                .checked_sub(last)
                .map_or(0.0, |delta| delta.as_secs_f64().min(self.max_dt)),
            None => 0.0,
        };
        self.last = Some(now);
        self.elapsed += dt;
        self.frame += 1;
        dt
    }

    /// Advances by a fixed `dt`, for simulations without a real clock.
    ///
    /// The delta is clamped the same way as [`tick`](FrameClock::tick).
    pub fn advance(&mut self, dt: f64) -> f64 {
        let dt = if dt > 0.0 { dt.min(self.max_dt) } else { 0.0 };
        let step = Duration::try_from_secs_f64(dt).unwrap_or(Duration::MAX);
        self.last = Some(self.last.unwrap_or_default().saturating_add(step));
        self.elapsed += dt;
        self.frame += 1;
        dt
    }

    /// Clamp applied to every delta.
    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }

    /// Sum of all deltas handed out so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Forgets the previous timestamp, e.g. after the sketch was hidden.
    pub fn pause(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT)
    }
}
