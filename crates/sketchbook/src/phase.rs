//! Phase state machines for sketch narratives.
//!
//! A sketch moves through a handful of phases (intro, interaction, outro,
//! done). Each phase is a variant of a user enum implementing [`Phase`]; the
//! enum says how long timed phases last and what follows them, and
//! [`PhaseMachine`] does the bookkeeping. Condition-based transitions (the
//! user finished drawing, a mask closed) go through
//! [`PhaseMachine::force`].
//!
//! # Example
//!
//! ```rust
//! use sketchbook::{Phase, PhaseMachine};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Story {
//!     Intro,
//!     Play,
//!     Outro,
//!     Done,
//! }
//!
//! impl Phase for Story {
//!     fn duration(self) -> Option<f64> {
//!         match self {
//!             Story::Intro => Some(2.0),
//!             Story::Outro => Some(0.8),
//!             Story::Play | Story::Done => None,
//!         }
//!     }
//!
//!     fn next(self) -> Option<Self> {
//!         match self {
//!             Story::Intro => Some(Story::Play),
//!             Story::Play => Some(Story::Outro),
//!             Story::Outro => Some(Story::Done),
//!             Story::Done => None,
//!         }
//!     }
//! }
//!
//! let mut machine = PhaseMachine::new(Story::Intro);
//! assert_eq!(machine.advance(2.5), Some(Story::Play));
//!
//! // Play has no duration; leave it when the sketch decides to
//! machine.force(Story::Outro);
//! machine.advance(1.0);
//! assert!(machine.is_finished());
//! ```

use std::fmt;

use tracing::debug;

/// Upper bound on transitions taken by a single [`PhaseMachine::advance`].
///
/// Protects against cycles of zero-length phases.
pub const MAX_TRANSITIONS_PER_ADVANCE: usize = 64;

/// One state of a sketch narrative.
pub trait Phase: Copy + Eq + fmt::Debug {
    /// How long the phase lasts, or `None` if it only ends when forced.
    fn duration(self) -> Option<f64>;

    /// The phase that follows this one. `None` marks a terminal phase.
    fn next(self) -> Option<Self>;

    /// The phase to be in after spending `elapsed` seconds in this one.
    ///
    /// Returns `None` while the phase should continue.
    fn transition(self, elapsed: f64) -> Option<Self> {
        match self.duration() {
            Some(duration) if elapsed >= duration => self.next(),
            _ => None,
        }
    }

    /// Whether reaching this phase completes the sketch.
    fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

/// Tracks the current phase and the time spent in it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseMachine<P> {
    current: P,
    elapsed: f64,
    total: f64,
}

impl<P: Phase> PhaseMachine<P> {
    /// Starts in `initial` with no time spent.
    pub fn new(initial: P) -> Self {
        Self {
            current: initial,
            elapsed: 0.0,
            total: 0.0,
        }
    }

    /// The current phase.
    pub fn current(&self) -> P {
        self.current
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds since the machine started.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Progress through a timed phase in `[0, 1]`; `None` for untimed phases.
    pub fn progress(&self) -> Option<f64> {
        self.current
            .duration()
            .map(|duration| if duration > 0.0 { (self.elapsed / duration).min(1.0) } else { 1.0 })
    }

    /// Whether the current phase is terminal.
    pub fn is_finished(&self) -> bool {
        self.current.is_terminal()
    }

    /// Adds `dt` seconds and follows every transition that falls due.
    ///
    /// Time left over after a timed phase ends carries into the next one, so
    /// one long frame can pass through several short phases. Returns the
    /// last phase entered, if any.
    pub fn advance(&mut self, dt: f64) -> Option<P> {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.elapsed += dt;
        self.total += dt;

        let mut entered = None;
        for _ in 0..MAX_TRANSITIONS_PER_ADVANCE {
            let Some(next) = self.current.transition(self.elapsed) else {
                break;
            };
            let spent = self.current.duration().unwrap_or(self.elapsed);
            debug!(from = ?self.current, to = ?next, spent, "phase transition");
            self.elapsed = (self.elapsed - spent).max(0.0);
            self.current = next;
            entered = Some(next);
        }
        entered
    }

    /// Jumps to `phase` immediately, resetting the time spent in it.
    pub fn force(&mut self, phase: P) {
        if phase != self.current {
            debug!(from = ?self.current, to = ?phase, "phase forced");
        }
        self.current = phase;
        self.elapsed = 0.0;
    }
}
