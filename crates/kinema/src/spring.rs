//! Frequency/half-life damped spring.
//!
//! A [`Spring`] smooths a scalar toward a target. It is tuned with two
//! numbers that are easy to reason about while looking at a sketch:
//!
//! - **frequency** (Hz): how many times per second the spring would swing
//!   back and forth around its target.
//! - **half-life** (seconds): how long it takes for the swing amplitude to
//!   halve.
//!
//! Each step evaluates the exact solution of the damped oscillator
//!
//! ```text
//! x(t) = e^(-d·t) · ( x₀·cos(ω·t) + (v₀ + d·x₀)/ω · sin(ω·t) )
//! ```
//!
//! with `ω = 2π·frequency` and `d = ln 2 / half_life`, so the result does not
//! depend on how the elapsed time is sliced into frames and never diverges,
//! whatever the step size.
//!
//! The coefficient layout follows Ryan Juckett's damped harmonic motion
//! write-up: <https://www.ryanjuckett.com/damped-springs/>
//!
//! # License
//!
//! ```text
//! Copyright (c) 2008-2012 Ryan Juckett
//! http://www.ryanjuckett.com/
//!
//! This software is provided 'as-is', without any express or implied
//! warranty. In no event will the authors be held liable for any damages
//! arising from the use of this software.
//!
//! Permission is granted to anyone to use this software for any purpose,
//! including commercial applications, and to alter it and redistribute it
//! freely, subject to the following restrictions:
//!
//! 1. The origin of this software must not be misrepresented; you must not
//!    claim that you wrote the original software. If you use this software
//!    in a product, an acknowledgment in the product documentation would be
//!    appreciated but is not required.
//!
//! 2. Altered source versions must be plainly marked as such, and must not be
//!    misrepresented as being the original software.
//!
//! 3. This notice may not be removed or altered from any source
//!    distribution.
//!
//! Altered in 2026: tuned by frequency and half-life instead of angular
//! frequency and damping ratio, with an optional wrap modulus.
//! ```

use core::f64::consts::{LN_2, TAU};

use crate::math::{ceil, cos, exp, sin};

/// Frequency used when none is given, in Hz.
pub const DEFAULT_FREQUENCY: f64 = 1.0;

/// Half-life used when none is given, in seconds.
pub const DEFAULT_HALF_LIFE: f64 = 0.1;

/// Smallest frequency a spring is tuned with. Lower values are clamped.
pub const MIN_FREQUENCY: f64 = 1e-6;

/// Smallest half-life a spring is tuned with. Lower values are clamped.
pub const MIN_HALF_LIFE: f64 = 1e-6;

/// Returns a time delta for a given number of frames per second.
///
/// Hosts usually measure the real frame delta instead; this is handy for
/// fixed-step simulations and tests.
///
/// # Example
///
/// ```rust
/// use kinema::{Spring, fps};
///
/// let mut spring = Spring::at(0.0).with_target(1.0);
/// spring.step(fps(60));
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / n as f64
}

/// Reduces `value` into the half-open range `(-modulus/2, modulus/2]`.
///
/// Used for cyclic quantities such as angles: the result is the shortest
/// signed representative of `value`.
///
/// ```rust
/// use kinema::wrap_signed;
///
/// assert_eq!(wrap_signed(358.0, 360.0), -2.0);
/// assert_eq!(wrap_signed(-180.0, 360.0), 180.0);
/// ```
#[inline]
pub fn wrap_signed(value: f64, modulus: f64) -> f64 {
    value - modulus * ceil(value / modulus - 0.5)
}

/// Tuning shared by any number of springs.
///
/// Construction precomputes the angular frequency and the decay rate so
/// stepping never repeats that work.
///
/// Frequencies and half-lives that are zero, negative or NaN are a caller
/// error; they are clamped to [`MIN_FREQUENCY`] and [`MIN_HALF_LIFE`] here,
/// once, rather than checked on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSettings {
    frequency: f64,
    half_life: f64,
    angular_frequency: f64,
    decay: f64,
}

impl SpringSettings {
    /// Creates settings from a frequency in Hz and a half-life in seconds.
    ///
    /// ```rust
    /// use kinema::SpringSettings;
    ///
    /// let snappy = SpringSettings::new(2.5, 0.05);
    /// let lazy = SpringSettings::new(0.5, 0.8);
    /// assert!(snappy.decay() > lazy.decay());
    /// ```
    pub fn new(frequency: f64, half_life: f64) -> Self {
        // f64::max discards NaN, so NaN lands on the minimum too
        let frequency = frequency.max(MIN_FREQUENCY);
        let half_life = half_life.max(MIN_HALF_LIFE);

        Self {
            frequency,
            half_life,
            angular_frequency: TAU * frequency,
            decay: LN_2 / half_life,
        }
    }

    /// Oscillation frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Amplitude half-life in seconds.
    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// Angular frequency `ω = 2π·frequency`, in radians per second.
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Decay rate `d = ln 2 / half_life`, per second.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Computes the step coefficients for a time step of `dt` seconds.
    pub fn coefficients(&self, dt: f64) -> StepCoefficients {
        StepCoefficients::new(self, dt)
    }
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY, DEFAULT_HALF_LIFE)
    }
}

/// Linear map from `(displacement, velocity)` to their values `dt` later.
///
/// Springs that share settings and are stepped by the same `dt` in a frame
/// can share one `StepCoefficients` through [`Spring::step_with`].
///
/// ```rust
/// use kinema::{Spring, SpringSettings, fps};
///
/// let settings = SpringSettings::new(2.5, 0.05);
/// let mut xs = [Spring::at(0.0), Spring::at(10.0)];
/// for spring in &mut xs {
///     spring.set_settings(settings);
///     spring.target = 5.0;
/// }
///
/// let coefficients = settings.coefficients(fps(60));
/// for spring in &mut xs {
///     spring.step_with(&coefficients);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    pos_pos_coef: f64,
    pos_vel_coef: f64,
    vel_pos_coef: f64,
    vel_vel_coef: f64,
}

impl StepCoefficients {
    /// Coefficients that leave every state unchanged.
    pub const IDENTITY: Self = Self {
        pos_pos_coef: 1.0,
        pos_vel_coef: 0.0,
        vel_pos_coef: 0.0,
        vel_vel_coef: 1.0,
    };

    /// Computes coefficients for the given settings and time step.
    ///
    /// Non-positive (or NaN) `dt` yields [`StepCoefficients::IDENTITY`].
    pub fn new(settings: &SpringSettings, dt: f64) -> Self {
        if !(dt > 0.0) {
            return Self::IDENTITY;
        }

        let omega = settings.angular_frequency;
        let decay = settings.decay;

        let exp_term = exp(-decay * dt);
        let cos_term = cos(omega * dt);
        let sin_term = sin(omega * dt);

        let inv_omega = 1.0 / omega;

        let exp_sin = exp_term * sin_term;
        let exp_cos = exp_term * cos_term;
        let exp_decay_sin_over_omega = exp_sin * decay * inv_omega;

        Self {
            pos_pos_coef: exp_cos + exp_decay_sin_over_omega,
            pos_vel_coef: exp_sin * inv_omega,
            vel_pos_coef: -exp_sin * (decay * decay + omega * omega) * inv_omega,
            vel_vel_coef: exp_cos - exp_decay_sin_over_omega,
        }
    }

    /// Applies the coefficients to a displacement/velocity pair.
    #[inline]
    pub fn apply(&self, displacement: f64, velocity: f64) -> (f64, f64) {
        (
            displacement * self.pos_pos_coef + velocity * self.pos_vel_coef,
            displacement * self.vel_pos_coef + velocity * self.vel_vel_coef,
        )
    }
}

/// Construction options for a [`Spring`].
///
/// Every field but `position` is optional: `target` falls back to `position`
/// (the spring starts at rest), `frequency` to [`DEFAULT_FREQUENCY`] and
/// `half_life` to [`DEFAULT_HALF_LIFE`].
///
/// ```rust
/// use kinema::{Spring, SpringOptions};
///
/// let rotation = Spring::new(
///     SpringOptions::new(180.0)
///         .frequency(0.5)
///         .half_life(0.805)
///         .wrap(360.0),
/// );
/// assert_eq!(rotation.wrap(), Some(360.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringOptions {
    /// Starting position.
    pub position: f64,
    /// Starting target; defaults to `position`.
    pub target: Option<f64>,
    /// Oscillation frequency in Hz.
    pub frequency: Option<f64>,
    /// Amplitude half-life in seconds.
    #[cfg_attr(feature = "serde", serde(alias = "halfLife"))]
    pub half_life: Option<f64>,
    /// Modulus for cyclic values such as angles in degrees.
    pub wrap: Option<f64>,
}

impl SpringOptions {
    /// Options for a spring resting at `position`.
    pub fn new(position: f64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the starting target.
    pub fn target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the frequency in Hz.
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the half-life in seconds.
    pub fn half_life(mut self, half_life: f64) -> Self {
        self.half_life = Some(half_life);
        self
    }

    /// Sets the wrap modulus.
    pub fn wrap(mut self, wrap: f64) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// The settings these options describe, with defaults filled in.
    pub fn settings(&self) -> SpringSettings {
        SpringSettings::new(
            self.frequency.unwrap_or(DEFAULT_FREQUENCY),
            self.half_life.unwrap_or(DEFAULT_HALF_LIFE),
        )
    }
}

/// A scalar that homes toward a target with damped oscillation.
///
/// `position`, `velocity` and `target` are plain fields. Reassigning
/// `target` at any time is how callers retarget the spring: the next
/// [`step`](Spring::step) continues from the current position and velocity,
/// so the motion stays continuous.
///
/// # Example
///
/// ```rust
/// use kinema::{Spring, SpringOptions, fps};
///
/// let mut spring = Spring::new(SpringOptions::new(0.0).frequency(2.0).half_life(0.2));
/// spring.target = 10.0;
///
/// // five seconds at 60 FPS
/// for _ in 0..300 {
///     spring.step(fps(60));
/// }
/// assert!((spring.position - 10.0).abs() < 0.01);
/// ```
///
/// # Wrapping
///
/// With a wrap modulus the spring treats its value as cyclic. The distance
/// to the target is always taken along the shorter way around, and
/// `position` is kept in `(-wrap/2, wrap/2]`.
///
/// ```rust
/// use kinema::{Spring, SpringOptions, fps};
///
/// let mut angle = Spring::new(SpringOptions::new(359.0).target(1.0).wrap(360.0));
/// // 359° is reported as -1°
/// assert_eq!(angle.position, -1.0);
/// angle.step(fps(60));
/// // moved up toward 1°, not down through 180°
/// assert!(angle.position > -1.0 && angle.position < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// Current value.
    pub position: f64,
    /// Current rate of change, in units per second.
    pub velocity: f64,
    /// Value the spring homes toward.
    pub target: f64,
    settings: SpringSettings,
    wrap: Option<f64>,
}

impl Spring {
    /// Creates a spring from options, at rest.
    pub fn new(options: SpringOptions) -> Self {
        let spring = Self {
            position: options.position,
            velocity: 0.0,
            target: options.target.unwrap_or(options.position),
            settings: options.settings(),
            wrap: None,
        };
        match options.wrap {
            Some(modulus) => spring.with_wrap(modulus),
            None => spring,
        }
    }

    /// Creates a spring resting at `position` with default settings.
    pub fn at(position: f64) -> Self {
        Self::new(SpringOptions::new(position))
    }

    /// Replaces the target.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: SpringSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Makes the spring cyclic with the given modulus.
    ///
    /// A modulus that is not strictly positive turns wrapping off.
    pub fn with_wrap(mut self, modulus: f64) -> Self {
        if modulus > 0.0 && modulus.is_finite() {
            self.wrap = Some(modulus);
            self.position = wrap_signed(self.position, modulus);
        } else {
            self.wrap = None;
        }
        self
    }

    /// Returns the current settings.
    pub fn settings(&self) -> SpringSettings {
        self.settings
    }

    /// Swaps in new settings without disturbing position or velocity.
    pub fn set_settings(&mut self, settings: SpringSettings) {
        self.settings = settings;
    }

    /// Returns the wrap modulus, if any.
    pub fn wrap(&self) -> Option<f64> {
        self.wrap
    }

    /// Signed offset from the target.
    ///
    /// For a wrapped spring this is the shortest way around.
    #[inline]
    pub fn displacement(&self) -> f64 {
        let delta = self.position - self.target;
        match self.wrap {
            Some(modulus) => wrap_signed(delta, modulus),
            None => delta,
        }
    }

    /// Advances the spring by `dt` seconds.
    ///
    /// `dt` of zero, less than zero or NaN leaves the spring untouched. There
    /// are no sub-steps: one call is one evaluation of the exact solution, so
    /// a long stalled frame lands closer to the target, never farther.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }
        let coefficients = self.settings.coefficients(dt);
        self.step_with(&coefficients);
    }

    /// Advances the spring with coefficients computed ahead of time.
    #[inline]
    pub fn step_with(&mut self, coefficients: &StepCoefficients) {
        let (displacement, velocity) = coefficients.apply(self.displacement(), self.velocity);

        let position = self.target + displacement;
        self.position = match self.wrap {
            Some(modulus) => wrap_signed(position, modulus),
            None => position,
        };
        self.velocity = velocity;
    }

    /// Jumps to `value` and stays there: target moves too, velocity is cleared.
    pub fn snap(&mut self, value: f64) {
        self.position = match self.wrap {
            Some(modulus) => wrap_signed(value, modulus),
            None => value,
        };
        self.target = value;
        self.velocity = 0.0;
    }

    /// Whether both the displacement and the velocity are under `threshold`.
    pub fn is_settled(&self, threshold: f64) -> bool {
        self.displacement().abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl From<SpringOptions> for Spring {
    fn from(options: SpringOptions) -> Self {
        Self::new(options)
    }
}
