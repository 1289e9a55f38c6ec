#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

//! # Kinema
//!
//! Motion primitives for small interactive sketches.
//!
//! Kinema provides:
//! - **Spring**: a scalar that homes toward a target, tuned by frequency
//!   (Hz) and half-life (seconds), with optional wrapping for angles
//! - **VerletPhysics**: a tiny world of round bodies under gravity
//! - **math**: `lerp`, `map_clamped` and shortest-arc angle interpolation
//!
//! ## Spring Example
//!
//! ```rust
//! use kinema::{Spring, SpringOptions, fps};
//!
//! let mut scale = Spring::new(SpringOptions::new(1.0).frequency(1.5).half_life(0.1));
//!
//! // Retarget whenever the sketch wants; step once per frame
//! scale.target = 2.0;
//! for _ in 0..120 {
//!     scale.step(fps(60));
//! }
//!
//! assert!((scale.position - 2.0).abs() < 0.01);
//! ```
//!
//! ## Verlet Example
//!
//! ```rust
//! use kinema::{BodyOptions, Vec2, VerletPhysics, fps};
//!
//! let mut physics = VerletPhysics::new().with_gravity(Vec2::new(0.0, 500.0));
//! let body = physics.create_body(BodyOptions::new(Vec2::new(200.0, 0.0), 12.0));
//!
//! physics.update(fps(60));
//! assert!(physics.body(body).unwrap().position.y > 0.0);
//! ```
//!
//! ## Tuning
//!
//! | frequency | half-life | feel |
//! |-----------|-----------|------|
//! | 2.5 Hz | 0.05 s | snappy, barely any wobble |
//! | 1.5 Hz | 0.1 s | quick with a small overshoot |
//! | 0.5 Hz | 0.8 s | slow, swinging |
//!
//! ## Features
//!
//! - `std` (default): use the standard library float functions
//! - `libm`: float functions for `no_std` builds
//! - `serde`: `Serialize`/`Deserialize` for options and vectors

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("kinema needs either the `std` or the `libm` feature");

pub mod math;
mod spring;
mod vector;
mod verlet;

pub use spring::{
    DEFAULT_FREQUENCY, DEFAULT_HALF_LIFE, MIN_FREQUENCY, MIN_HALF_LIFE, Spring, SpringOptions,
    SpringSettings, StepCoefficients, fps, wrap_signed,
};
pub use vector::Vec2;
pub use verlet::{Body, BodyId, BodyOptions, Bounds, CANVAS_GRAVITY, VerletPhysics};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::math::{lerp, lerp_angle_deg, map, map_clamped};
    pub use crate::spring::{Spring, SpringOptions, SpringSettings, fps};
    pub use crate::vector::Vec2;
    pub use crate::verlet::{BodyOptions, Bounds, VerletPhysics};
}
