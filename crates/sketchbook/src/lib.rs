#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

//! # Sketchbook
//!
//! Host plumbing for small interactive sketches built on [`kinema`].
//!
//! Sketchbook provides:
//! - **FrameClock**: clamped per-frame deltas from animation-loop timestamps
//! - **PhaseMachine**: timed and forced phases of a sketch narrative
//! - **AssetGate**: readiness of asynchronously loaded assets
//! - **Shape**: hit testing against SVG path outlines
//! - **SketchConfig**: spring and physics tuning loaded from TOML
//! - **simulate**: offline stepping of configured springs
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use sketchbook::{FrameClock, SketchConfig};
//!
//! let config = SketchConfig::from_toml_str(
//!     r#"
//!     [springs.scale]
//!     position = 1.0
//!     frequency = 1.5
//!     half_life = 0.1
//!     "#,
//! )?;
//!
//! let mut scale = config.spring("scale")?;
//! let mut clock = FrameClock::default();
//! clock.tick(Duration::ZERO);
//!
//! scale.target = 1.2;
//! for frame in 1..=120_u64 {
//!     let dt = clock.tick(Duration::from_millis(frame * 16));
//!     scale.step(dt);
//! }
//! assert!((scale.position - 1.2).abs() < 1e-3);
//! # Ok::<(), sketchbook::Error>(())
//! ```

pub mod asset;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod phase;
pub mod sim;

pub use asset::{AssetGate, Readiness};
pub use clock::{DEFAULT_MAX_DT, FrameClock};
pub use config::{ClockConfig, PhysicsConfig, SketchConfig};
pub use error::{Error, Result};
pub use geometry::{DEFAULT_CURVE_SEGMENTS, FillRule, Polygon, Rect, Shape, Transform2};
pub use phase::{MAX_TRANSITIONS_PER_ADVANCE, Phase, PhaseMachine};
pub use sim::{
    MAX_FRAMES, SETTLE_THRESHOLD, Sample, Simulation, SimulationRequest, Trajectory, simulate,
};

pub use kinema;
