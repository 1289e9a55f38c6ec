//! Offline simulation of configured springs.
//!
//! Steps springs frame by frame without a window, for checking how a tuning
//! feels before putting it in a sketch, or for plotting.

use kinema::{Spring, fps};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SketchConfig;
use crate::error::{Error, Result};

/// Displacement and speed below which a spring counts as settled.
pub const SETTLE_THRESHOLD: f64 = 1e-3;

/// Largest number of frames a single request may simulate.
pub const MAX_FRAMES: u64 = 1_000_000;

/// What to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    /// Simulated duration in seconds.
    pub seconds: f64,
    /// Frame rate; each frame advances by `1 / fps` seconds.
    pub fps: u32,
    /// Only simulate this spring.
    pub spring: Option<String>,
}

impl SimulationRequest {
    /// All springs for `seconds` at `fps`.
    pub fn new(seconds: f64, fps: u32) -> Self {
        Self {
            seconds,
            fps,
            spring: None,
        }
    }

    /// Restricts the run to one spring.
    pub fn only(mut self, name: impl Into<String>) -> Self {
        self.spring = Some(name.into());
        self
    }

    /// Number of frames after the initial sample.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frames(&self) -> u64 {
        (self.seconds * f64::from(self.fps)).round() as u64
    }

    fn validate(&self) -> Result<()> {
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(Error::invalid_config(
                "seconds",
                format!("must be a non-negative number, got {}", self.seconds),
            ));
        }
        if self.fps == 0 {
            return Err(Error::invalid_config("fps", "must be at least 1"));
        }
        if self.seconds * f64::from(self.fps) > MAX_FRAMES as f64 {
            return Err(Error::invalid_config(
                "seconds",
                format!(
                    "{} s at {} fps exceeds the limit of {MAX_FRAMES} frames",
                    self.seconds, self.fps
                ),
            ));
        }
        Ok(())
    }
}

/// State of one spring at the end of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Frame index; 0 is the initial state.
    pub frame: u64,
    /// Simulated time in seconds.
    pub time: f64,
    /// Spring position.
    pub position: f64,
    /// Spring velocity.
    pub velocity: f64,
}

/// Samples of one spring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// Spring name from the config.
    pub name: String,
    /// Target the spring homed toward.
    pub target: f64,
    /// Wrap modulus, if any.
    pub wrap: Option<f64>,
    /// Time from which the spring stayed settled, if it did.
    pub settled_at: Option<f64>,
    /// One sample per frame, starting with the initial state.
    pub samples: Vec<Sample>,
}

impl Trajectory {
    /// The last sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

/// Result of [`simulate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    /// Sketch name from the config.
    pub sketch: Option<String>,
    /// Frame rate used.
    pub fps: u32,
    /// Frames simulated after the initial sample.
    pub frames: u64,
    /// One trajectory per spring, ordered by name.
    pub springs: Vec<Trajectory>,
}

impl Simulation {
    /// Trajectory of the named spring.
    pub fn trajectory(&self, name: &str) -> Option<&Trajectory> {
        self.springs.iter().find(|trajectory| trajectory.name == name)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// CSV with one row per spring per frame.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("spring,frame,time,position,velocity\n");
        for trajectory in &self.springs {
            for sample in &trajectory.samples {
                let row = format!(
                    "{},{},{},{},{}\n",
                    trajectory.name, sample.frame, sample.time, sample.position, sample.velocity
                );
                out.push_str(&row);
            }
        }
        out
    }
}

/// Steps the configured springs through `request.frames()` frames.
///
/// Each frame's delta goes through the config's [`FrameClock`], so a frame
/// rate below `1 / clock.max_dt` is simulated in slow motion exactly like a
/// struggling browser tab would.
///
/// [`FrameClock`]: crate::FrameClock
pub fn simulate(config: &SketchConfig, request: &SimulationRequest) -> Result<Simulation> {
    request.validate()?;

    let springs: Vec<(String, Spring)> = match &request.spring {
        Some(name) => vec![(name.clone(), config.spring(name)?)],
        None => config.springs().into_iter().collect(),
    };

    let frames = request.frames();
    let frame_dt = fps(request.fps);
    let trajectories = springs
        .into_iter()
        .map(|(name, spring)| run(config, name, spring, frames, frame_dt))
        .collect::<Vec<_>>();

    info!(
        springs = trajectories.len(),
        frames,
        fps = request.fps,
        "simulation finished"
    );

    Ok(Simulation {
        sketch: config.name.clone(),
        fps: request.fps,
        frames,
        springs: trajectories,
    })
}

fn run(config: &SketchConfig, name: String, mut spring: Spring, frames: u64, frame_dt: f64) -> Trajectory {
    let mut clock = config.clock.frame_clock();
    let mut samples = Vec::with_capacity(usize::try_from(frames).unwrap_or(0).saturating_add(1));
    let mut settled_at = spring.is_settled(SETTLE_THRESHOLD).then_some(0.0);

    samples.push(Sample {
        frame: 0,
        time: 0.0,
        position: spring.position,
        velocity: spring.velocity,
    });

    for frame in 1..=frames {
        let dt = clock.advance(frame_dt);
        spring.step(dt);

        let time = clock.elapsed();
        if spring.is_settled(SETTLE_THRESHOLD) {
            settled_at.get_or_insert(time);
        } else {
            settled_at = None;
        }

        samples.push(Sample {
            frame,
            time,
            position: spring.position,
            velocity: spring.velocity,
        });
    }

    debug!(spring = %name, ?settled_at, final_position = spring.position, "spring simulated");

    Trajectory {
        name,
        target: spring.target,
        wrap: spring.wrap(),
        settled_at,
        samples,
    }
}
