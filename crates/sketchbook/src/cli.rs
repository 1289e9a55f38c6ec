//! Command-line interface for `sketchbook`.
//!
//! # Examples
//!
//! ```bash
//! # Validate a sketch config and list its springs
//! sketchbook check sketch.toml
//!
//! # Two seconds of every spring at 60 fps, as JSON
//! sketchbook simulate sketch.toml
//!
//! # One spring as CSV, with debug logging
//! sketchbook -vv simulate sketch.toml --spring rotation --format csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogLevel;
use crate::sim::SimulationRequest;

/// Spring tuning and simulation for interactive sketches.
#[derive(Parser, Debug, Clone)]
#[command(name = "sketchbook", author, version, about)]
pub struct Cli {
    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a sketch config and list its springs
    Check {
        /// Path to the TOML config
        config: PathBuf,
    },

    /// Step springs offline and print their trajectories
    Simulate(SimulateArgs),
}

/// Arguments for the simulate subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SimulateArgs {
    /// Path to the TOML config
    pub config: PathBuf,

    /// Only simulate this spring
    #[arg(long, short = 's')]
    pub spring: Option<String>,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 2.0)]
    pub seconds: f64,

    /// Frames per second (defaults to the config's clock.fps)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Output format
    #[arg(long, short = 'f', default_value = "json")]
    pub format: OutputFormat,
}

impl SimulateArgs {
    /// The simulation these arguments describe.
    pub fn request(&self, config_fps: u32) -> SimulationRequest {
        SimulationRequest {
            seconds: self.seconds,
            fps: self.fps.unwrap_or(config_fps),
            spring: self.spring.clone(),
        }
    }
}

/// Simulation output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// One row per spring per frame
    Csv,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbose)
    }
}
