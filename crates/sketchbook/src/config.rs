//! Sketch configuration.
//!
//! A sketch's tuning constants live in a TOML file instead of module-level
//! constants, so they can be tweaked and checked without touching code.
//!
//! ```toml
//! name = "malcolm-2"
//!
//! [clock]
//! max_dt = 0.1
//! fps = 60
//!
//! [physics]
//! gravity = { x = 0.0, y = 500.0 }
//! bounds = { bottom = 1080.0 }
//!
//! [springs.y]
//! position = -1080.0
//! target = 0.0
//! frequency = 1.5
//! half_life = 0.05
//!
//! [springs.rotation]
//! position = 180.0
//! frequency = 0.5
//! half_life = 0.805
//! wrap = 360.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use kinema::{Bounds, CANVAS_GRAVITY, Spring, SpringOptions, Vec2, VerletPhysics};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{DEFAULT_MAX_DT, FrameClock};
use crate::error::{Error, Result};

/// Top-level sketch configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Display name of the sketch.
    pub name: Option<String>,
    /// Frame timing.
    pub clock: ClockConfig,
    /// Particle world, if the sketch uses one.
    pub physics: Option<PhysicsConfig>,
    /// Named springs.
    pub springs: BTreeMap<String, SpringOptions>,
}

/// Frame timing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Largest frame delta in seconds.
    pub max_dt: f64,
    /// Frame rate used for offline simulation.
    pub fps: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_dt: DEFAULT_MAX_DT,
            fps: 60,
        }
    }
}

impl ClockConfig {
    /// A frame clock with this clamp.
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.max_dt)
    }
}

/// Particle world settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Gravity in pixels per second squared.
    pub gravity: Vec2,
    /// Fraction of velocity lost per update.
    pub drag: f64,
    /// Fraction of velocity kept after a wall hit.
    pub restitution: f64,
    /// Walls.
    pub bounds: Option<Bounds>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: CANVAS_GRAVITY,
            drag: 0.0,
            restitution: 0.3,
            bounds: None,
        }
    }
}

impl PhysicsConfig {
    /// An empty world with these settings.
    pub fn build(&self) -> VerletPhysics {
        let physics = VerletPhysics::new()
            .with_gravity(self.gravity)
            .with_drag(self.drag)
            .with_restitution(self.restitution);
        match self.bounds {
            Some(bounds) => physics.with_bounds(bounds),
            None => physics,
        }
    }
}

impl SketchConfig {
    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading sketch config");
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            name = config.name.as_deref().unwrap_or("unnamed"),
            springs = config.springs.len(),
            "loaded sketch config"
        );
        Ok(config)
    }

    /// Checks every value the runtime would otherwise clamp or misbehave on.
    pub fn validate(&self) -> Result<()> {
        positive("clock.max_dt", self.clock.max_dt)?;
        if self.clock.fps == 0 {
            return Err(Error::invalid_config("clock.fps", "must be at least 1"));
        }

        for (name, options) in &self.springs {
            finite(&format!("springs.{name}.position"), options.position)?;
            if let Some(target) = options.target {
                finite(&format!("springs.{name}.target"), target)?;
            }
            if let Some(frequency) = options.frequency {
                positive(&format!("springs.{name}.frequency"), frequency)?;
            }
            if let Some(half_life) = options.half_life {
                positive(&format!("springs.{name}.half_life"), half_life)?;
            }
            if let Some(wrap) = options.wrap {
                positive(&format!("springs.{name}.wrap"), wrap)?;
            }
        }

        if let Some(physics) = &self.physics {
            finite("physics.gravity.x", physics.gravity.x)?;
            finite("physics.gravity.y", physics.gravity.y)?;
            unit("physics.drag", physics.drag)?;
            unit("physics.restitution", physics.restitution)?;
        }
        Ok(())
    }

    /// Builds the named spring.
    pub fn spring(&self, name: &str) -> Result<Spring> {
        self.springs
            .get(name)
            .map(|options| Spring::new(*options))
            .ok_or_else(|| Error::UnknownSpring(name.to_string()))
    }

    /// Builds every spring, keyed by name.
    pub fn springs(&self) -> BTreeMap<String, Spring> {
        self.springs
            .iter()
            .map(|(name, options)| (name.clone(), Spring::new(*options)))
            .collect()
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_config(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(field, format!("must be positive, got {value}")))
    }
}

fn unit(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_config(field, format!("must be within [0, 1], got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name = "malcolm-2"

[clock]
max_dt = 0.05

[physics]
gravity = { x = 0.0, y = 500.0 }
bounds = { bottom = 1080.0 }

[springs.y]
position = -1080.0
target = 0.0
frequency = 1.5
half_life = 0.05

[springs.rotation]
position = 180.0
frequency = 0.5
halfLife = 0.805
wrap = 360.0
"#;

    #[test]
    fn parses_sample() {
        let config = SketchConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.name.as_deref(), Some("malcolm-2"));
        assert_eq!(config.clock.max_dt, 0.05);
        assert_eq!(config.clock.fps, 60);
        assert_eq!(config.springs.len(), 2);

        let rotation = config.spring("rotation").unwrap();
        assert_eq!(rotation.wrap(), Some(360.0));
        assert_eq!(rotation.settings().half_life(), 0.805);
        assert_eq!(rotation.target, 180.0);

        let physics = config.physics.unwrap();
        assert_eq!(physics.gravity, Vec2::new(0.0, 500.0));
        assert_eq!(physics.bounds.unwrap().bottom, Some(1080.0));
        assert_eq!(physics.restitution, 0.3);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = SketchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SketchConfig::default());
        assert_eq!(config.clock.frame_clock().max_dt(), DEFAULT_MAX_DT);
    }

    #[test]
    fn unknown_spring() {
        let config = SketchConfig::default();
        assert!(matches!(config.spring("nope"), Err(Error::UnknownSpring(name)) if name == "nope"));
    }

    #[test]
    fn rejects_non_positive_tuning() {
        let err = SketchConfig::from_toml_str("[springs.a]\nfrequency = 0.0\n").unwrap_err();
        assert!(matches!(&err, Error::InvalidConfig { field, .. } if field == "springs.a.frequency"));

        let err = SketchConfig::from_toml_str("[springs.a]\nhalf_life = -0.1\n").unwrap_err();
        assert!(err.to_string().contains("springs.a.half_life"));

        let err = SketchConfig::from_toml_str("[springs.a]\nwrap = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("springs.a.wrap"));
    }

    #[test]
    fn rejects_bad_clock_and_physics() {
        assert!(SketchConfig::from_toml_str("[clock]\nmax_dt = 0.0\n").is_err());
        assert!(SketchConfig::from_toml_str("[clock]\nfps = 0\n").is_err());
        assert!(SketchConfig::from_toml_str("[physics]\ndrag = 1.5\n").is_err());
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let err = SketchConfig::from_toml_str("colour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn builds_physics_world() {
        let config = SketchConfig::from_toml_str(SAMPLE).unwrap();
        let world = config.physics.unwrap().build();
        assert_eq!(world.gravity(), Vec2::new(0.0, 500.0));
        assert_eq!(world.bounds().unwrap().bottom, Some(1080.0));
        assert!(world.is_empty());
    }

    #[test]
    fn builds_all_springs() {
        let config = SketchConfig::from_toml_str(SAMPLE).unwrap();
        let springs = config.springs();
        assert_eq!(springs.keys().collect::<Vec<_>>(), vec!["rotation", "y"]);
        assert_eq!(springs["y"].position, -1080.0);
        assert_eq!(springs["y"].target, 0.0);
    }
}
