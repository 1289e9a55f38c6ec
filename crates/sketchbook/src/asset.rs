//! Asset readiness.
//!
//! Images, path data and sound buffers arrive asynchronously. Instead of a
//! `loaded` flag polled every frame, each asset is a [`Readiness`] value that
//! moves through `Unloaded → Loading → Ready | Failed` exactly once, and an
//! [`AssetGate`] answers "can the sketch start yet?".

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Load state of a single asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Readiness<T> {
    /// Nothing requested yet.
    #[default]
    Unloaded,
    /// Request in flight.
    Loading,
    /// Loaded and usable.
    Ready(T),
    /// Loading failed; the reason is kept for display.
    Failed(String),
}

impl<T> Readiness<T> {
    /// Marks the load as started.
    ///
    /// Only valid from `Unloaded`.
    pub fn begin(&mut self) -> Result<()> {
        match self {
            Self::Unloaded => {
                *self = Self::Loading;
                Ok(())
            }
            other => Err(Error::Asset(format!(
                "cannot begin loading from state {}",
                other.state_name()
            ))),
        }
    }

    /// Stores the loaded value. Only valid while `Loading`.
    pub fn resolve(&mut self, value: T) -> Result<()> {
        match self {
            Self::Loading => {
                *self = Self::Ready(value);
                Ok(())
            }
            other => Err(Error::Asset(format!(
                "cannot resolve from state {}",
                other.state_name()
            ))),
        }
    }

    /// Records a failure. Only valid while `Loading`.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<()> {
        match self {
            Self::Loading => {
                *self = Self::Failed(reason.into());
                Ok(())
            }
            other => Err(Error::Asset(format!(
                "cannot fail from state {}",
                other.state_name()
            ))),
        }
    }

    /// Whether the value is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether loading has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }

    /// The loaded value, if ready.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Short lowercase name of the state, for messages.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Readiness of several named assets.
///
/// ```rust
/// use sketchbook::AssetGate;
///
/// let mut gate = AssetGate::new(["popup.png", "error.mp3"]);
/// gate.begin_all()?;
/// gate.resolve("popup.png")?;
/// assert!(!gate.all_ready());
///
/// gate.resolve("error.mp3")?;
/// assert!(gate.all_ready());
/// # Ok::<(), sketchbook::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    assets: BTreeMap<String, Readiness<()>>,
}

impl AssetGate {
    /// A gate over the given asset names, all unloaded.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: names
                .into_iter()
                .map(|name| (name.into(), Readiness::Unloaded))
                .collect(),
        }
    }

    /// Adds another asset, unloaded.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.assets.entry(name.into()).or_default();
    }

    /// Marks every unloaded asset as loading.
    pub fn begin_all(&mut self) -> Result<()> {
        for (name, state) in &mut self.assets {
            if matches!(state, Readiness::Unloaded) {
                state.begin()?;
                debug!(asset = %name, "asset loading");
            }
        }
        Ok(())
    }

    /// Marks `name` as loaded.
    pub fn resolve(&mut self, name: &str) -> Result<()> {
        self.state_mut(name)?.resolve(())?;
        debug!(asset = %name, "asset ready");
        Ok(())
    }

    /// Marks `name` as failed.
    pub fn fail(&mut self, name: &str, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        warn!(asset = %name, %reason, "asset failed");
        self.state_mut(name)?.fail(reason)
    }

    /// State of one asset.
    pub fn state(&self, name: &str) -> Option<&Readiness<()>> {
        self.assets.get(name)
    }

    /// Whether every asset loaded. An empty gate is ready.
    pub fn all_ready(&self) -> bool {
        self.assets.values().all(Readiness::is_ready)
    }

    /// Whether every asset finished loading, successfully or not.
    pub fn all_settled(&self) -> bool {
        self.assets.values().all(Readiness::is_settled)
    }

    /// Names and reasons of failed assets.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assets.iter().filter_map(|(name, state)| match state {
            Readiness::Failed(reason) => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }

    fn state_mut(&mut self, name: &str) -> Result<&mut Readiness<()>> {
        self.assets
            .get_mut(name)
            .ok_or_else(|| Error::Asset(format!("unknown asset {name:?}")))
    }
}
