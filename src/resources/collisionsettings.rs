//! Collision configuration resource.
//!
//! Settings are read from an INI file. Missing files or keys keep the
//! defaults, which reproduce the legacy behavior.
//!
//! # Configuration File Format
//!
//! ```ini
//! [collision]
//! ; translate (default) or affine
//! bounds = translate
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::systems::collision::CollisionError;

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// How a local bounding box is brought into world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsMode {
    /// Translate by the entity position only. Rotation and scale are
    /// ignored.
    #[default]
    Translate,
    /// Apply [`Scale`](crate::components::scale::Scale) and
    /// [`Rotation`](crate::components::rotation::Rotation) to the box corners
    /// before translating, then take the enclosing box. Changes collision
    /// results for rotated or scaled entities.
    Affine,
}

impl FromStr for BoundsMode {
    type Err = CollisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translate" => Ok(BoundsMode::Translate),
            "affine" => Ok(BoundsMode::Affine),
            other => Err(CollisionError::Config(format!(
                "unknown bounds mode '{other}', expected 'translate' or 'affine'"
            ))),
        }
    }
}

/// Collision pass settings.
#[derive(Resource, Debug, Clone)]
pub struct CollisionSettings {
    pub bounds: BoundsMode,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSettings {
    pub fn new() -> Self {
        Self {
            bounds: BoundsMode::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn with_bounds(mut self, bounds: BoundsMode) -> Self {
        self.bounds = bounds;
        self
    }

    /// Load settings from `config_path`.
    ///
    /// A missing file keeps the current settings. Returns an error if the
    /// file exists but cannot be read or a value is malformed.
    pub fn load_from_file(&mut self) -> Result<(), CollisionError> {
        if !self.config_path.exists() {
            info!(
                "No collision config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(());
        }
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| CollisionError::Config(format!("failed to load config file: {e}")))?;
        self.apply(&config)?;
        info!(
            "Loaded collision config from {}: bounds={:?}",
            self.config_path.display(),
            self.bounds
        );
        Ok(())
    }

    /// Load settings from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), CollisionError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| CollisionError::Config(format!("failed to parse config: {e}")))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), CollisionError> {
        if let Some(bounds) = config.get("collision", "bounds") {
            self.bounds = bounds.parse()?;
        }
        Ok(())
    }
}
