//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tree placement and rendering settings.
    pub trees: TreeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output backend a render pass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderBackend {
    /// Per-primitive geometry (columns, billboards).
    Immediate,
    /// Scene description with reusable templates.
    Scene,
}

/// Tree placement and rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
    /// Draw cross-shaped billboards instead of trunk and crown columns
    /// on the immediate backend.
    pub use_billboards: bool,
    /// Forest density override for every backend, in trees per square meter.
    pub trees_per_square_meter: Option<f64>,
    /// Forest density used by the immediate backend when no override is set.
    pub immediate_trees_per_square_meter: f64,
    /// Forest density used by the scene backend when no override is set.
    pub scene_trees_per_square_meter: f64,
    /// Minimum distance between forest trees as a fraction of the mean
    /// spacing `1 / sqrt(density)`.
    pub min_spacing_fraction: f64,
    /// Rejection-sampling attempts allowed per requested forest tree.
    pub max_attempts_per_tree: u32,
    /// Preferred distance between trees along a tree row, in meters.
    pub tree_row_spacing: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            use_billboards: false,
            trees_per_square_meter: None,
            immediate_trees_per_square_meter: 0.001,
            scene_trees_per_square_meter: 0.01,
            min_spacing_fraction: 0.3,
            max_attempts_per_tree: 30,
            tree_row_spacing: 8.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl TreeConfig {
    /// Forest density for the given backend, honoring the global override.
    ///
    /// The immediate backend defaults to an order of magnitude sparser
    /// placement than the scene backend.
    pub fn density_for(&self, backend: RenderBackend) -> f64 {
        self.trees_per_square_meter.unwrap_or(match backend {
            RenderBackend::Immediate => self.immediate_trees_per_square_meter,
            RenderBackend::Scene => self.scene_trees_per_square_meter,
        })
    }

    /// Checks that every numeric setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let densities = [
            ("trees.trees_per_square_meter", self.trees_per_square_meter),
            (
                "trees.immediate_trees_per_square_meter",
                Some(self.immediate_trees_per_square_meter),
            ),
            (
                "trees.scene_trees_per_square_meter",
                Some(self.scene_trees_per_square_meter),
            ),
        ];
        for (field, value) in densities {
            if let Some(v) = value
                && !(v.is_finite() && v >= 0.0)
            {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("density must be a finite non-negative number, got {v}"),
                });
            }
        }
        if !(self.min_spacing_fraction.is_finite() && self.min_spacing_fraction >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "trees.min_spacing_fraction",
                reason: format!("must be non-negative, got {}", self.min_spacing_fraction),
            });
        }
        if !(self.tree_row_spacing.is_finite() && self.tree_row_spacing > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "trees.tree_row_spacing",
                reason: format!("must be positive, got {}", self.tree_row_spacing),
            });
        }
        Ok(())
    }
}

/// Platform config directory for Sylvan (e.g. `~/.config/sylvan`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join("sylvan"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Persistence ---

impl Config {
    /// Read `config.ron` from `config_dir`. A missing file is replaced by
    /// freshly written defaults; a present one must parse and validate.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let config = Self::parse(&text)?;
                log::info!("Loaded tree settings from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                config.save(config_dir)?;
                log::info!("Wrote default tree settings to {}", path.display());
                Ok(config)
            }
            Err(source) => Err(ConfigError::Io {
                action: "read",
                path,
                source,
            }),
        }
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::io("create", config_dir))?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .struct_names(false)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;

        let path = config_dir.join(CONFIG_FILE);
        std::fs::write(&path, text).map_err(ConfigError::io("write", &path))
    }

    /// Re-read the file. `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let text = std::fs::read_to_string(&path).map_err(ConfigError::io("read", &path))?;
        let fresh = Self::parse(&text)?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Tree settings changed on disk");
        Ok(Some(fresh))
    }

    fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::from_str(text)?;
        config.trees.validate()?;
        Ok(config)
    }
}
