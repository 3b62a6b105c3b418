//! Configuration for the selection transformation engine
//!
//! Provides the preferences the engine consults while dragging, file
//! handling and validation. Supports JSON and TOML file formats stored in
//! the platform-specific configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Transform preferences (bounding box mode, stroke policy, angle snapping)
//! - Snapping settings (tolerance, grid, which candidate categories snap)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use seltrans_core::{BBoxType, DisplayUnit, Point, ShowMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config directory
const APP_DIR: &str = "seltrans";

/// Default configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Preferences consulted by the transform engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPreferences {
    /// Reference bounding box used for handles and snapping
    pub bounding_box: BBoxType,
    /// Only snap the candidate point nearest to the pointer
    pub snap_closest_only: bool,
    /// Angle snapping divides pi into this many steps (0 disables)
    pub rotation_snap_divisions: u32,
    /// Scale stroke width together with the object
    pub transform_stroke: bool,
    /// Preserve transforms instead of optimizing them into the geometry
    pub preserve_transform: bool,
    /// Upper bound on special-point snap candidates
    pub max_snap_candidates: usize,
    /// Below this many items, bbox candidates are collected per item when translating
    pub per_item_bbox_limit: usize,
    /// Live preview mode while dragging
    pub show: ShowMode,
    /// Unit used in status messages
    pub display_unit: DisplayUnit,
    /// Aspect-ratio lock toggle (acts like holding Ctrl while scaling)
    pub lock_aspect: bool,
}

impl Default for TransformPreferences {
    fn default() -> Self {
        Self {
            bounding_box: BBoxType::Visual,
            snap_closest_only: false,
            rotation_snap_divisions: 12,
            transform_stroke: true,
            preserve_transform: false,
            max_snap_candidates: 200,
            per_item_bbox_limit: 50,
            show: ShowMode::Content,
            display_unit: DisplayUnit::Px,
            lock_aspect: false,
        }
    }
}

/// Rectangular snapping grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid origin in desktop coordinates
    pub origin: Point,
    /// Spacing along X and Y
    pub spacing: Point,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            origin: Point::zero(),
            spacing: Point::new(10.0, 10.0),
        }
    }
}

/// Snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Global snapping toggle
    pub enabled: bool,
    /// Snap distance in desktop units
    pub tolerance: f64,
    /// Weight of the pointer distance when ranking snaps (0..=1)
    pub snap_weight: f64,
    /// Snap bounding-box corners
    pub bbox_corners: bool,
    /// Snap bounding-box edge midpoints
    pub bbox_edge_midpoints: bool,
    /// Snap bounding-box midpoints
    pub bbox_midpoints: bool,
    /// Snap path nodes and special points
    pub nodes: bool,
    /// Optional grid to snap to
    pub grid: Option<GridSettings>,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 10.0,
            snap_weight: 0.5,
            bbox_corners: true,
            bbox_edge_midpoints: false,
            bbox_midpoints: false,
            nodes: true,
            grid: None,
        }
    }
}

impl SnapSettings {
    /// True when any bounding-box candidate category is enabled
    pub fn bbox_snappable(&self) -> bool {
        self.enabled && (self.bbox_corners || self.bbox_edge_midpoints || self.bbox_midpoints)
    }

    /// True when node/special-point candidates are enabled
    pub fn nodes_snappable(&self) -> bool {
        self.enabled && self.nodes
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Transform engine preferences
    pub transform: TransformPreferences,
    /// Snapping preferences
    pub snapping: SnapSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<platform config dir>/seltrans/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transform;
        if t.max_snap_candidates == 0 {
            return Err(ConfigError::out_of_range(
                "transform.max_snap_candidates",
                t.max_snap_candidates,
            ));
        }

        if t.rotation_snap_divisions > 360 {
            return Err(ConfigError::out_of_range(
                "transform.rotation_snap_divisions",
                t.rotation_snap_divisions,
            ));
        }

        let s = &self.snapping;
        if !(s.tolerance.is_finite() && s.tolerance > 0.0) {
            return Err(ConfigError::out_of_range("snapping.tolerance", s.tolerance));
        }

        if !(0.0..=1.0).contains(&s.snap_weight) {
            return Err(ConfigError::out_of_range("snapping.snap_weight", s.snap_weight));
        }

        if let Some(grid) = &s.grid {
            if !(grid.spacing.x > 0.0 && grid.spacing.y > 0.0) {
                return Err(ConfigError::out_of_range("snapping.grid.spacing", grid.spacing));
            }
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
