//! SelTrans Settings Crate
//!
//! Handles the preferences consulted by the transformation engine and their
//! persistence as JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{Config, GridSettings, SnapSettings, TransformPreferences};
pub use error::{ConfigError, SettingsError, SettingsResult};
