//! GCodeMesh Settings Crate
//!
//! Handles the configuration file: importer limits, mesh material colours,
//! output format and logging level.

pub mod config;
pub mod error;

pub use config::{
    Config, ImporterConfig, LoggingSettings, MaterialConfig, OutputFormat, OutputSettings,
    CONFIG_FILE_NAME,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
