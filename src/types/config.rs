//! Configuration structures for the building topology tool
//!
//! This module contains the command-line arguments, the optional JSON
//! configuration file and the merged application configuration with its
//! validation logic.

use crate::service::dispatch::Command;
use crate::storage::BuildingStore;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Building targeted when none is given
pub const DEFAULT_BUILDING: &str = "Main Complex";

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "building-topology",
    version,
    about = "Building topology tool - edit rooms, doors and floors of stored buildings",
    long_about = "Edits buildings stored as one JSON file per floor and finds shortest paths between rooms through doors.

EXAMPLES:
    # Show the stored files of the default building
    building-topology --building-dir ./buildings read

    # Add a room to floor 1 of another building
    building-topology --building HQ add-room 1 '{\"name\": \"lab\", \"windows\": 2, \"lights\": 4, \"adjacent_rooms\": [\"hall\"], \"doors\": [\"hall\"]}'

    # Find a path between two rooms
    building-topology find-path lobby lab

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments or BUILDING_DIR (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Root directory holding one directory per building
    #[arg(long, env = "BUILDING_DIR", help = "Root directory of stored buildings")]
    pub building_dir: Option<PathBuf>,

    /// Building to operate on
    #[arg(
        short,
        long,
        help = "Building name",
        long_help = "Name of the building directory to operate on. Default: Main Complex"
    )]
    pub building: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, help = "Directory for daily rolling log files")]
    pub log_dir: Option<String>,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Root directory holding one directory per building
    pub building_dir: Option<PathBuf>,

    /// Building to operate on when none is given
    pub default_building: Option<String>,

    /// Emit logs as JSON lines
    pub json_logs: Option<bool>,

    /// Directory for daily rolling log files
    pub log_directory: Option<String>,
}

/// Merged application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory holding one directory per building
    pub building_dir: Option<PathBuf>,

    /// Building to operate on when none is given
    pub default_building: String,

    /// Emit logs as JSON lines
    pub json_logs: bool,

    /// Directory for daily rolling log files
    pub log_directory: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the merged configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// No building directory from CLI, environment or file
    #[error("Building directory is not set (use --building-dir, BUILDING_DIR or the config file)")]
    MissingBuildingDir,

    /// Building name is empty
    #[error("Building name must not be empty")]
    EmptyBuildingName,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            building_dir: None,
            default_building: DEFAULT_BUILDING.to_string(),
            json_logs: false,
            log_directory: None,
        }
    }
}

impl AppConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            building_dir: config_file.building_dir.or(defaults.building_dir),
            default_building: config_file.default_building.unwrap_or(defaults.default_building),
            json_logs: config_file.json_logs.unwrap_or(defaults.json_logs),
            log_directory: config_file.log_directory.or(defaults.log_directory),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.building_dir {
            config.building_dir = Some(value);
        }
        if let Some(value) = args.building {
            config.default_building = value;
        }
        if args.json_logs {
            config.json_logs = true;
        }
        if let Some(value) = args.log_dir {
            config.log_directory = Some(value);
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.building_dir.is_none() {
            return Err(ConfigValidationError::MissingBuildingDir);
        }
        if self.default_building.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBuildingName);
        }
        Ok(())
    }

    /// Open the building store at the configured root
    pub fn store(&self) -> Result<BuildingStore, ConfigValidationError> {
        self.building_dir
            .as_ref()
            .map(BuildingStore::new)
            .ok_or(ConfigValidationError::MissingBuildingDir)
    }
}
