//! Configuration types for the building topology tool
//!
//! - **CliArgs**: Command-line arguments (clap derive), including the command
//! - **ConfigFile**: Partial JSON configuration file
//! - **AppConfig**: Merged configuration (CLI and environment over file over
//!   defaults) with validation

pub mod config;

// Re-export all public types for convenience
pub use config::*;
