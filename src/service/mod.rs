//! Command-line service layer
//!
//! This module wraps the topology model for external callers:
//!
//! - **dispatch**: The command set, each command run as one load-mutate-save
//!   cycle against a [`BuildingStore`](crate::storage::BuildingStore)
//! - **logging**: Global tracing subscriber setup

pub mod dispatch;
pub mod logging;

// Re-export all public types for convenience
pub use dispatch::{execute, Command, CommandOutput};
pub use logging::{LoggingConfig, LoggingError};
