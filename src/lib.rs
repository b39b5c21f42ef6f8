//! Building Topology
//!
//! A model of a physical building as a graph of rooms connected by doors,
//! grouped into floors, with shortest-path queries and flat-file persistence.
//!
//! # Overview
//!
//! Rooms carry window and light counts, a list of spatially adjacent rooms and
//! a list of rooms they have a door to. Doors are symmetric and may only join
//! adjacent rooms. A building keeps a name index over all of its floors and
//! answers shortest-path queries by breadth-first search over doors.
//!
//! ## Quick Start
//!
//! ```rust
//! use building_topology::*;
//!
//! let office = Room::new("office", 2, 3, vec!["hall".to_string()]);
//! let hall = Room::new("hall", 0, 2, vec!["office".to_string(), "stairs".to_string()]);
//! let stairs = Room::new("stairs", 1, 1, vec!["hall".to_string()]);
//!
//! let floor = Floor::from_rooms(vec![office, hall, stairs])?;
//! let mut building = Building::new("Main Complex", vec![floor])?;
//! building.connect_rooms(1, "office", "hall")?;
//! building.connect_rooms(1, "hall", "stairs")?;
//!
//! let path = building.find_path_by_name("office", "stairs")?.unwrap_or_default();
//! let names: Vec<&str> = path.iter().map(|room| room.name()).collect();
//! assert_eq!(names, ["office", "hall", "stairs"]);
//! # Ok::<(), building_topology::TopologyError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`facility`]: Rooms, floors and buildings
//! - [`storage`]: Building directories of per-floor JSON files
//! - [`service`]: Command dispatch and logging setup for the binary
//! - [`types`]: Command-line and file configuration
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Service   │    │   Storage   │
//! │             │    │             │    │             │
//! │ CliArgs     │───►│ Dispatch    │───►│ Load / Save │
//! │ AppConfig   │    │ Logging     │    │ Records     │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                    ┌──────────────────────────────┐
//!                    │           Facility           │
//!                    │  Building ─ Floor ─ Room     │
//!                    └──────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod error;
pub mod facility;
pub mod service;
pub mod storage;
pub mod types;

// Errors
pub use error::{StorageError, TopologyError, TopologyResult};

// Topology model
pub use facility::{Building, Floor, Room};

// Persistence
pub use storage::{BuildingMetadata, BuildingStore, FloorRecord, NewRoom, RoomRecord};

// Command dispatch and configuration
pub use service::{execute, Command, CommandOutput, LoggingConfig};
pub use types::{AppConfig, CliArgs, ConfigError, ConfigValidationError};
