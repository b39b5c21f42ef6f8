//! Command dispatch over a building store
//!
//! Every command is one load-mutate-save cycle against a [`BuildingStore`].
//! Structured errors stop here: the caller gets a response text and a success
//! flag, with failures rendered as `Error occurred: <message chain>`.

use crate::error::{StorageError, TopologyError};
use crate::facility::Building;
use crate::storage::{BuildingStore, FloorRecord, NewRoom};
use anyhow::Context;
use clap::Subcommand;
use tracing::{info, warn};

/// Operations available on a stored building
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print every file of the building directory
    Read,

    /// Append a floor given as `{"rooms": {<name>: {...}}}` JSON
    AddFloor {
        /// Floor data JSON
        floor_data: String,
    },

    /// Add a room to a floor, announcing it to its same-floor neighbours
    AddRoom {
        /// 1-based floor number
        floor: usize,
        /// Room JSON: `{"name", "windows", "lights", "adjacent_rooms", "doors"}`
        room: String,
    },

    /// Remove a room from a floor
    RemoveRoom {
        /// 1-based floor number
        floor: usize,
        /// Room name
        room: String,
    },

    /// Add a door between two rooms of a floor
    AddDoor {
        /// 1-based floor number
        floor: usize,
        /// Room name
        room: String,
        /// Adjacent room name
        adjacent: String,
    },

    /// Remove the door between two rooms of a floor
    RemoveDoor {
        /// 1-based floor number
        floor: usize,
        /// Room name
        room: String,
        /// Adjacent room name
        adjacent: String,
    },

    /// Set the number of lights in a room
    UpdateLights {
        /// 1-based floor number
        floor: usize,
        /// Room name
        room: String,
        /// New number of lights
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Set the number of windows in a room
    UpdateWindows {
        /// 1-based floor number
        floor: usize,
        /// Room name
        room: String,
        /// New number of windows
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Find a shortest path between two rooms through doors
    FindPath {
        /// Start room name
        start: String,
        /// End room name
        end: String,
    },
}

impl Command {
    /// Short command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read => "read",
            Command::AddFloor { .. } => "add-floor",
            Command::AddRoom { .. } => "add-room",
            Command::RemoveRoom { .. } => "remove-room",
            Command::AddDoor { .. } => "add-door",
            Command::RemoveDoor { .. } => "remove-door",
            Command::UpdateLights { .. } => "update-lights",
            Command::UpdateWindows { .. } => "update-windows",
            Command::FindPath { .. } => "find-path",
        }
    }
}

/// Response to a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Response text
    pub text: String,
    /// Whether the command succeeded
    pub success: bool,
}

impl CommandOutput {
    fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), success: true }
    }

    fn failure(error: &anyhow::Error) -> Self {
        Self { text: format!("Error occurred: {:#}", error), success: false }
    }
}

/// Run a command against the named building
///
/// `read` and `find-path` only load the building; every other command loads
/// it, applies the change and saves it back. Nothing is written on failure.
pub fn execute(store: &BuildingStore, building_name: &str, command: &Command) -> CommandOutput {
    info!(building = %building_name, command = command.name(), "command received");

    let result = match command {
        Command::Read => read_building(store, building_name),
        Command::FindPath { start, end } => find_path(store, building_name, start, end),
        Command::AddFloor { floor_data } => mutate(store, building_name, |building| {
            let record: FloorRecord =
                serde_json::from_str(floor_data).context("invalid floor data")?;
            building.add_floor(record.into_floor()?)?;
            Ok("Floor added successfully")
        }),
        Command::AddRoom { floor, room } => mutate(store, building_name, |building| {
            let room: NewRoom = serde_json::from_str(room).context("invalid room data")?;
            building.add_room(*floor, room.into_room()?)?;
            Ok("Room added successfully")
        }),
        Command::RemoveRoom { floor, room } => mutate(store, building_name, |building| {
            building.remove_room(*floor, room)?;
            Ok("Room removed successfully")
        }),
        Command::AddDoor { floor, room, adjacent } => mutate(store, building_name, |building| {
            building.connect_rooms(*floor, room, adjacent)?;
            Ok("Door added successfully")
        }),
        Command::RemoveDoor { floor, room, adjacent } => {
            mutate(store, building_name, |building| {
                building.disconnect_rooms(*floor, room, adjacent)?;
                Ok("Door removed successfully")
            })
        }
        Command::UpdateLights { floor, room, count } => {
            mutate(store, building_name, |building| {
                building.update_lights(*floor, room, *count)?;
                Ok("Lights updated successfully")
            })
        }
        Command::UpdateWindows { floor, room, count } => {
            mutate(store, building_name, |building| {
                building.update_windows(*floor, room, *count)?;
                Ok("Windows updated successfully")
            })
        }
    };

    match result {
        Ok(text) => CommandOutput::success(text),
        Err(error) => {
            warn!(
                building = %building_name,
                command = command.name(),
                category = error_category(&error),
                error = %format!("{:#}", error),
                "command failed"
            );
            CommandOutput::failure(&error)
        }
    }
}

/// Category of the structured error behind a failure, `Input` for bad JSON
fn error_category(error: &anyhow::Error) -> &'static str {
    if let Some(storage) = error.downcast_ref::<StorageError>() {
        storage.category()
    } else if let Some(topology) = error.downcast_ref::<TopologyError>() {
        topology.category()
    } else {
        "Input"
    }
}

fn read_building(store: &BuildingStore, building_name: &str) -> anyhow::Result<String> {
    let files = store
        .read_raw(building_name)
        .with_context(|| format!("failed to read building {}", building_name))?;

    let mut message = String::new();
    for (file_name, data) in files {
        message.push_str(&format!("Floor {}: {}\n", file_name, data));
    }
    Ok(format!("Building data: {}", message))
}

fn find_path(
    store: &BuildingStore,
    building_name: &str,
    start: &str,
    end: &str,
) -> anyhow::Result<String> {
    let building = load(store, building_name)?;
    let text = match building.find_path_by_name(start, end)? {
        Some(path) => {
            let names: Vec<&str> = path.iter().map(|room| room.name()).collect();
            format!("Path found: {}", names.join(" -> "))
        }
        None => "No path found".to_string(),
    };
    Ok(text)
}

/// Load, change and save a building
fn mutate<F>(store: &BuildingStore, building_name: &str, change: F) -> anyhow::Result<String>
where
    F: FnOnce(&mut Building) -> anyhow::Result<&'static str>,
{
    let mut building = load(store, building_name)?;
    let text = change(&mut building)?;
    store
        .save(&building, building_name)
        .with_context(|| format!("failed to save building {}", building_name))?;
    Ok(text.to_string())
}

fn load(store: &BuildingStore, building_name: &str) -> anyhow::Result<Building> {
    store
        .load(building_name)
        .with_context(|| format!("failed to load building {}", building_name))
}
