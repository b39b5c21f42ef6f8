//! Room attributes and door management
//!
//! This module contains the Room struct: a named node of the building graph
//! with physical attributes and two adjacency notions. `adjacent_rooms` lists
//! the rooms spatially next to this one; `doors` lists the rooms it actually
//! connects to and is always kept symmetric by the door operations.

use crate::error::{TopologyError, TopologyResult};
use tracing::debug;

/// Represents a room within a floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    windows: u64,
    lights: u64,
    doors: Vec<String>,
    adjacent_rooms: Vec<String>,
}

impl Room {
    /// Create a new room without doors
    pub fn new(
        name: impl Into<String>,
        windows: u64,
        lights: u64,
        adjacent_rooms: Vec<String>,
    ) -> Self {
        Self { name: name.into(), windows, lights, doors: Vec::new(), adjacent_rooms }
    }

    /// Create a new room that claims doors to some of its adjacent rooms
    ///
    /// The claimed doors become symmetric once the room is added to a floor
    /// or building. Every claimed door must name an adjacent room other than
    /// the room itself; repeated names are collapsed.
    pub fn with_doors(
        name: impl Into<String>,
        windows: u64,
        lights: u64,
        adjacent_rooms: Vec<String>,
        doors: Vec<String>,
    ) -> TopologyResult<Self> {
        let mut room = Self::new(name, windows, lights, adjacent_rooms);
        for door in doors {
            if door == room.name {
                return Err(TopologyError::SelfDoor(door));
            }
            if !room.is_adjacent_to(&door) {
                return Err(TopologyError::invalid_adjacency(&room.name, door));
            }
            if !room.has_door(&door) {
                room.doors.push(door);
            }
        }
        Ok(room)
    }

    /// Rebuild a room from stored data without validating its door list
    pub(crate) fn restore(
        name: String,
        windows: u64,
        lights: u64,
        adjacent_rooms: Vec<String>,
        doors: Vec<String>,
    ) -> Self {
        Self { name, windows, lights, doors, adjacent_rooms }
    }

    /// Room name, unique within a building
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of windows
    pub fn windows(&self) -> u64 {
        self.windows
    }

    /// Number of lights
    pub fn lights(&self) -> u64 {
        self.lights
    }

    /// Names of the rooms this room has a door to, in insertion order
    pub fn doors(&self) -> &[String] {
        &self.doors
    }

    /// Names of the rooms spatially adjacent to this room
    pub fn adjacent_rooms(&self) -> &[String] {
        &self.adjacent_rooms
    }

    /// Check if this room has a door to the named room
    pub fn has_door(&self, name: &str) -> bool {
        self.doors.iter().any(|door| door == name)
    }

    /// Check if the named room is spatially adjacent
    pub fn is_adjacent_to(&self, name: &str) -> bool {
        self.adjacent_rooms.iter().any(|adjacent| adjacent == name)
    }

    /// Record a spatially adjacent room (no-op if already listed)
    pub fn add_adjacent_room(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.is_adjacent_to(&name) {
            self.adjacent_rooms.push(name);
        }
    }

    /// Add a door connecting to an adjacent room
    ///
    /// Both rooms list each other afterwards. The reciprocal entry is only
    /// appended when `other` does not already list this room.
    pub fn add_door(&mut self, other: &mut Room) -> TopologyResult<()> {
        if other.name == self.name {
            return Err(TopologyError::SelfDoor(self.name.clone()));
        }
        if self.has_door(&other.name) {
            return Err(TopologyError::duplicate_door(&self.name, &other.name));
        }
        if !self.is_adjacent_to(&other.name) {
            return Err(TopologyError::invalid_adjacency(&self.name, &other.name));
        }

        self.doors.push(other.name.clone());
        if !other.has_door(&self.name) {
            other.doors.push(self.name.clone());
        }

        debug!(room = %self.name, other = %other.name, "door added");
        Ok(())
    }

    /// Remove the door connecting to another room
    pub fn remove_door(&mut self, other: &mut Room) -> TopologyResult<()> {
        if !self.has_door(&other.name) {
            return Err(TopologyError::door_not_found(&self.name, &other.name));
        }

        self.doors.retain(|door| door != &other.name);
        other.detach(&self.name);

        debug!(room = %self.name, other = %other.name, "door removed");
        Ok(())
    }

    /// Update the number of lights in the room
    pub fn update_lights(&mut self, new_count: i64) -> TopologyResult<()> {
        self.lights = non_negative("lights", new_count)?;
        Ok(())
    }

    /// Update the number of windows in the room
    pub fn update_windows(&mut self, new_count: i64) -> TopologyResult<()> {
        self.windows = non_negative("windows", new_count)?;
        Ok(())
    }

    /// Drop any door entry naming `name`, returning whether one was present
    pub(crate) fn detach(&mut self, name: &str) -> bool {
        let before = self.doors.len();
        self.doors.retain(|door| door != name);
        self.doors.len() != before
    }

    /// Append a door entry without validation (caller keeps the graph symmetric)
    pub(crate) fn attach(&mut self, name: &str) {
        if !self.has_door(name) {
            self.doors.push(name.to_string());
        }
    }

    /// Take the claimed door list, leaving the room doorless
    pub(crate) fn take_doors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.doors)
    }
}

fn non_negative(field: &'static str, value: i64) -> TopologyResult<u64> {
    u64::try_from(value).map_err(|_| TopologyError::NegativeValue { field, value })
}
