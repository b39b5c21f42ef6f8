//! Error types for the topology model and its storage
//!
//! The core raises [`TopologyError`]; the persistence adapter raises
//! [`StorageError`], which converts into `TopologyError::Storage` so that a
//! load-mutate-save cycle can propagate both with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by room, floor and building operations
#[derive(Debug, Error)]
pub enum TopologyError {
    /// A door between the two rooms already exists
    #[error("Door already exists to {other} from {room}")]
    DuplicateDoor {
        /// Room the door was added from
        room: String,
        /// Room the door would lead to
        other: String,
    },

    /// The target room is not listed as spatially adjacent
    #[error("Room {other} is not an adjacent room of {room}")]
    InvalidAdjacency {
        /// Room the door was added from
        room: String,
        /// Room the door would lead to
        other: String,
    },

    /// No door between the two rooms
    #[error("Door to {other} does not exist in {room}")]
    DoorNotFound {
        /// Room the door was removed from
        room: String,
        /// Room the door was expected to lead to
        other: String,
    },

    /// A room cannot have a door to itself
    #[error("Room {0} cannot have a door to itself")]
    SelfDoor(String),

    /// A count attribute was given a negative value
    #[error("Number of {field} cannot be negative, got {value}")]
    NegativeValue {
        /// Attribute being updated (`lights` or `windows`)
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// A room with this name already exists
    #[error("Room {0} already exists")]
    DuplicateRoom(String),

    /// No room with this name
    #[error("Room {0} not found")]
    RoomNotFound(String),

    /// Floor number outside the building (floor numbers are 1-based)
    #[error("Floor {0} does not exist in the building")]
    FloorNotFound(usize),

    /// Persisted building could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TopologyError {
    /// Create a duplicate door error
    pub fn duplicate_door(room: impl Into<String>, other: impl Into<String>) -> Self {
        Self::DuplicateDoor { room: room.into(), other: other.into() }
    }

    /// Create an invalid adjacency error
    pub fn invalid_adjacency(room: impl Into<String>, other: impl Into<String>) -> Self {
        Self::InvalidAdjacency { room: room.into(), other: other.into() }
    }

    /// Create a door not found error
    pub fn door_not_found(room: impl Into<String>, other: impl Into<String>) -> Self {
        Self::DoorNotFound { room: room.into(), other: other.into() }
    }

    /// Create a room not found error
    pub fn room_not_found(name: impl Into<String>) -> Self {
        Self::RoomNotFound(name.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            TopologyError::DuplicateDoor { .. }
            | TopologyError::InvalidAdjacency { .. }
            | TopologyError::DoorNotFound { .. }
            | TopologyError::SelfDoor(_) => "Door",
            TopologyError::NegativeValue { .. } => "Attribute",
            TopologyError::DuplicateRoom(_)
            | TopologyError::RoomNotFound(_)
            | TopologyError::FloorNotFound(_) => "Membership",
            TopologyError::Storage(_) => "Storage",
        }
    }
}

/// Errors raised while reading or writing a building directory
#[derive(Debug, Error)]
pub enum StorageError {
    /// The building directory does not exist
    #[error("Building directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The building directory holds no `floor_<N>.json` file
    #[error("No floor files found in {}", .0.display())]
    NoFloorFiles(PathBuf),

    /// A `floor_*.json` file whose suffix is not a floor number
    #[error("Invalid floor file name: {0}")]
    InvalidFloorFileName(String),

    /// Filesystem failure
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A file does not match the expected JSON schema
    #[error("Malformed building file {}: {source}", .path.display())]
    Malformed {
        /// Offending file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Metadata floor count disagrees with the floor files on disk
    #[error("Metadata declares {expected} floors but {found} floor files exist")]
    FloorCountMismatch {
        /// `num_floors` from the metadata file
        expected: usize,
        /// Number of floor files found
        found: usize,
    },

    /// Stored rooms or doors violate a topology invariant
    #[error("Building {building} has an invalid topology: {source}")]
    InvalidTopology {
        /// Building directory name
        building: String,
        /// The violated invariant
        #[source]
        source: Box<TopologyError>,
    },
}

impl StorageError {
    /// Create an IO error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a malformed-file error for a path
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed { path: path.into(), source }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            StorageError::MissingDirectory(_) | StorageError::NoFloorFiles(_) => "Missing",
            StorageError::InvalidFloorFileName(_)
            | StorageError::Malformed { .. }
            | StorageError::FloorCountMismatch { .. } => "Schema",
            StorageError::Io { .. } => "IO",
            StorageError::InvalidTopology { .. } => "Topology",
        }
    }
}

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_messages() {
        let error = TopologyError::duplicate_door("room1", "room2");
        assert_eq!(error.to_string(), "Door already exists to room2 from room1");

        let error = TopologyError::invalid_adjacency("room1", "room3");
        assert_eq!(error.to_string(), "Room room3 is not an adjacent room of room1");

        let error = TopologyError::NegativeValue { field: "lights", value: -1 };
        assert_eq!(error.to_string(), "Number of lights cannot be negative, got -1");

        let error = TopologyError::FloorNotFound(4);
        assert_eq!(error.to_string(), "Floor 4 does not exist in the building");
    }

    #[test]
    fn test_storage_error_converts_into_topology_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "gone");
        let error: TopologyError = StorageError::io("/tmp/missing", io_error).into();
        assert!(matches!(error, TopologyError::Storage(StorageError::Io { .. })));
        assert_eq!(error.category(), "Storage");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(TopologyError::duplicate_door("a", "b").category(), "Door");
        assert_eq!(TopologyError::SelfDoor("a".to_string()).category(), "Door");
        assert_eq!(TopologyError::room_not_found("a").category(), "Membership");
        assert_eq!(
            TopologyError::NegativeValue { field: "windows", value: -3 }.category(),
            "Attribute"
        );

        let missing = StorageError::MissingDirectory(PathBuf::from("/nowhere"));
        assert_eq!(missing.category(), "Missing");

        let mismatch = StorageError::FloorCountMismatch { expected: 2, found: 1 };
        assert_eq!(mismatch.category(), "Schema");
    }

    #[test]
    fn test_invalid_topology_keeps_source() {
        let error = StorageError::InvalidTopology {
            building: "hq".to_string(),
            source: Box::new(TopologyError::SelfDoor("lab".to_string())),
        };
        assert_eq!(
            error.to_string(),
            "Building hq has an invalid topology: Room lab cannot have a door to itself"
        );
        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Room lab cannot have a door to itself"));
    }
}
