//! Building topology model
//!
//! This module models the physical layout of a building as a graph:
//!
//! - **Room**: A named node with window and light counts, the rooms it is
//!   spatially adjacent to, and the rooms it has a door to
//! - **Floor**: The rooms of one level, owning room membership
//! - **Building**: Ordered floors plus a building-wide room index and
//!   shortest-path search over doors
//!
//! Doors are always symmetric: if room A lists a door to B, then B lists a
//! door to A. A door can only be added toward a room listed as adjacent.
//!
//! # Usage Example
//!
//! ```rust
//! use building_topology::facility::*;
//!
//! let lobby = Room::new("lobby", 2, 4, vec!["hall".to_string()]);
//! let hall = Room::new("hall", 0, 2, vec!["lobby".to_string()]);
//! let floor = Floor::from_rooms(vec![lobby, hall]).unwrap();
//!
//! let mut building = Building::new("Main Complex", vec![floor]).unwrap();
//! building.connect_rooms(1, "lobby", "hall").unwrap();
//!
//! let path = building.find_path_by_name("lobby", "hall").unwrap().unwrap();
//! assert_eq!(path.len(), 2);
//! ```

pub mod building;
pub mod floor;
pub mod room;

// Re-export all public types for convenience
pub use building::Building;
pub use floor::Floor;
pub use room::Room;
