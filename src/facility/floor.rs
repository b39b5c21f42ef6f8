//! Floor membership and intra-floor door reconciliation
//!
//! A Floor is the collection of rooms on one building level. It owns room
//! membership: adding a room reconciles the doors the room claims toward its
//! floor-mates, and removing a room strips it from every floor-mate's doors.

use crate::error::{TopologyError, TopologyResult};
use crate::facility::room::Room;
use tracing::debug;

/// Represents one level of a building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Floor {
    rooms: Vec<Room>,
}

impl Floor {
    /// Create a new empty floor
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a floor from an initial room list
    ///
    /// Room names must be unique. Claimed doors are kept as given; a Building
    /// reconciles them when the floor is attached.
    pub fn from_rooms(rooms: Vec<Room>) -> TopologyResult<Self> {
        let mut floor = Self::new();
        for room in rooms {
            if floor.contains_room(room.name()) {
                return Err(TopologyError::DuplicateRoom(room.name().to_string()));
            }
            floor.rooms.push(room);
        }
        Ok(floor)
    }

    /// Rooms on this floor, in insertion order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Get the number of rooms on the floor
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Check if a room with this name is on the floor
    pub fn contains_room(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a room by name
    pub fn get_room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name() == name)
    }

    /// Get a mutable reference to a room by name
    pub fn get_room_by_name_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.name() == name)
    }

    /// Add a new room to the floor
    ///
    /// After the room is appended, every floor-mate named in the new room's
    /// door list gets `add_door` called with the new room, which establishes
    /// the reciprocal entry. Doors toward rooms on other floors are left for
    /// the Building to reconcile.
    pub fn add_room(&mut self, room: Room) -> TopologyResult<()> {
        if self.contains_room(room.name()) {
            return Err(TopologyError::DuplicateRoom(room.name().to_string()));
        }

        // Validate every floor-mate first so a failure leaves the floor unchanged
        for door in room.doors() {
            if let Some(mate) = self.get_room_by_name(door) {
                if mate.has_door(room.name()) {
                    return Err(TopologyError::duplicate_door(mate.name(), room.name()));
                }
                if !mate.is_adjacent_to(room.name()) {
                    return Err(TopologyError::invalid_adjacency(mate.name(), room.name()));
                }
            }
        }

        let claimed = room.doors().to_vec();
        self.rooms.push(room);
        let new_index = self.rooms.len() - 1;

        for door in claimed {
            let Some(mate_index) = self.position(&door) else {
                continue;
            };
            if mate_index == new_index {
                continue;
            }
            let (mate, new_room) = pair_mut(&mut self.rooms, mate_index, new_index);
            mate.add_door(new_room)?;
        }

        debug!(room = %self.rooms[new_index].name(), "room added to floor");
        Ok(())
    }

    /// Remove a room from the floor, returning it
    ///
    /// Door entries naming the room are stripped from every other room on
    /// this floor. Rooms on other floors are not visited.
    pub fn remove_room(&mut self, name: &str) -> TopologyResult<Room> {
        let index = self.position(name).ok_or_else(|| TopologyError::room_not_found(name))?;

        for other in self.rooms.iter_mut() {
            if other.name() != name {
                other.detach(name);
            }
        }

        debug!(room = %name, "room removed from floor");
        Ok(self.rooms.remove(index))
    }

    /// Get two distinct rooms of this floor mutably
    pub fn room_pair_mut(&mut self, first: &str, second: &str) -> TopologyResult<(&mut Room, &mut Room)> {
        let a = self.position(first).ok_or_else(|| TopologyError::room_not_found(first))?;
        let b = self.position(second).ok_or_else(|| TopologyError::room_not_found(second))?;
        if a == b {
            return Err(TopologyError::SelfDoor(first.to_string()));
        }
        Ok(pair_mut(&mut self.rooms, a, b))
    }

    /// Get all room names on this floor
    pub fn room_names(&self) -> Vec<&str> {
        self.rooms.iter().map(|room| room.name()).collect()
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.name() == name)
    }
}

/// Borrow two distinct elements of a slice mutably
pub(crate) fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut requires distinct indices");
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
