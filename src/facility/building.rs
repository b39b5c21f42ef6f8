//! Building structure, room index and path-finding
//!
//! This module contains the Building struct: the ordered floors of a building
//! plus a name index spanning all of them. Floors are only reachable mutably
//! through Building methods, and every structural change (floors or rooms
//! added or removed) rebuilds the index before returning, so lookups never
//! see a stale room position.

use crate::error::{TopologyError, TopologyResult};
use crate::facility::floor::Floor;
use crate::facility::room::Room;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// Represents a building made of ordered floors
#[derive(Debug, Clone)]
pub struct Building {
    name: String,
    floors: Vec<Floor>,
    /// Quick lookup map from room name to (floor_index, room_index)
    room_index: HashMap<String, (usize, usize)>,
}

impl Building {
    /// Create a building from a list of floors
    ///
    /// Room names must be unique across floors. Doors claimed by the rooms are
    /// reconciled into symmetric edges: each claimed door must name a room of
    /// the building other than the claimer, and at least one of the two rooms
    /// must list the other as adjacent.
    pub fn new(name: impl Into<String>, floors: Vec<Floor>) -> TopologyResult<Self> {
        let mut building = Self { name: name.into(), floors, room_index: HashMap::new() };
        building.rebuild_index()?;
        building.reconcile_doors()?;

        debug!(
            building = %building.name,
            floors = building.floor_count(),
            rooms = building.room_count(),
            "building assembled"
        );
        Ok(building)
    }

    /// Display name of the building
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All floors, lowest first
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Get a floor by its 1-based number
    pub fn floor(&self, number: usize) -> Option<&Floor> {
        number.checked_sub(1).and_then(|index| self.floors.get(index))
    }

    /// Get the number of floors
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Get the total number of rooms across all floors
    pub fn room_count(&self) -> usize {
        self.room_index.len()
    }

    /// Get a room by name (searches all floors)
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.room_index
            .get(name)
            .and_then(|&(floor_idx, room_idx)| self.floors.get(floor_idx)?.rooms().get(room_idx))
    }

    /// Check if a room exists anywhere in the building
    pub fn contains_room(&self, name: &str) -> bool {
        self.room_index.contains_key(name)
    }

    /// Get the 1-based number of the floor holding a room
    pub fn floor_number_of(&self, name: &str) -> Option<usize> {
        self.room_index.get(name).map(|&(floor_idx, _)| floor_idx + 1)
    }

    /// Append a floor, returning its 1-based number
    pub fn add_floor(&mut self, floor: Floor) -> TopologyResult<usize> {
        if let Some(existing) = floor.rooms().iter().find(|room| self.contains_room(room.name())) {
            return Err(TopologyError::DuplicateRoom(existing.name().to_string()));
        }

        self.floors.push(floor);
        self.rebuild_index()?;
        if let Err(error) = self.reconcile_doors() {
            self.floors.pop();
            self.rebuild_index()?;
            return Err(error);
        }

        info!(building = %self.name, floor = self.floors.len(), "floor added");
        Ok(self.floors.len())
    }

    /// Remove a floor by its 1-based number, returning it
    ///
    /// Doors from the remaining floors into the removed rooms are dropped.
    pub fn remove_floor(&mut self, number: usize) -> TopologyResult<Floor> {
        let index = self.floor_index(number)?;
        let floor = self.floors.remove(index);
        for room in floor.rooms() {
            self.strip_door_references(room.name(), None);
        }
        self.rebuild_index()?;

        info!(building = %self.name, floor = number, "floor removed");
        Ok(floor)
    }

    /// Add a room to a floor
    ///
    /// Same-floor rooms named in the new room's `adjacent_rooms` record it as
    /// adjacent in return, then the floor reconciles same-floor doors and the
    /// building reconciles doors claimed toward other floors.
    pub fn add_room(&mut self, floor_number: usize, room: Room) -> TopologyResult<()> {
        let index = self.floor_index(floor_number)?;
        if self.contains_room(room.name()) {
            return Err(TopologyError::DuplicateRoom(room.name().to_string()));
        }
        if let Some(missing) = room.doors().iter().find(|door| !self.contains_room(door)) {
            return Err(TopologyError::room_not_found(missing.as_str()));
        }

        let floor = &mut self.floors[index];
        for adjacent in room.adjacent_rooms() {
            if let Some(mate) = floor.get_room_by_name_mut(adjacent) {
                mate.add_adjacent_room(room.name());
            }
        }

        let name = room.name().to_string();
        floor.add_room(room)?;
        self.rebuild_index()?;
        if let Err(error) = self.reconcile_doors() {
            self.floors[index].remove_room(&name)?;
            self.rebuild_index()?;
            return Err(error);
        }

        info!(building = %self.name, floor = floor_number, room = %name, "room added");
        Ok(())
    }

    /// Remove a room from a floor, returning it
    ///
    /// Door entries naming the room are stripped from every floor.
    pub fn remove_room(&mut self, floor_number: usize, name: &str) -> TopologyResult<Room> {
        let index = self.floor_index(floor_number)?;
        let room = self.floors[index].remove_room(name)?;
        self.strip_door_references(name, Some(index));
        self.rebuild_index()?;

        info!(building = %self.name, floor = floor_number, room = %name, "room removed");
        Ok(room)
    }

    /// Add a door between two rooms of the same floor
    pub fn connect_rooms(
        &mut self,
        floor_number: usize,
        room: &str,
        adjacent: &str,
    ) -> TopologyResult<()> {
        let index = self.floor_index(floor_number)?;
        let (room, adjacent) = self.floors[index].room_pair_mut(room, adjacent)?;
        room.add_door(adjacent)
    }

    /// Remove the door between two rooms of the same floor
    pub fn disconnect_rooms(
        &mut self,
        floor_number: usize,
        room: &str,
        adjacent: &str,
    ) -> TopologyResult<()> {
        let index = self.floor_index(floor_number)?;
        let (room, adjacent) = self.floors[index].room_pair_mut(room, adjacent)?;
        room.remove_door(adjacent)
    }

    /// Update the number of lights in a room of a floor
    pub fn update_lights(&mut self, floor_number: usize, name: &str, count: i64) -> TopologyResult<()> {
        self.floor_room_mut(floor_number, name)?.update_lights(count)
    }

    /// Update the number of windows in a room of a floor
    pub fn update_windows(&mut self, floor_number: usize, name: &str, count: i64) -> TopologyResult<()> {
        self.floor_room_mut(floor_number, name)?.update_windows(count)
    }

    /// Find a shortest path between two rooms, following doors only
    ///
    /// Breadth-first search; the first path reaching `end` is returned, so
    /// among equal-length paths the winner depends on door insertion order.
    /// Returns `None` when no chain of doors links the rooms.
    pub fn find_path<'a>(&'a self, start: &'a Room, end: &'a Room) -> Option<Vec<&'a Room>> {
        if start.name() == end.name() {
            return Some(vec![start]);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&Room, Vec<&Room>)> = VecDeque::new();
        visited.insert(start.name());
        queue.push_back((start, vec![start]));

        while let Some((current, path)) = queue.pop_front() {
            for door in current.doors() {
                let Some(neighbour) = self.room(door) else {
                    continue;
                };
                if neighbour.name() == end.name() {
                    let mut found = path;
                    found.push(neighbour);
                    return Some(found);
                }
                if visited.insert(neighbour.name()) {
                    let mut extended = path.clone();
                    extended.push(neighbour);
                    queue.push_back((neighbour, extended));
                }
            }
        }

        None
    }

    /// Find a shortest path between two rooms given by name
    pub fn find_path_by_name(&self, start: &str, end: &str) -> TopologyResult<Option<Vec<&Room>>> {
        let start_room = self.room(start).ok_or_else(|| TopologyError::room_not_found(start))?;
        let end_room = self.room(end).ok_or_else(|| TopologyError::room_not_found(end))?;
        Ok(self.find_path(start_room, end_room))
    }

    fn floor_index(&self, number: usize) -> TopologyResult<usize> {
        if number == 0 || number > self.floors.len() {
            return Err(TopologyError::FloorNotFound(number));
        }
        Ok(number - 1)
    }

    fn floor_room_mut(&mut self, floor_number: usize, name: &str) -> TopologyResult<&mut Room> {
        let index = self.floor_index(floor_number)?;
        self.floors[index]
            .get_room_by_name_mut(name)
            .ok_or_else(|| TopologyError::room_not_found(name))
    }

    /// Rebuild the room index (call after any structural change)
    fn rebuild_index(&mut self) -> TopologyResult<()> {
        self.room_index.clear();
        for (floor_idx, floor) in self.floors.iter().enumerate() {
            for (room_idx, room) in floor.rooms().iter().enumerate() {
                if self.room_index.insert(room.name().to_string(), (floor_idx, room_idx)).is_some() {
                    return Err(TopologyError::DuplicateRoom(room.name().to_string()));
                }
            }
        }
        Ok(())
    }

    fn strip_door_references(&mut self, name: &str, skip_floor: Option<usize>) {
        for (floor_idx, floor) in self.floors.iter_mut().enumerate() {
            if Some(floor_idx) == skip_floor {
                continue;
            }
            for room in floor.rooms_mut() {
                if room.detach(name) {
                    debug!(room = %room.name(), removed = %name, "dangling door dropped");
                }
            }
        }
    }

    /// Turn every room's door list into symmetric, validated edges
    ///
    /// Validation runs over the whole building before anything is modified,
    /// so a failure leaves the doors untouched. Stored order is kept; a
    /// missing reciprocal entry is appended to the other room.
    fn reconcile_doors(&mut self) -> TopologyResult<()> {
        let mut accepted: Vec<(usize, usize, Vec<String>)> = Vec::new();
        for (floor_idx, floor) in self.floors.iter().enumerate() {
            for (room_idx, room) in floor.rooms().iter().enumerate() {
                let mut doors: Vec<String> = Vec::with_capacity(room.doors().len());
                for door in room.doors() {
                    if door == room.name() {
                        return Err(TopologyError::SelfDoor(door.clone()));
                    }
                    let target =
                        self.room(door).ok_or_else(|| TopologyError::room_not_found(door.as_str()))?;
                    if doors.contains(door) {
                        continue;
                    }
                    if !room.is_adjacent_to(door) && !target.is_adjacent_to(room.name()) {
                        return Err(TopologyError::invalid_adjacency(room.name(), door.as_str()));
                    }
                    doors.push(door.clone());
                }
                accepted.push((floor_idx, room_idx, doors));
            }
        }

        let mut reciprocal: Vec<(String, String)> = Vec::new();
        for (floor_idx, room_idx, doors) in accepted {
            let room = &mut self.floors[floor_idx].rooms_mut()[room_idx];
            room.take_doors();
            for door in &doors {
                room.attach(door);
                reciprocal.push((door.clone(), room.name().to_string()));
            }
        }

        for (target, source) in reciprocal {
            if let Some(&(floor_idx, room_idx)) = self.room_index.get(&target) {
                let room = &mut self.floors[floor_idx].rooms_mut()[room_idx];
                if !room.has_door(&source) {
                    debug!(room = %target, other = %source, "reciprocal door restored");
                    room.attach(&source);
                }
            }
        }

        Ok(())
    }
}
