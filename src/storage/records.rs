//! On-disk record types for building directories
//!
//! `floor_<N>.json` holds a [`FloorRecord`]: a JSON object mapping room names
//! to [`RoomRecord`]s. Room order in that object is significant (it fixes door
//! insertion order on reload) so the map is kept as an ordered list of pairs.

use crate::error::TopologyResult;
use crate::facility::{Floor, Room};
use serde::{Deserialize, Serialize};

/// Stored attributes of one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Number of windows
    pub windows: u64,
    /// Number of lights
    pub lights: u64,
    /// Spatially adjacent room names
    pub adjacent_rooms: Vec<String>,
    /// Room names this room has a door to
    pub doors: Vec<String>,
}

/// Contents of one `floor_<N>.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRecord {
    /// Rooms keyed by name, in file order
    #[serde(with = "ordered_rooms")]
    pub rooms: Vec<(String, RoomRecord)>,
}

/// Contents of `building_metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingMetadata {
    /// Display name of the building
    pub building_name: String,
    /// Number of floor files written alongside the metadata
    pub num_floors: usize,
}

/// Room payload accepted by the add-room command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    /// Room name
    pub name: String,
    /// Number of windows
    pub windows: u64,
    /// Number of lights
    pub lights: u64,
    /// Spatially adjacent room names
    #[serde(default)]
    pub adjacent_rooms: Vec<String>,
    /// Claimed doors, each of which must be adjacent
    #[serde(default)]
    pub doors: Vec<String>,
}

impl NewRoom {
    /// Build the room, validating its claimed doors against its adjacency
    pub fn into_room(self) -> TopologyResult<Room> {
        Room::with_doors(self.name, self.windows, self.lights, self.adjacent_rooms, self.doors)
    }
}

impl FloorRecord {
    /// Snapshot a floor for writing
    pub fn from_floor(floor: &Floor) -> Self {
        let rooms = floor
            .rooms()
            .iter()
            .map(|room| {
                let record = RoomRecord {
                    windows: room.windows(),
                    lights: room.lights(),
                    adjacent_rooms: room.adjacent_rooms().to_vec(),
                    doors: room.doors().to_vec(),
                };
                (room.name().to_string(), record)
            })
            .collect();
        Self { rooms }
    }

    /// Turn the stored rooms back into a floor
    ///
    /// Door lists are carried over as claims; they become validated,
    /// symmetric edges once the floor is attached to a Building.
    pub fn into_floor(self) -> TopologyResult<Floor> {
        let rooms = self
            .rooms
            .into_iter()
            .map(|(name, record)| {
                let mut doors: Vec<String> = Vec::with_capacity(record.doors.len());
                for door in record.doors {
                    if !doors.contains(&door) {
                        doors.push(door);
                    }
                }
                Room::restore(name, record.windows, record.lights, record.adjacent_rooms, doors)
            })
            .collect();
        Floor::from_rooms(rooms)
    }
}

/// Serialize `Vec<(String, RoomRecord)>` as a JSON object, keeping order
mod ordered_rooms {
    use super::RoomRecord;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub(super) fn serialize<S>(rooms: &[(String, RoomRecord)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(rooms.len()))?;
        for (name, record) in rooms {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, RoomRecord)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RoomsVisitor;

        impl<'de> Visitor<'de> for RoomsVisitor {
            type Value = Vec<(String, RoomRecord)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of room names to room records")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rooms: Vec<(String, RoomRecord)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, record)) = access.next_entry::<String, RoomRecord>()? {
                    if rooms.iter().any(|(existing, _)| existing == &name) {
                        return Err(de::Error::custom(format!("duplicate room `{}`", name)));
                    }
                    rooms.push((name, record));
                }
                Ok(rooms)
            }
        }

        deserializer.deserialize_map(RoomsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR_JSON: &str = r#"{
  "rooms": {
    "zeta": {
      "windows": 2,
      "lights": 3,
      "adjacent_rooms": ["alpha"],
      "doors": ["alpha", "alpha"]
    },
    "alpha": {
      "windows": 1,
      "lights": 2,
      "adjacent_rooms": ["zeta"],
      "doors": ["zeta"]
    }
  }
}"#;

    #[test]
    fn test_room_order_is_preserved() {
        let record: FloorRecord = serde_json::from_str(FLOOR_JSON).unwrap();
        let names: Vec<&str> = record.rooms.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let written = serde_json::to_string(&record).unwrap();
        assert!(written.find("\"zeta\"").unwrap() < written.find("\"alpha\"").unwrap());
    }

    #[test]
    fn test_duplicate_room_key_is_rejected() {
        let json = r#"{"rooms": {
            "a": {"windows": 0, "lights": 0, "adjacent_rooms": [], "doors": []},
            "a": {"windows": 1, "lights": 1, "adjacent_rooms": [], "doors": []}
        }}"#;
        let error = serde_json::from_str::<FloorRecord>(json).unwrap_err();
        assert!(error.to_string().contains("duplicate room `a`"));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let json = r#"{"rooms": {"a": {"windows": -1, "lights": 0, "adjacent_rooms": [], "doors": []}}}"#;
        assert!(serde_json::from_str::<FloorRecord>(json).is_err());
    }

    #[test]
    fn test_into_floor_collapses_repeated_doors() {
        let record: FloorRecord = serde_json::from_str(FLOOR_JSON).unwrap();
        let floor = record.into_floor().unwrap();

        let zeta = floor.get_room_by_name("zeta").unwrap();
        assert_eq!(zeta.doors(), &["alpha".to_string()]);
        assert_eq!(zeta.windows(), 2);
        assert_eq!(zeta.lights(), 3);
    }

    #[test]
    fn test_from_floor_snapshot() {
        let record: FloorRecord = serde_json::from_str(FLOOR_JSON).unwrap();
        let floor = record.into_floor().unwrap();

        let snapshot = FloorRecord::from_floor(&floor);
        assert_eq!(snapshot.rooms.len(), 2);
        assert_eq!(snapshot.rooms[1].0, "alpha");
        assert_eq!(snapshot.rooms[1].1.adjacent_rooms, vec!["zeta".to_string()]);
    }

    #[test]
    fn test_new_room_defaults_and_validation() {
        let room: NewRoom =
            serde_json::from_str(r#"{"name": "closet", "windows": 0, "lights": 1}"#).unwrap();
        let room = room.into_room().unwrap();
        assert!(room.doors().is_empty());
        assert!(room.adjacent_rooms().is_empty());

        let room: NewRoom = serde_json::from_str(
            r#"{"name": "den", "windows": 0, "lights": 1, "adjacent_rooms": [], "doors": ["hall"]}"#,
        )
        .unwrap();
        assert!(room.into_room().is_err());
    }

    #[test]
    fn test_metadata_shape() {
        let metadata = BuildingMetadata { building_name: "Main Complex".to_string(), num_floors: 2 };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["building_name"], "Main Complex");
        assert_eq!(value["num_floors"], 2);
    }
}
