//! Flat-file persistence for buildings
//!
//! A store root holds one directory per building:
//!
//! ```text
//! <root>/<building name>/
//!     floor_1.json
//!     floor_2.json
//!     building_metadata.json
//! ```
//!
//! Floor files are numbered from 1 in floor order. Loading goes through
//! [`Building::new`], so stored doors are validated and made symmetric
//! before the caller sees the building.

pub mod records;

pub use records::{BuildingMetadata, FloorRecord, NewRoom, RoomRecord};

use crate::error::StorageError;
use crate::facility::{Building, Floor};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the metadata file inside a building directory
pub const METADATA_FILE: &str = "building_metadata.json";

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Reads and writes building directories under a root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingStore {
    root: PathBuf,
}

impl BuildingStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one building's files
    pub fn building_dir(&self, building_name: &str) -> PathBuf {
        self.root.join(building_name)
    }

    /// Check if a building directory exists
    pub fn exists(&self, building_name: &str) -> bool {
        self.building_dir(building_name).is_dir()
    }

    /// Load a building from its directory
    pub fn load(&self, building_name: &str) -> StorageResult<Building> {
        if !self.exists(building_name) {
            return Err(StorageError::MissingDirectory(self.building_dir(building_name)));
        }
        let dir = self.building_dir(building_name);

        let floor_files = floor_files(&dir)?;
        if floor_files.is_empty() {
            return Err(StorageError::NoFloorFiles(dir));
        }

        // Pass 1: parse every floor file
        let mut records = Vec::with_capacity(floor_files.len());
        for (_, path) in &floor_files {
            let record: FloorRecord = read_json(path)?;
            debug!(path = %path.display(), rooms = record.rooms.len(), "floor file read");
            records.push(record);
        }

        let metadata_path = dir.join(METADATA_FILE);
        let display_name = if metadata_path.is_file() {
            let metadata: BuildingMetadata = read_json(&metadata_path)?;
            if metadata.num_floors != records.len() {
                return Err(StorageError::FloorCountMismatch {
                    expected: metadata.num_floors,
                    found: records.len(),
                });
            }
            metadata.building_name
        } else {
            building_name.to_string()
        };

        // Pass 2: rebuild rooms and floors, then reconcile doors building-wide
        let invalid = |source| StorageError::InvalidTopology {
            building: building_name.to_string(),
            source: Box::new(source),
        };
        let floors = records
            .into_iter()
            .map(FloorRecord::into_floor)
            .collect::<Result<Vec<Floor>, _>>()
            .map_err(invalid)?;
        let building = Building::new(display_name, floors).map_err(invalid)?;

        info!(
            building = %building_name,
            floors = building.floor_count(),
            rooms = building.room_count(),
            "building loaded"
        );
        Ok(building)
    }

    /// Save a building into `<root>/<building_name>/`
    ///
    /// Existing files are overwritten. Floor files beyond the building's
    /// floor count are deleted so that a removed floor is not read back.
    pub fn save(&self, building: &Building, building_name: &str) -> StorageResult<()> {
        let dir = self.building_dir(building_name);
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;

        for (index, floor) in building.floors().iter().enumerate() {
            let path = dir.join(floor_file_name(index + 1));
            write_json(&path, &FloorRecord::from_floor(floor))?;
        }

        let metadata = BuildingMetadata {
            building_name: building.name().to_string(),
            num_floors: building.floor_count(),
        };
        write_json(&dir.join(METADATA_FILE), &metadata)?;

        for (number, path) in floor_files(&dir)? {
            if number > building.floor_count() {
                fs::remove_file(&path).map_err(|e| StorageError::io(&path, e))?;
                info!(path = %path.display(), "stale floor file removed");
            }
        }

        info!(building = %building_name, floors = building.floor_count(), "building saved");
        Ok(())
    }

    /// Every file of a building directory with its parsed JSON, in file-name order
    pub fn read_raw(&self, building_name: &str) -> StorageResult<Vec<(String, serde_json::Value)>> {
        if !self.exists(building_name) {
            return Err(StorageError::MissingDirectory(self.building_dir(building_name)));
        }
        let dir = self.building_dir(building_name);

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| StorageError::io(&dir, e))? {
            let entry = entry.map_err(|e| StorageError::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let value: serde_json::Value = read_json(&path)?;
            files.push((name, value));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

/// File name of a 1-based floor number
pub fn floor_file_name(number: usize) -> String {
    format!("floor_{}.json", number)
}

/// Floor number encoded in a `floor_<N>.json` file name
///
/// Returns `Ok(None)` for names outside the `floor_*.json` pattern and an
/// error when the suffix is not a number.
pub fn parse_floor_file_name(file_name: &str) -> StorageResult<Option<usize>> {
    let Some(number) = file_name.strip_prefix("floor_").and_then(|rest| rest.strip_suffix(".json"))
    else {
        return Ok(None);
    };
    number
        .parse::<usize>()
        .map(Some)
        .map_err(|_| StorageError::InvalidFloorFileName(file_name.to_string()))
}

/// Floor files of a directory, sorted by floor number
///
/// Two files naming the same floor (`floor_1.json` and `floor_01.json`) are
/// rejected.
fn floor_files(dir: &Path) -> StorageResult<Vec<(usize, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StorageError::io(dir, e))? {
        let entry = entry.map_err(|e| StorageError::io(dir, e))?;
        let file_name = entry.file_name();
        if let Some(number) = parse_floor_file_name(&file_name.to_string_lossy())? {
            files.push((number, entry.path()));
        }
    }
    files.sort_by_key(|(number, _)| *number);
    if let Some(pair) = files.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        let duplicate = pair[1].1.file_name().unwrap_or_default().to_string_lossy().into_owned();
        return Err(StorageError::InvalidFloorFileName(duplicate));
    }
    Ok(files)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| StorageError::malformed(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| StorageError::malformed(path, e))?;
    fs::write(path, content).map_err(|e| StorageError::io(path, e))?;
    debug!(path = %path.display(), "file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopologyError;
    use crate::facility::Room;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn sample_building() -> Building {
        let room1 = Room::with_doors("room1", 2, 3, names(&["room2"]), names(&["room2"])).unwrap();
        let room2 = Room::with_doors("room2", 1, 2, names(&["room1"]), names(&["room1"])).unwrap();
        let floor = Floor::from_rooms(vec![room1, room2]).unwrap();
        Building::new("Main Complex", vec![floor]).unwrap()
    }

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_floor_file_names() {
        assert_eq!(floor_file_name(3), "floor_3.json");
        assert_eq!(parse_floor_file_name("floor_12.json").unwrap(), Some(12));
        assert_eq!(parse_floor_file_name("building_metadata.json").unwrap(), None);
        assert_eq!(parse_floor_file_name("floor_1.txt").unwrap(), None);
        assert!(matches!(
            parse_floor_file_name("floor_one.json"),
            Err(StorageError::InvalidFloorFileName(_))
        ));
    }

    #[test]
    fn test_save_writes_expected_files() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());

        store.save(&sample_building(), "test_building").unwrap();

        let dir = store.building_dir("test_building");
        assert!(dir.join("floor_1.json").is_file());
        let metadata: BuildingMetadata = read_json(&dir.join(METADATA_FILE)).unwrap();
        assert_eq!(metadata.building_name, "Main Complex");
        assert_eq!(metadata.num_floors, 1);

        let content = fs::read_to_string(dir.join("floor_1.json")).unwrap();
        assert!(content.starts_with("{\n  \"rooms\""));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());

        assert!(!store.exists("nowhere"));
        assert!(matches!(store.load("nowhere"), Err(StorageError::MissingDirectory(_))));
    }

    #[test]
    fn test_load_without_floor_files() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        fs::create_dir_all(store.building_dir("empty")).unwrap();

        assert!(matches!(store.load("empty"), Err(StorageError::NoFloorFiles(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        write_file(&store.building_dir("broken"), "floor_1.json", "{\"rooms\": [}");

        assert!(matches!(store.load("broken"), Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_load_without_metadata_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        write_file(
            &store.building_dir("annex"),
            "floor_1.json",
            r#"{"rooms": {"a": {"windows": 0, "lights": 1, "adjacent_rooms": [], "doors": []}}}"#,
        );

        let building = store.load("annex").unwrap();
        assert_eq!(building.name(), "annex");
        assert_eq!(building.room_count(), 1);
    }

    #[test]
    fn test_load_floor_count_mismatch() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        store.save(&sample_building(), "hq").unwrap();
        write_file(
            &store.building_dir("hq"),
            METADATA_FILE,
            r#"{"building_name": "hq", "num_floors": 3}"#,
        );

        assert!(matches!(
            store.load("hq"),
            Err(StorageError::FloorCountMismatch { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_load_orders_floors_numerically() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        let dir = store.building_dir("tower");
        for number in 1..=10 {
            let json = format!(
                r#"{{"rooms": {{"room_{}": {{"windows": 0, "lights": 0, "adjacent_rooms": [], "doors": []}}}}}}"#,
                number
            );
            write_file(&dir, &floor_file_name(number), &json);
        }

        let building = store.load("tower").unwrap();
        assert_eq!(building.floor_number_of("room_2"), Some(2));
        assert_eq!(building.floor_number_of("room_10"), Some(10));
    }

    #[test]
    fn test_load_rejects_self_door() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        write_file(
            &store.building_dir("loop"),
            "floor_1.json",
            r#"{"rooms": {"a": {"windows": 0, "lights": 0, "adjacent_rooms": ["a"], "doors": ["a"]}}}"#,
        );

        let error = store.load("loop").unwrap_err();
        match error {
            StorageError::InvalidTopology { building, source } => {
                assert_eq!(building, "loop");
                assert!(matches!(*source, TopologyError::SelfDoor(_)));
            }
            other => panic!("Expected InvalidTopology, got {:?}", other),
        }
    }

    #[test]
    fn test_save_removes_stale_floor_files() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        let mut building = sample_building();
        building.add_floor(Floor::new()).unwrap();
        store.save(&building, "shrinking").unwrap();
        assert!(store.building_dir("shrinking").join("floor_2.json").is_file());

        building.remove_floor(2).unwrap();
        store.save(&building, "shrinking").unwrap();

        assert!(!store.building_dir("shrinking").join("floor_2.json").exists());
        assert_eq!(store.load("shrinking").unwrap().floor_count(), 1);
    }

    #[test]
    fn test_load_rejects_two_files_for_one_floor() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        let dir = store.building_dir("twins");
        write_file(
            &dir,
            "floor_1.json",
            r#"{"rooms": {"a": {"windows": 0, "lights": 0, "adjacent_rooms": [], "doors": []}}}"#,
        );
        write_file(
            &dir,
            "floor_01.json",
            r#"{"rooms": {"b": {"windows": 0, "lights": 0, "adjacent_rooms": [], "doors": []}}}"#,
        );

        assert!(store.exists("twins"));
        assert!(matches!(store.load("twins"), Err(StorageError::InvalidFloorFileName(_))));
    }

    #[test]
    fn test_read_raw_missing_directory() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        assert!(matches!(store.read_raw("nowhere"), Err(StorageError::MissingDirectory(_))));
    }

    #[test]
    fn test_read_raw_lists_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        let store = BuildingStore::new(temp.path());
        store.save(&sample_building(), "raw").unwrap();

        let files = store.read_raw("raw").unwrap();
        let file_names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(file_names, vec![METADATA_FILE, "floor_1.json"]);
        assert_eq!(files[1].1["rooms"]["room1"]["lights"], 3);
    }
}
