//! High score and settings storage
//!
//! A single JSON document. Any load failure falls back to defaults and is
//! logged, never propagated; the engine must run with a broken or absent
//! storage backend.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persisted preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsData {
    pub sound: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { sound: true }
    }
}

/// The whole persisted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub high_score: u64,
    pub settings: SettingsData,
}

/// Storage collaborator
pub trait Store {
    /// Load the document; failures yield defaults
    fn load(&mut self) -> SaveData;
    /// Best-effort write
    fn save(&mut self, data: &SaveData);
}

/// JSON file store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> io::Result<SaveData> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Store for FileStore {
    fn load(&mut self) -> SaveData {
        match self.read() {
            Ok(data) => {
                log::info!("loaded save from {}", self.path.display());
                data
            }
            Err(err) => {
                log::warn!("save load failed ({err}), using defaults");
                SaveData::default()
            }
        }
    }

    fn save(&mut self, data: &SaveData) {
        let result = serde_json::to_string(data)
            .map_err(io::Error::from)
            .and_then(|json| fs::write(&self.path, json));
        if let Err(err) = result {
            log::warn!("save write failed: {err}");
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemStore {
    pub data: SaveData,
}

impl Store for MemStore {
    fn load(&mut self) -> SaveData {
        self.data.clone()
    }

    fn save(&mut self, data: &SaveData) {
        self.data = data.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero_score_sound_on() {
        let data = SaveData::default();
        assert_eq!(data.high_score, 0);
        assert!(data.settings.sound);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let mut store = FileStore::new("/nonexistent/dir/brickbloom_save.json");
        assert_eq!(store.load(), SaveData::default());
    }

    #[test]
    fn corrupt_document_yields_defaults() {
        let path = std::env::temp_dir().join(format!("brickbloom_corrupt_{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();
        let mut store = FileStore::new(&path);
        assert_eq!(store.load(), SaveData::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("brickbloom_save_{}.json", std::process::id()));
        let mut store = FileStore::new(&path);
        let data = SaveData {
            high_score: 4321,
            settings: SettingsData { sound: false },
        };
        store.save(&data);
        assert_eq!(store.load(), data);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let data: SaveData = serde_json::from_str(r#"{"high_score": 7}"#).unwrap();
        assert_eq!(data.high_score, 7);
        assert!(data.settings.sound);
    }
}
