use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

const FORMAT_VERSION: u32 = 1;

/// Durable slot for the best score ever reached.
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> io::Result<Option<u32>>;
    fn save(&mut self, value: u32) -> io::Result<()>;
}

/// Reads the stored high score, treating absence or any failure as 0.
pub fn read_or_default(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(value) => value.unwrap_or(0),
        Err(err) => {
            warn!(%err, "high score unreadable, assuming 0");
            0
        }
    }
}

/// Writes the high score; a failed write is logged and otherwise ignored.
pub fn save_best_effort(store: &mut dyn HighScoreStore, value: u32) -> bool {
    match store.save(value) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, value, "high score write skipped");
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct HighScoreFile {
    format_version: u32,
    high_score: u32,
}

/// High score kept as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "SnakeArcade").map(|dirs| dirs.data_dir().join("high_score.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, file: &HighScoreFile) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(file).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> io::Result<Option<u32>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let file: HighScoreFile = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(file.high_score))
    }

    fn save(&mut self, value: u32) -> io::Result<()> {
        self.write_atomic(&HighScoreFile {
            format_version: FORMAT_VERSION,
            high_score: value,
        })
    }
}

/// In-process store, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> io::Result<Option<u32>> {
        Ok(self.value)
    }

    fn save(&mut self, value: u32) -> io::Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> io::Result<Option<u32>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn save(&mut self, _value: u32) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(read_or_default(&store), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("high_score.json");
        let mut store = JsonFileStore::new(path.clone());

        store.save(95).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load().unwrap(), Some(95));

        let reopened = JsonFileStore::new(path.clone());
        assert_eq!(read_or_default(&reopened), 95);
    }

    #[test]
    fn garbled_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(path.clone());
        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert_eq!(read_or_default(&store), 0);
    }

    #[test]
    fn failures_are_swallowed() {
        let mut store = BrokenStore;
        assert_eq!(read_or_default(&store), 0);
        assert!(!save_best_effort(&mut store, 10));
    }

    #[test]
    fn memory_store_keeps_last_value() {
        let mut store = MemoryStore::with_value(80);
        assert!(save_best_effort(&mut store, 95));
        assert_eq!(store.value(), Some(95));
    }
}
