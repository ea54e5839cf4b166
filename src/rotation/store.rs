//! Persisted-state store
//!
//! One JSON file per device lives in the storage directory. The file name is
//! the device identity: a random v4 UUID followed by `.json`. Any process that
//! can see the same directory reuses the identity it finds there.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;
use walkdir::WalkDir;

use super::error::RotationError;
use super::record::{DefaultsReason, StoredRecord, UsageRecord};

lazy_static! {
    static ref DEVICE_ID_PATTERN: Regex = Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}\.json$"
    )
    .expect("device id pattern is valid");
}

/// Identity of this device's record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn generate() -> Self {
        DeviceId(format!("{}.json", Uuid::new_v4()))
    }

    /// Accepts only file names shaped like a generated identity
    pub fn parse(file_name: &str) -> Option<Self> {
        DEVICE_ID_PATTERN
            .is_match(file_name)
            .then(|| DeviceId(file_name.to_string()))
    }

    pub fn file_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, id: &DeviceId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    /// Reuse the identity already present in the storage directory, or make a new one.
    ///
    /// Entries are visited in file-name order, so with several candidate files
    /// the same one wins every time.
    pub fn resolve_device_identity(&self) -> Result<DeviceId, RotationError> {
        if !self.dir.exists() {
            return Ok(DeviceId::generate());
        }

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.dir).to_path_buf();
                RotationError::storage(path, io::Error::other(e.to_string()))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(id) = entry.file_name().to_str().and_then(DeviceId::parse) {
                return Ok(id);
            }
        }

        Ok(DeviceId::generate())
    }

    /// Read the stored record, reporting why defaults are used when it cannot be.
    pub fn load_stored(&self, id: &DeviceId) -> Result<StoredRecord, RotationError> {
        let path = self.record_path(id);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(StoredRecord::decode(&contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(StoredRecord::Defaults(DefaultsReason::Missing))
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(StoredRecord::Defaults(
                DefaultsReason::Corrupt(e.to_string()),
            )),
            Err(e) => Err(RotationError::storage(path, e)),
        }
    }

    pub fn load(&self, id: &DeviceId) -> Result<UsageRecord, RotationError> {
        Ok(self.load_stored(id)?.into_record())
    }

    /// Replace the stored record with `record`.
    ///
    /// The JSON goes to a temporary file next to the record which is then
    /// renamed over it.
    pub fn save(&self, record: &UsageRecord, id: &DeviceId) -> Result<(), RotationError> {
        fs::create_dir_all(&self.dir).map_err(|e| RotationError::storage(&self.dir, e))?;

        let path = self.record_path(id);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RotationError::storage(&path, io::Error::other(e)))?;

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| RotationError::storage(&self.dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .map_err(|e| RotationError::storage(tmp.path().to_path_buf(), e))?;
        tmp.persist(&path)
            .map_err(|e| RotationError::storage(&path, e.error))?;

        Ok(())
    }
}
