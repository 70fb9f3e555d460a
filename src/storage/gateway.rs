use std::sync::{Mutex, PoisonError};
use log::{debug, error, warn};
use super::backend::{Backend, FileBackend};
use super::codec;
use super::locator::ReadPolicy;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::employee::{Location, Record, WriteMeta};

pub const DEGRADED_WRITE_WARNING: &str =
    "Persistent file write not available in this runtime. Data is temporarily stored.";

/// The employee collection, spread over a persistent and an ephemeral store.
///
/// Reads come from whichever store [`ReadPolicy`] picks. Writes go to the
/// persistent store and fall back to the ephemeral one when that fails.
/// Nothing copies ephemeral data back once the persistent store recovers.
pub struct EmployeeStore {
    persistent: Box<dyn Backend>,
    ephemeral: Box<dyn Backend>,
    policy: ReadPolicy,
    writer: Mutex<()>,
}

impl EmployeeStore {
    pub fn new(persistent: Box<dyn Backend>, ephemeral: Box<dyn Backend>) -> Self {
        EmployeeStore {
            persistent,
            ephemeral,
            policy: ReadPolicy,
            writer: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        EmployeeStore::new(
            Box::new(FileBackend::new(config.project_file.clone())),
            Box::new(FileBackend::new(config.tmp_file.clone())),
        )
    }

    fn backend(&self, location: Location) -> &dyn Backend {
        match location {
            Location::Persistent => self.persistent.as_ref(),
            Location::Ephemeral => self.ephemeral.as_ref(),
        }
    }

    /// Absent, empty and unreadable stores all read as an empty collection.
    pub fn read_all(&self) -> Vec<Record> {
        let Some(location) = self.policy.locate(self.persistent.as_ref(), self.ephemeral.as_ref()) else {
            return Vec::new();
        };

        let backend = self.backend(location);
        match backend.read_to_string() {
            Ok(raw) => codec::decode_or_empty(&raw),
            Err(err) => {
                warn!("Failed to read {}: {}; treating store as empty", backend.describe(), err);
                Vec::new()
            }
        }
    }

    /// Rewrites the whole collection. Only a failed ephemeral fallback is an error.
    pub fn write_all(&self, records: &[Record]) -> Result<WriteMeta, AppError> {
        let payload = codec::encode(records)?;

        match self.persistent.write_str(&payload) {
            Ok(()) => {
                debug!("Wrote {} records to {}", records.len(), self.persistent.describe());
                Ok(WriteMeta {
                    target: Location::Persistent,
                    warning: None,
                })
            }
            Err(err) => {
                warn!(
                    "Persistent write to {} failed: {}; falling back to {}",
                    self.persistent.describe(),
                    err,
                    self.ephemeral.describe()
                );
                self.ephemeral.write_str(&payload).map_err(|err| {
                    error!("Fallback write to {} failed: {}", self.ephemeral.describe(), err);
                    AppError::from(err)
                })?;
                Ok(WriteMeta {
                    target: Location::Ephemeral,
                    warning: Some(DEGRADED_WRITE_WARNING.to_string()),
                })
            }
        }
    }

    /// Reads the collection, appends the record built from it, and writes it back.
    ///
    /// Appends are serialised, so two requests in this process never compute
    /// the same next id.
    pub fn append<T, F>(&self, build: F) -> Result<(T, WriteMeta), AppError>
    where
        T: serde::Serialize,
        F: FnOnce(&[Record]) -> T,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.read_all();
        let item = build(&records);
        records.push(serde_json::to_value(&item)?);
        let meta = self.write_all(&records)?;
        Ok((item, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use tempfile::tempdir;

    struct ReadOnlyBackend;

    impl Backend for ReadOnlyBackend {
        fn exists(&self) -> bool {
            false
        }

        fn read_to_string(&self) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "nothing here"))
        }

        fn write_str(&self, _contents: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"))
        }

        fn describe(&self) -> String {
            "read-only".to_string()
        }
    }

    fn file_store(dir: &std::path::Path) -> EmployeeStore {
        EmployeeStore::new(
            Box::new(FileBackend::new(dir.join("project.txt"))),
            Box::new(FileBackend::new(dir.join("tmp.txt"))),
        )
    }

    #[test]
    fn empty_when_nothing_stored() {
        let dir = tempdir().unwrap();
        assert!(file_store(dir.path()).read_all().is_empty());
    }

    #[test]
    fn write_prefers_persistent() {
        let dir = tempdir().unwrap();
        let store = file_store(dir.path());

        let meta = store.write_all(&[json!({"id": 1})]).unwrap();

        assert_eq!(meta.target, Location::Persistent);
        assert!(meta.warning.is_none());
        assert!(dir.path().join("project.txt").exists());
        assert!(!dir.path().join("tmp.txt").exists());
        assert_eq!(store.read_all(), vec![json!({"id": 1})]);
    }

    #[test]
    fn write_falls_back_to_ephemeral() {
        let dir = tempdir().unwrap();
        let store = EmployeeStore::new(
            Box::new(ReadOnlyBackend),
            Box::new(FileBackend::new(dir.path().join("tmp.txt"))),
        );

        let meta = store.write_all(&[json!({"id": 7})]).unwrap();

        assert!(meta.degraded());
        assert_eq!(meta.warning.as_deref(), Some(DEGRADED_WRITE_WARNING));
        assert_eq!(store.read_all(), vec![json!({"id": 7})]);
    }

    #[test]
    fn failed_fallback_is_an_error() {
        let store = EmployeeStore::new(Box::new(ReadOnlyBackend), Box::new(ReadOnlyBackend));

        let err = store.write_all(&[json!({"id": 1})]).unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));
    }

    #[test]
    fn read_prefers_ephemeral_over_persistent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("project.txt"), "[{\"id\": 1}]").unwrap();
        std::fs::write(dir.path().join("tmp.txt"), "[{\"id\": 2}]").unwrap();

        assert_eq!(file_store(dir.path()).read_all(), vec![json!({"id": 2})]);
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("project.txt"), "[{\"id\": 1").unwrap();

        assert!(file_store(dir.path()).read_all().is_empty());
    }

    #[test]
    fn append_sees_existing_records() {
        let dir = tempdir().unwrap();
        let store = file_store(dir.path());
        store.write_all(&[json!({"id": 1}), json!({"id": 4})]).unwrap();

        let (item, meta) = store
            .append(|records| json!({ "id": records.len() + 10 }))
            .unwrap();

        assert_eq!(item, json!({"id": 12}));
        assert_eq!(meta.target, Location::Persistent);
        assert_eq!(store.read_all().len(), 3);
    }
}
