//! Guarded persistence for the session identity
//!
//! The browser-side original leans on localStorage, which can be disabled by
//! policy, full, or absent entirely. The [`IdentityBackend`] trait is that
//! seam: file-backed for real use, in-memory for tests and embedders with
//! their own persistence. [`IdentityStore`] wraps a backend and guarantees
//! that no backend failure ever escapes — `set` reports failure as `false`,
//! `get` reports it as absent.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use beacon_core::{fail_open::fail_open, BeaconError, Result};
use tracing::debug;

/// Trait defining the key/value facility identities are persisted in
pub trait IdentityBackend: Send + Sync + std::fmt::Debug {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one file per key under a base directory
///
/// The filesystem analog of per-origin localStorage. The directory is
/// created lazily on first write.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl IdentityBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&path)
            .map_err(|e| BeaconError::StorageRead(format!("{}: {}", path.display(), e)))?;
        Ok(Some(value))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BeaconError::StorageUnavailable(format!("{}: {}", self.base_dir.display(), e)))?;
        let path = self.key_path(key);
        std::fs::write(&path, value)
            .map_err(|e| BeaconError::StorageWrite(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

/// In-memory storage for tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| BeaconError::StorageUnavailable("poisoned lock".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| BeaconError::StorageUnavailable("poisoned lock".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The guarded boundary around an [`IdentityBackend`]
///
/// Exactly one key is ever used per store. The guarded `set`/`get` pair
/// never propagates an error to the caller; `try_set`/`try_get` keep the
/// typed error for internals and tests.
#[derive(Debug)]
pub struct IdentityStore {
    backend: Box<dyn IdentityBackend>,
    key: String,
}

impl IdentityStore {
    pub fn new(backend: Box<dyn IdentityBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Persist the identity. Returns whether the write took.
    pub fn set(&self, token: &str) -> bool {
        fail_open("identity_store.set", self.try_set(token)).is_some()
    }

    /// Retrieve the persisted identity, absent on any failure.
    pub fn get(&self) -> Option<String> {
        fail_open("identity_store.get", self.try_get()).flatten()
    }

    /// Fallible write, for callers that care why persistence failed
    pub fn try_set(&self, token: &str) -> Result<()> {
        self.backend.write(&self.key, token)?;
        debug!("Persisted session identity under '{}'", self.key);
        Ok(())
    }

    /// Fallible read, for callers that care why retrieval failed
    pub fn try_get(&self) -> Result<Option<String>> {
        self.backend.read(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fails every call, simulating disabled or full storage
    #[derive(Debug)]
    struct FailingBackend;

    impl IdentityBackend for FailingBackend {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(BeaconError::StorageUnavailable("quota exceeded".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(BeaconError::StorageUnavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_memory_roundtrip() {
        let store = IdentityStore::new(Box::new(MemoryBackend::new()), "beacon_session_id");
        assert_eq!(store.get(), None);
        assert!(store.set("abc123"));
        assert_eq!(store.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_set_replaces_prior_value() {
        let store = IdentityStore::new(Box::new(MemoryBackend::new()), "beacon_session_id");
        assert!(store.set("first"));
        assert!(store.set("second"));
        assert_eq!(store.get(), Some("second".to_string()));
    }

    #[test]
    fn test_failing_backend_never_raises() {
        let store = IdentityStore::new(Box::new(FailingBackend), "beacon_session_id");
        assert!(!store.set("abc123"));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_failing_backend_typed_error() {
        let store = IdentityStore::new(Box::new(FailingBackend), "beacon_session_id");
        let err = store.try_get().unwrap_err();
        assert!(matches!(err, BeaconError::StorageUnavailable(_)));
    }

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(
            Box::new(FileBackend::new(dir.path())),
            "beacon_session_id",
        );
        assert_eq!(store.get(), None);
        assert!(store.set("abc123"));
        assert_eq!(store.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = IdentityStore::new(
                Box::new(FileBackend::new(dir.path())),
                "beacon_session_id",
            );
            assert!(store.set("persisted"));
        }
        let store = IdentityStore::new(
            Box::new(FileBackend::new(dir.path())),
            "beacon_session_id",
        );
        assert_eq!(store.get(), Some("persisted".to_string()));
    }
}
