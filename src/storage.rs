//! Saved request store - an ordered JSON array on disk

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::models::Request;

/// Narrow persistence interface the app layer depends on
pub trait RequestRepository: Send + Sync {
    /// Replace the in-memory collection with the backing contents
    fn load(&self) -> Result<(), StoreError>;
    /// Append to the in-memory collection without persisting
    fn add(&self, request: Request);
    /// Persist the whole in-memory collection
    fn save(&self) -> Result<(), StoreError>;
    /// Snapshot of the collection in insertion order
    fn list(&self) -> Vec<Request>;
}

/// JSON-file backed store, guarded by a single mutex
pub struct RequestStore {
    path: PathBuf,
    requests: Mutex<Vec<Request>>,
}

impl RequestStore {
    /// Open the store at `path`, loading any existing contents
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = RequestStore {
            path: path.into(),
            requests: Mutex::new(Vec::new()),
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Saved request at `index`, if any
    pub fn get(&self, index: usize) -> Option<Request> {
        self.lock().get(index).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Request>> {
        // Every mutation is a single push or assignment, so a poisoned guard is still consistent.
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_file(&self) -> Result<Vec<Request>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io("reading saved requests", &self.path, e)),
        };

        serde_json::from_slice(&data).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_file(&self, requests: &[Request]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(requests).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)
                .map_err(|e| StoreError::io("creating store directory", dir, e))?;
        }

        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new_in("."),
        }
        .map_err(|e| StoreError::io("creating temporary file", &self.path, e))?;

        temp_file
            .write_all(&data)
            .map_err(|e| StoreError::io("writing saved requests", &self.path, e))?;
        temp_file
            .as_file_mut()
            .sync_all()
            .map_err(|e| StoreError::io("syncing saved requests", &self.path, e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| StoreError::io("replacing saved requests", &self.path, e.error))?;
        Ok(())
    }
}

impl RequestRepository for RequestStore {
    fn load(&self) -> Result<(), StoreError> {
        let mut requests = self.lock();
        *requests = self.read_file()?;
        tracing::info!(path = %self.path.display(), count = requests.len(), "Loaded saved requests");
        Ok(())
    }

    fn add(&self, request: Request) {
        self.lock().push(request);
    }

    fn save(&self) -> Result<(), StoreError> {
        let requests = self.lock();
        self.write_file(&requests)?;
        tracing::info!(path = %self.path.display(), count = requests.len(), "Saved requests");
        Ok(())
    }

    fn list(&self) -> Vec<Request> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample(name: &str) -> Request {
        Request::new(name, HttpMethod::POST, "http://localhost/items", r#"{"a":1}"#, "[#f92672]ok[-]")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = RequestStore::open(dir.path().join("requests.json")).unwrap();
        assert!(store.list().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.json");

        let store = RequestStore::open(&path).unwrap();
        store.add(sample("first"));
        store.add(Request::new("second", HttpMethod::GET, "http://localhost", "", "plain"));
        store.add(sample("third"));
        store.save().unwrap();

        let reopened = RequestStore::open(&path).unwrap();
        assert_eq!(reopened.list(), store.list());
        let names: Vec<_> = reopened.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_add_does_not_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.json");
        let store = RequestStore::open(&path).unwrap();
        store.add(sample("unsaved"));
        assert_eq!(store.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_writes_indented_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("requests.json");
        let store = RequestStore::open(&path).unwrap();
        store.add(sample("one"));
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"Name\": \"one\""));
        assert!(text.contains("\"Method\": 1,"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.json");
        fs::write(&path, "{ not an array").unwrap();

        let result = RequestStore::open(&path);
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_load_replaces_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.json");
        let store = RequestStore::open(&path).unwrap();
        store.add(sample("kept"));
        store.save().unwrap();
        store.add(sample("dropped"));

        store.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "kept");
    }

    #[test]
    fn test_concurrent_adds() {
        let dir = tempdir().unwrap();
        let store = Arc::new(RequestStore::open(dir.path().join("requests.json")).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.add(sample(&format!("req-{}", i)));
                    store.save().unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
        let reopened = RequestStore::open(store.path()).unwrap();
        assert_eq!(reopened.list(), store.list());
    }
}
