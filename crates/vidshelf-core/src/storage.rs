// crates/vidshelf-core/src/storage.rs
//
// Storage Adapter: the persisted shadow of the library lives under a single
// key in a platform key-value store. Two backends are swapped in at
// construction time (file-per-key on native hosts, localStorage in the
// browser); business logic only ever sees `StorageAdapter`.
//
// Persistence is best-effort. `save`/`clear` log failures and move on,
// `load` turns missing or corrupt data into an empty library.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{LibraryError, StorageError};
use crate::state::VideoLibrary;

/// The one key the app persists.
pub const LIBRARY_KEY: &str = "videoList";

/// Which host the app runs on. Selects storage backend and import behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Desktop/mobile host with a private filesystem.
    Native,
    /// Browser host: no file copy, localStorage only.
    Web,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") { Platform::Web } else { Platform::Native }
    }

    pub fn is_web(self) -> bool {
        self == Platform::Web
    }
}

// ── Backends ─────────────────────────────────────────────────────────────────

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a key that does not exist is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Native backend: one `<key>.json` file per key under `dir`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename over it so a crash mid-write
        // never leaves a truncated list behind.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process backend. Clones share the same map, so a test can keep a handle
/// and inspect what the adapter wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Browser backend over `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct WebStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl WebStore {
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // setItem only throws on QuotaExceededError in practice.
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

// ── Adapter ──────────────────────────────────────────────────────────────────

pub struct StorageAdapter {
    backend: Box<dyn KeyValueStore>,
}

impl StorageAdapter {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Pick the backend for `platform`. `storage_dir` is only used on native.
    pub fn for_platform(platform: Platform, storage_dir: &Path) -> Self {
        match platform {
            Platform::Native => Self::new(Box::new(FileStore::new(storage_dir))),
            Platform::Web => Self::new(web_backend()),
        }
    }

    /// Serialize and write the whole list, reporting failure to the caller.
    pub fn try_save(&mut self, library: &VideoLibrary) -> Result<(), StorageError> {
        let json = serde_json::to_string(library)?;
        self.backend.set(LIBRARY_KEY, &json)
    }

    /// Best-effort save: failures are logged and swallowed.
    pub fn save(&mut self, library: &VideoLibrary) {
        if let Err(e) = self.try_save(library) {
            log::warn!("[storage] save failed, keeping in-memory list: {e}");
        }
    }

    /// Read the persisted list. Missing or unreadable data yields an empty library.
    pub fn load(&self) -> VideoLibrary {
        let text = match self.backend.get(LIBRARY_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::info!("[storage] no saved video list: starting empty");
                return VideoLibrary::new();
            }
            Err(e) => {
                log::warn!("[storage] load failed: {e}");
                return VideoLibrary::new();
            }
        };
        match serde_json::from_str::<Option<VideoLibrary>>(&text) {
            Ok(lib) => lib.unwrap_or_default(),
            Err(e) => {
                log::warn!("[storage] {}", LibraryError::MalformedData(e));
                VideoLibrary::new()
            }
        }
    }

    /// Drop the persisted key entirely.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(LIBRARY_KEY) {
            log::warn!("[storage] clear failed: {e}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn web_backend() -> Box<dyn KeyValueStore> {
    match WebStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("[storage] {e}: falling back to in-memory storage");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn web_backend() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}
