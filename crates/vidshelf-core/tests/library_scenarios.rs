// End-to-end flows through the public API with on-disk storage.

use std::io;

use vidshelf_core::commands::AppCommand;
use vidshelf_core::config::AppConfig;
use vidshelf_core::files::{AssetFs, NativeFs};
use vidshelf_core::import::{MediaPicker, PermissionStatus, PickedAsset};
use vidshelf_core::playback::{PlaybackStatus, SurfaceCommand};
use vidshelf_core::storage::{FileStore, KeyValueStore, LIBRARY_KEY};
use vidshelf_core::{LibraryError, LibraryStore, Platform, Session, StorageAdapter, StorageError, VideoLibrary};

struct Queue(Vec<PickedAsset>);

impl Queue {
    fn of(items: &[(&str, f64)]) -> Self {
        Queue(items.iter().rev()
            .map(|(uri, d)| PickedAsset { uri: uri.to_string(), duration: Some(*d) })
            .collect())
    }
}

impl MediaPicker for Queue {
    fn request_permission(&mut self) -> PermissionStatus { PermissionStatus::Granted }
    fn pick_video(&mut self) -> Option<PickedAsset>     { self.0.pop() }
}

struct ReadOnly;

impl KeyValueStore for ReadOnly {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> { Ok(None) }
    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded)
    }
    fn remove(&mut self, _key: &str) -> Result<(), StorageError> { Ok(()) }
}

struct NullFs;

impl AssetFs for NullFs {
    fn copy_into_library(&self, _source: &str, dest_name: &str) -> io::Result<String> {
        Ok(format!("/lib/{dest_name}"))
    }
    fn remove(&self, _uri: &str) -> io::Result<()> { Ok(()) }
}

fn native_store(root: &std::path::Path) -> LibraryStore {
    let storage = StorageAdapter::for_platform(Platform::Native, &root.join("storage"));
    LibraryStore::open(Platform::Native, storage, Box::new(NativeFs::new(root.join("videos"))))
}

fn write_source(dir: &std::path::Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, b"not really a video").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn import_two_delete_first_persists_second() {
    let root = tempfile::tempdir().unwrap();
    let src  = tempfile::tempdir().unwrap();
    let a = write_source(src.path(), "a.mp4");
    let b = write_source(src.path(), "b.mp4");

    let mut session = Session::new(native_store(root.path()), &AppConfig::default());
    let mut picker = Queue::of(&[(&a, 10.0), (&b, 20.0)]);
    session.apply(AppCommand::ImportVideo, &mut picker, 1_000);
    session.apply(AppCommand::ImportVideo, &mut picker, 2_000);
    assert_eq!(session.store.library().len(), 2);

    let first = session.store.library().records()[0].clone();
    assert!(std::path::Path::new(&first.uri).exists());

    session.apply(AppCommand::RequestDelete(first.id.clone()), &mut picker, 3_000);
    session.apply(AppCommand::ConfirmPending, &mut picker, 3_001);
    assert!(!std::path::Path::new(&first.uri).exists());

    let text = FileStore::new(root.path().join("storage")).get(LIBRARY_KEY).unwrap().unwrap();
    let saved: VideoLibrary = serde_json::from_str(&text).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.records()[0].name, "b.mp4");
    assert_eq!(saved.records()[0].duration, 20.0);

    // A fresh process sees the same list.
    let reopened = native_store(root.path());
    assert_eq!(reopened.library(), &saved);
}

#[test]
fn first_launch_is_empty() {
    let root = tempfile::tempdir().unwrap();
    assert!(native_store(root.path()).library().is_empty());
}

#[test]
fn left_double_tap_rewinds_ten_seconds() {
    let root = tempfile::tempdir().unwrap();
    let src  = tempfile::tempdir().unwrap();
    let a = write_source(src.path(), "a.mp4");

    let mut session = Session::new(native_store(root.path()), &AppConfig::default());
    let mut picker = Queue::of(&[(&a, 60.0)]);
    session.apply(AppCommand::ImportVideo, &mut picker, 1);
    let id = session.store.library().records()[0].id.clone();
    session.apply(AppCommand::OpenPlayer(id), &mut picker, 2);
    session.player.on_status(PlaybackStatus {
        position_ms: 15_000, duration_ms: 60_000, is_playing: true, is_loaded: true,
    });

    session.apply(AppCommand::Tap { x: 20.0, width: 400.0 }, &mut picker, 5_000);
    let cmds = session.apply(AppCommand::Tap { x: 40.0, width: 400.0 }, &mut picker, 5_150);
    assert_eq!(cmds, vec![SurfaceCommand::SeekTo(5_000)]);
    assert_eq!(session.player.position_ms(), 5_000);
}

#[test]
fn saved_list_round_trips_exactly() {
    let root = tempfile::tempdir().unwrap();
    let mut store = LibraryStore::open(
        Platform::Web,
        StorageAdapter::new(Box::new(FileStore::new(root.path()))),
        Box::new(NullFs),
    );
    let mut picker = Queue::of(&[("blob:http://host/1", 1.5), ("blob:http://host/2", 0.0)]);
    store.pick_and_import(&mut picker, 7).unwrap();
    store.pick_and_import(&mut picker, 7).unwrap();

    let adapter = StorageAdapter::new(Box::new(FileStore::new(root.path())));
    assert_eq!(&adapter.load(), store.library());
}

#[test]
fn same_millisecond_imports_get_distinct_ids() {
    let mut store = LibraryStore::open(
        Platform::Native,
        StorageAdapter::new(Box::new(vidshelf_core::storage::MemoryStore::new())),
        Box::new(NullFs),
    );
    let mut picker = Queue::of(&[("a.mp4", 1.0), ("a.mp4", 1.0)]);
    let a = store.pick_and_import(&mut picker, 42).unwrap().unwrap();
    let b = store.pick_and_import(&mut picker, 42).unwrap().unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(a.uri, b.uri);
}

#[test]
fn persist_failure_keeps_record_in_memory() {
    let mut store = LibraryStore::open(
        Platform::Native,
        StorageAdapter::new(Box::new(ReadOnly)),
        Box::new(NullFs),
    );
    let mut picker = Queue::of(&[("a.mp4", 1.0)]);
    let err = store.pick_and_import(&mut picker, 1).unwrap_err();
    assert!(matches!(err, LibraryError::PersistFailed(StorageError::QuotaExceeded)));
    assert_eq!(store.library().len(), 1);
    assert_eq!(err.user_message().0, "Error");
}
