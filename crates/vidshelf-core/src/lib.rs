// crates/vidshelf-core/src/lib.rs
//
// Pure library/session logic: no egui, no ffmpeg. Every platform facility
// (picker, filesystem, key-value store, video widget) sits behind a trait so
// the whole command flow runs in plain unit tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod gesture;
pub mod helpers;
pub mod import;
pub mod library;
pub mod media_types;
pub mod playback;
pub mod session;
pub mod state;
pub mod storage;

pub use error::{LibraryError, StorageError};
pub use library::LibraryStore;
pub use session::Session;
pub use state::{VideoLibrary, VideoRecord};
pub use storage::{Platform, StorageAdapter};
