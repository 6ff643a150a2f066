// crates/vidshelf-core/src/library.rs
//
// Video Library Store: the in-memory list plus everything that must happen
// alongside a mutation (file copy/delete on native, persistence, closing the
// player when its record disappears).
//
// delete_one / clear_all are the *confirmed* transitions. Asking the user
// first is Session's job; nothing in here knows about dialogs.

use crate::error::LibraryError;
use crate::files::AssetFs;
use crate::import::{record_for_asset, MediaPicker, PermissionStatus};
use crate::playback::{PlaybackController, SurfaceCommand};
use crate::state::{VideoLibrary, VideoRecord};
use crate::storage::{Platform, StorageAdapter};

pub struct LibraryStore {
    library:  VideoLibrary,
    storage:  StorageAdapter,
    fs:       Box<dyn AssetFs>,
    platform: Platform,
}

impl LibraryStore {
    /// Build the store and read the persisted list once.
    pub fn open(platform: Platform, storage: StorageAdapter, fs: Box<dyn AssetFs>) -> Self {
        let library = storage.load();
        log::info!("[library] loaded {} video(s)", library.len());
        Self { library, storage, fs, platform }
    }

    pub fn library(&self) -> &VideoLibrary {
        &self.library
    }

    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.library.get(id)
    }

    /// Permission → picker → (copy) → append → persist.
    ///
    /// `Ok(None)` when the user cancels the picker. On `PersistFailed` the
    /// record has already been appended and stays in memory.
    pub fn pick_and_import(
        &mut self,
        picker: &mut dyn MediaPicker,
        now_ms: u64,
    ) -> Result<Option<VideoRecord>, LibraryError> {
        if picker.request_permission() != PermissionStatus::Granted {
            log::warn!("[import] media library permission denied");
            return Err(LibraryError::PermissionDenied);
        }
        let Some(asset) = picker.pick_video() else {
            log::debug!("[import] picker cancelled");
            return Ok(None);
        };

        let id = self.library.next_id(now_ms);
        let record = record_for_asset(&asset, id, now_ms, self.platform, self.fs.as_ref())
            .inspect_err(|e| log::error!("[import] {e}"))?;

        log::info!("[import] added {} ({}, {:.1}s)", record.name, record.id, record.duration);
        self.library.push(record.clone());
        self.storage.try_save(&self.library).map_err(|e| {
            log::error!("[import] persist failed, list kept in memory: {e}");
            LibraryError::PersistFailed(e)
        })?;
        Ok(Some(record))
    }

    /// Remove one record. No-op when `id` is unknown.
    pub fn delete_one(&mut self, id: &str, player: &mut PlaybackController) -> Vec<SurfaceCommand> {
        let Some(record) = self.library.remove(id) else {
            return Vec::new();
        };
        self.remove_backing_file(&record);
        self.storage.save(&self.library);
        log::info!("[library] deleted {} ({})", record.name, record.id);

        if player.is_showing(id) { player.close() } else { Vec::new() }
    }

    /// Remove every record and drop the persisted key.
    pub fn clear_all(&mut self, player: &mut PlaybackController) -> Vec<SurfaceCommand> {
        let removed = self.library.take_all();
        for record in &removed {
            self.remove_backing_file(record);
        }
        self.storage.clear();
        log::info!("[library] cleared {} video(s)", removed.len());
        player.close()
    }

    fn remove_backing_file(&self, record: &VideoRecord) {
        if self.platform.is_web() {
            return;
        }
        if let Err(source) = self.fs.remove(&record.uri) {
            let err = LibraryError::DeleteFileFailed { uri: record.uri.clone(), source };
            log::warn!("[library] {err} (ignored)");
        }
    }
}
