// crates/vidshelf-ui/src/picker.rs
//
// Desktop MediaPicker implementations. File dialogs need no permission grant,
// and report no duration, so both pickers probe it with FFmpeg.

use std::path::{Path, PathBuf};

use rfd::FileDialog;
use vidshelf_core::import::{MediaPicker, PermissionStatus, PickedAsset};
use vidshelf_media::probe_duration;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "mkv", "webm", "avi"];

fn asset_for(path: &Path) -> PickedAsset {
    PickedAsset {
        uri:      path.to_string_lossy().into_owned(),
        duration: probe_duration(path),
    }
}

/// Native open-file dialog.
pub struct DialogPicker;

impl MediaPicker for DialogPicker {
    fn request_permission(&mut self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn pick_video(&mut self) -> Option<PickedAsset> {
        let path = FileDialog::new()
            .set_title("Add video")
            .add_filter("Video", VIDEO_EXTENSIONS)
            .pick_file()?;
        Some(asset_for(&path))
    }
}

/// A file dropped onto the window, handed to the import pipeline as if the
/// user had picked it.
pub struct DroppedFile(Option<PathBuf>);

impl DroppedFile {
    pub fn new(path: PathBuf) -> Self {
        Self(Some(path))
    }

    pub fn is_video(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(e)))
    }
}

impl MediaPicker for DroppedFile {
    fn request_permission(&mut self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn pick_video(&mut self) -> Option<PickedAsset> {
        self.0.take().map(|p| asset_for(&p))
    }
}
