// crates/vidshelf-core/src/import.rs
//
// Import Pipeline collaborators and record construction.
// The flow itself (permission → pick → copy → append → persist) is
// `LibraryStore::pick_and_import`; this module holds the pieces it calls.

use crate::error::LibraryError;
use crate::files::{file_name_of, AssetFs};
use crate::state::VideoRecord;
use crate::storage::Platform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// What the picker hands back for one selected video.
#[derive(Clone, Debug, PartialEq)]
pub struct PickedAsset {
    pub uri:      String,
    /// Seconds, when the picker knows it.
    pub duration: Option<f64>,
}

/// External media picker.
pub trait MediaPicker {
    fn request_permission(&mut self) -> PermissionStatus;
    /// `None` means the user cancelled.
    fn pick_video(&mut self) -> Option<PickedAsset>;
}

/// Build the record for `asset`, copying it into app storage on native hosts.
///
/// `id` must already be unique within the library.
pub fn record_for_asset(
    asset:    &PickedAsset,
    id:       String,
    now_ms:   u64,
    platform: Platform,
    fs:       &dyn AssetFs,
) -> Result<VideoRecord, LibraryError> {
    let name = file_name_of(&asset.uri)
        .map(str::to_string)
        .unwrap_or_else(|| format!("video_{now_ms}.mp4"));
    let duration = asset.duration.unwrap_or(0.0);

    let record = match platform {
        Platform::Web => VideoRecord {
            id,
            uri:     asset.uri.clone(),
            name,
            duration,
            web_uri: Some(asset.uri.clone()),
        },
        Platform::Native => {
            let uri = fs
                .copy_into_library(&asset.uri, &format!("{id}_{name}"))
                .map_err(|source| LibraryError::CopyFailed {
                    source_uri: asset.uri.clone(),
                    source,
                })?;
            VideoRecord { id, uri, name, duration, web_uri: None }
        }
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    #[derive(Default)]
    struct RecordingFs {
        copies: RefCell<Vec<(String, String)>>,
    }

    impl AssetFs for RecordingFs {
        fn copy_into_library(&self, source: &str, dest_name: &str) -> io::Result<String> {
            self.copies.borrow_mut().push((source.into(), dest_name.into()));
            Ok(format!("/app/videos/{dest_name}"))
        }
        fn remove(&self, _uri: &str) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn native_record_points_at_copy() {
        let fs = RecordingFs::default();
        let asset = PickedAsset { uri: "file:///dcim/clip.mp4".into(), duration: Some(42.0) };
        let rec = record_for_asset(&asset, "77".into(), 77, Platform::Native, &fs).unwrap();

        assert_eq!(rec.uri, "/app/videos/77_clip.mp4");
        assert_eq!(rec.name, "clip.mp4");
        assert_eq!(rec.duration, 42.0);
        assert_eq!(rec.web_uri, None);
        assert_eq!(fs.copies.borrow().len(), 1);
    }

    #[test]
    fn web_record_keeps_original_locator_and_skips_copy() {
        let fs = RecordingFs::default();
        let asset = PickedAsset { uri: "blob:http://localhost:3000/550e8400".into(), duration: None };
        let rec = record_for_asset(&asset, "5".into(), 5, Platform::Web, &fs).unwrap();

        assert_eq!(rec.uri, asset.uri);
        assert_eq!(rec.web_uri.as_deref(), Some(asset.uri.as_str()));
        assert_eq!(rec.duration, 0.0);
        assert!(fs.copies.borrow().is_empty());
    }

    #[test]
    fn name_falls_back_when_locator_has_no_segment() {
        let fs = RecordingFs::default();
        let asset = PickedAsset { uri: "blob:x/".into(), duration: None };
        let rec = record_for_asset(&asset, "9".into(), 9, Platform::Web, &fs).unwrap();
        assert_eq!(rec.name, "video_9.mp4");
    }
}
