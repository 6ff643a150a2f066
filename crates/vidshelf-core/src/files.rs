// crates/vidshelf-core/src/files.rs
//
// Filesystem collaborator for the import pipeline and the delete flows.
// Only used on native hosts; the browser has no copy/delete facility.

use std::io;
use std::path::PathBuf;

/// Copy/delete operations on app-owned video files.
pub trait AssetFs {
    /// Copy `source` into app-private storage as `dest_name` and return the
    /// locator of the copy.
    fn copy_into_library(&self, source: &str, dest_name: &str) -> io::Result<String>;

    /// Delete the file behind `uri`. A file that is already gone is success.
    fn remove(&self, uri: &str) -> io::Result<()>;
}

/// `std::fs` implementation rooted at the app's videos directory.
pub struct NativeFs {
    library_dir: PathBuf,
}

impl NativeFs {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self { library_dir: library_dir.into() }
    }
}

impl AssetFs for NativeFs {
    fn copy_into_library(&self, source: &str, dest_name: &str) -> io::Result<String> {
        std::fs::create_dir_all(&self.library_dir)?;
        let dest = self.library_dir.join(dest_name);
        std::fs::copy(uri_to_path(source), &dest)?;
        Ok(dest.to_string_lossy().into_owned())
    }

    fn remove(&self, uri: &str) -> io::Result<()> {
        match std::fs::remove_file(uri_to_path(uri)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Accepts plain paths and `file://` locators.
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

/// Last path segment of a locator, if it has a non-empty one.
pub fn file_name_of(uri: &str) -> Option<&str> {
    uri.rsplit(['/', '\\']).next().filter(|s| !s.is_empty())
}
