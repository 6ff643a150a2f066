// crates/vidshelf-ui/src/paths.rs
//
// Single source of truth for where VidShelf keeps its data.
//
//   <data dir>/settings.json   AppConfig
//   <data dir>/storage/        key-value files (videoList.json)
//   <data dir>/videos/         copies of imported videos

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use vidshelf_core::config::CONFIG_FILE;

const DATA_DIR_ENV: &str = "VIDSHELF_DATA_DIR";

/// `%APPDATA%\VidShelf` on Windows, `~/.local/share/VidShelf` elsewhere,
/// unless `VIDSHELF_DATA_DIR` is set.
pub fn app_data_dir() -> PathBuf {
    resolve_data_dir(std::env::var_os(DATA_DIR_ENV), platform_base())
}

fn resolve_data_dir(override_dir: Option<OsString>, base: PathBuf) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => base.join("VidShelf"),
    }
}

fn platform_base() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share"))
        .unwrap_or_else(|_| std::env::temp_dir());
    base
}

pub fn storage_dir() -> PathBuf {
    app_data_dir().join("storage")
}

pub fn videos_dir() -> PathBuf {
    app_data_dir().join("videos")
}

pub fn config_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

pub fn ensure_data_dirs() -> Result<()> {
    for dir in [storage_dir(), videos_dir()] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create data directory {}", dir.display()))?;
    }
    Ok(())
}
