// crates/vidshelf-ui/src/helpers/log.rs
//
// Logger setup for the binary.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console attached, so stderr output is silently discarded.
// Release builds therefore append to a file in the OS temp directory instead.
//
// File: %TEMP%\vidshelf.log (or $TMPDIR/vidshelf.log), append-only.
//
// Filter: RUST_LOG if set, otherwise `info`.

use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "vidshelf.log";

pub fn init() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if !cfg!(debug_assertions) {
        let path = std::env::temp_dir().join(LOG_FILE);
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            // Nowhere better to report this; stderr is the fallback target anyway.
            Err(e) => eprintln!("[log] cannot open {}: {e}", path.display()),
        }
    }

    if builder.try_init().is_err() {
        eprintln!("[log] logger already initialized");
    }
}
