#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod paths;
mod picker;
mod theme;

use vidshelf_core::config::AppConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> eframe::Result {
    helpers::log::init();

    // Without FFmpeg the library still works; playback reports errors per video.
    if let Err(e) = ffmpeg_the_third::init() {
        log::error!("[main] FFmpeg init failed: {e}");
    }

    if let Err(e) = paths::ensure_data_dirs() {
        log::error!("[main] {e:#}");
    }
    let config = load_config();

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("VidShelf")
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([360.0, 520.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "VidShelf",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::VidShelfApp::new(cc, config)))),
    )
}

/// Read settings, writing the defaults out on first launch so they can be edited.
fn load_config() -> AppConfig {
    let path = paths::config_path();
    let config = AppConfig::load(&path);
    if !path.exists() {
        match config.save(&path) {
            Ok(())  => log::info!("[main] wrote default settings to {}", path.display()),
            Err(e) => log::warn!("[main] could not write {}: {e}", path.display()),
        }
    }
    config
}
