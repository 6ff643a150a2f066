// crates/vidshelf-core/src/session.rs
//
// Session: the single owner of everything the UI shows (library store,
// player, tap detector, pending confirmation, current notice).
//
// Panels never mutate it. They push AppCommands, and the shell calls
// `apply` for each one after the UI pass, forwarding the returned
// SurfaceCommands to the video widget.

use crate::commands::{AppCommand, Notice, PendingConfirm};
use crate::config::AppConfig;
use crate::gesture::{DoubleTapDetector, TapSide};
use crate::import::MediaPicker;
use crate::library::LibraryStore;
use crate::playback::{PlaybackController, SurfaceCommand};

pub struct Session {
    pub store:           LibraryStore,
    pub player:          PlaybackController,
    pub taps:            DoubleTapDetector,
    pub pending_confirm: Option<PendingConfirm>,
    pub notice:          Option<Notice>,
    seek_step_ms:        u64,
}

impl Session {
    pub fn new(store: LibraryStore, config: &AppConfig) -> Self {
        Self {
            store,
            player:          PlaybackController::new(),
            taps:            DoubleTapDetector::new(config.double_tap_window_ms, config.seek_indicator_ms),
            pending_confirm: None,
            notice:          None,
            seek_step_ms:    config.seek_step_ms,
        }
    }

    pub fn seek_step_ms(&self) -> u64 {
        self.seek_step_ms
    }

    /// Process one command. `now_ms` is wall-clock time, used for record ids
    /// and tap timing.
    pub fn apply(
        &mut self,
        cmd:    AppCommand,
        picker: &mut dyn MediaPicker,
        now_ms: u64,
    ) -> Vec<SurfaceCommand> {
        match cmd {
            // ── Library ──────────────────────────────────────────────────────
            AppCommand::ImportVideo => {
                match self.store.pick_and_import(picker, now_ms) {
                    Ok(Some(_)) => self.notice = Some(Notice::info("Done", "The video was added.")),
                    Ok(None)    => {}
                    Err(e) => {
                        let (title, body) = e.user_message();
                        self.notice = Some(Notice::error(title, body));
                    }
                }
                Vec::new()
            }
            AppCommand::RequestDelete(id) => {
                if let Some(rec) = self.store.get(&id) {
                    self.pending_confirm = Some(PendingConfirm::DeleteOne { id, name: rec.name.clone() });
                }
                Vec::new()
            }
            AppCommand::RequestClearAll => {
                if !self.store.library().is_empty() {
                    self.pending_confirm = Some(PendingConfirm::ClearAll);
                }
                Vec::new()
            }
            AppCommand::ConfirmPending => match self.pending_confirm.take() {
                Some(PendingConfirm::DeleteOne { id, .. }) => self.store.delete_one(&id, &mut self.player),
                Some(PendingConfirm::ClearAll) => {
                    self.taps.reset();
                    self.store.clear_all(&mut self.player)
                }
                None => Vec::new(),
            },
            AppCommand::CancelPending => {
                self.pending_confirm = None;
                Vec::new()
            }

            // ── Player ───────────────────────────────────────────────────────
            AppCommand::OpenPlayer(id) => match self.store.get(&id) {
                Some(rec) => {
                    self.taps.reset();
                    self.player.open(rec.clone())
                }
                None => Vec::new(),
            },
            AppCommand::ClosePlayer => {
                self.taps.reset();
                self.player.close()
            }
            AppCommand::TogglePlayPause   => self.player.toggle_play_pause(),
            AppCommand::SeekBy(delta)     => self.player.seek_by(delta),
            AppCommand::SeekToFraction(f) => self.player.seek_to_fraction(f),
            AppCommand::Tap { x, width } => {
                if !self.player.is_open() {
                    return Vec::new();
                }
                match self.taps.tap(TapSide::from_position(x, width), now_ms) {
                    Some(side) => self.player.seek_by(side.seek_delta_ms(self.seek_step_ms)),
                    None       => Vec::new(),
                }
            }

            // ── View / UI ────────────────────────────────────────────────────
            AppCommand::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }
}
