// crates/vidshelf-ui/src/context.rs
//
// AppContext owns the runtime handles that are not part of the Session: the
// player worker and the texture showing its latest frame.

use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui;
use uuid::Uuid;

use vidshelf_core::commands::Notice;
use vidshelf_core::Session;
use vidshelf_media::{PlayerEvent, PlayerWorker, VideoFrame};

pub struct AppContext {
    pub worker:    PlayerWorker,
    /// Latest frame of the worker's current session.
    pub frame:     Option<egui::TextureHandle>,
    frame_session: Option<Uuid>,
}

impl AppContext {
    pub fn new(worker: PlayerWorker) -> Self {
        Self { worker, frame: None, frame_session: None }
    }

    /// Wall-clock milliseconds; used for record ids and tap timing.
    pub fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Drain worker events into the session. Events tagged with any session
    /// but the worker's current one are from a superseded load and dropped.
    pub fn ingest_player_events(&mut self, session: &mut Session, egui_ctx: &egui::Context) {
        let current = self.worker.session();
        if self.frame_session != current {
            self.frame = None;
            self.frame_session = current;
        }

        let mut latest: Option<VideoFrame> = None;
        while let Ok(ev) = self.worker.rx.try_recv() {
            if Some(ev.session()) != current {
                continue;
            }
            match ev {
                PlayerEvent::Status { status, .. } => session.player.on_status(status),
                // Only the newest frame is worth uploading.
                PlayerEvent::Frame(frame) => latest = Some(frame),
                PlayerEvent::Error { msg, .. } => {
                    log::error!("[player] {msg}");
                    session.notice = Some(Notice::error("Playback error", "This video could not be played."));
                }
            }
        }

        if let Some(frame) = latest {
            self.upload_frame(frame, egui_ctx);
            egui_ctx.request_repaint();
        }
    }

    fn upload_frame(&mut self, frame: VideoFrame, egui_ctx: &egui::Context) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize], &frame.data,
        );
        match &mut self.frame {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.frame = Some(egui_ctx.load_texture("player-frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}
