// crates/vidshelf-core/src/media_types.rs
//
// Types that flow across the channel between vidshelf-media and vidshelf-ui.
// No egui, no ffmpeg: just plain data.

use uuid::Uuid;

use crate::playback::PlaybackStatus;

/// Events emitted by the player worker. `session` identifies the load the
/// event belongs to so results from a superseded video can be dropped.
pub enum PlayerEvent {
    Status { session: Uuid, status: PlaybackStatus },
    Frame(VideoFrame),
    Error  { session: Uuid, msg: String },
}

impl PlayerEvent {
    pub fn session(&self) -> Uuid {
        match self {
            PlayerEvent::Status { session, .. } => *session,
            PlayerEvent::Frame(f)               => f.session,
            PlayerEvent::Error { session, .. }  => *session,
        }
    }
}

/// A decoded frame from the playback pipeline.
pub struct VideoFrame {
    pub session:     Uuid,
    pub position_ms: u64,
    pub width:       u32,
    pub height:      u32,
    pub data:        Vec<u8>, // RGBA
}
