// crates/vidshelf-core/src/playback.rs
//
// Playback Controller: a thin cache of what the video widget last reported,
// plus the Idle/Loaded/Playing/Paused machine that decides which widget
// commands a user action turns into.
//
// Every transition returns the `SurfaceCommand`s to forward; nothing here
// talks to a widget directly. Position and duration come in through
// `on_status` and are only overwritten locally right after a seek.

use crate::state::VideoRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    /// Player closed, nothing selected.
    #[default]
    Idle,
    /// A record is open but playback has not started.
    Loaded,
    Playing,
    Paused,
}

/// Status pushed by the video widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_playing:  bool,
    pub is_loaded:   bool,
}

/// Commands the controller issues to the video widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    Load { uri: String },
    Unload,
    Play,
    Pause,
    SeekTo(u64),
}

/// The external video widget.
pub trait VideoSurface {
    fn load(&mut self, uri: &str);
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, position_ms: u64);
}

/// Forward `cmds` to `surface` in order.
pub fn dispatch(surface: &mut dyn VideoSurface, cmds: Vec<SurfaceCommand>) {
    for cmd in cmds {
        match cmd {
            SurfaceCommand::Load { uri } => surface.load(&uri),
            SurfaceCommand::Unload       => surface.unload(),
            SurfaceCommand::Play         => surface.play(),
            SurfaceCommand::Pause        => surface.pause(),
            SurfaceCommand::SeekTo(ms)   => surface.seek_to(ms),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlaybackController {
    state:       PlayerState,
    selected:    Option<VideoRecord>,
    position_ms: u64,
    duration_ms: u64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState        { self.state }
    pub fn selected(&self) -> Option<&VideoRecord> { self.selected.as_ref() }
    pub fn position_ms(&self) -> u64          { self.position_ms }
    pub fn duration_ms(&self) -> u64          { self.duration_ms }
    pub fn is_open(&self) -> bool             { self.state != PlayerState::Idle }
    pub fn is_playing(&self) -> bool          { self.state == PlayerState::Playing }

    pub fn is_showing(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|r| r.id == id)
    }

    /// Slider position in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            (self.position_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
        }
    }

    /// Select `record` and load it into the widget. Replaces any open record.
    pub fn open(&mut self, record: VideoRecord) -> Vec<SurfaceCommand> {
        let uri = record.playable_uri().to_string();
        log::debug!("[player] open {} ({})", record.name, record.id);
        self.selected    = Some(record);
        self.state       = PlayerState::Loaded;
        self.position_ms = 0;
        self.duration_ms = 0;
        vec![SurfaceCommand::Load { uri }]
    }

    /// Clear the selection and stop the widget.
    pub fn close(&mut self) -> Vec<SurfaceCommand> {
        if self.state == PlayerState::Idle {
            return Vec::new();
        }
        log::debug!("[player] close");
        self.state       = PlayerState::Idle;
        self.selected    = None;
        self.position_ms = 0;
        self.duration_ms = 0;
        vec![SurfaceCommand::Unload]
    }

    pub fn play(&mut self) -> Vec<SurfaceCommand> {
        match self.state {
            PlayerState::Loaded | PlayerState::Paused => {
                self.state = PlayerState::Playing;
                vec![SurfaceCommand::Play]
            }
            PlayerState::Playing | PlayerState::Idle => Vec::new(),
        }
    }

    pub fn pause(&mut self) -> Vec<SurfaceCommand> {
        if self.state != PlayerState::Playing {
            return Vec::new();
        }
        self.state = PlayerState::Paused;
        vec![SurfaceCommand::Pause]
    }

    pub fn toggle_play_pause(&mut self) -> Vec<SurfaceCommand> {
        if self.state == PlayerState::Playing { self.pause() } else { self.play() }
    }

    /// Relative seek, clamped to `[0, duration]`.
    ///
    /// No-op when the duration is unknown or the playhead is already at the
    /// boundary in the requested direction.
    pub fn seek_by(&mut self, delta_ms: i64) -> Vec<SurfaceCommand> {
        if self.state == PlayerState::Idle || self.duration_ms == 0 {
            return Vec::new();
        }
        let has_room = if delta_ms < 0 {
            self.position_ms > 0
        } else {
            self.position_ms < self.duration_ms
        };
        if !has_room {
            return Vec::new();
        }
        let target = (self.position_ms as i64)
            .saturating_add(delta_ms)
            .clamp(0, self.duration_ms as i64) as u64;
        self.seek_to(target)
    }

    /// Absolute seek to `fraction * duration`. `fraction` is clamped to [0, 1].
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Vec<SurfaceCommand> {
        if self.state == PlayerState::Idle {
            return Vec::new();
        }
        let f = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        self.seek_to((f * self.duration_ms as f64).round() as u64)
    }

    fn seek_to(&mut self, target_ms: u64) -> Vec<SurfaceCommand> {
        self.position_ms = target_ms;
        let mut cmds = vec![SurfaceCommand::SeekTo(target_ms)];
        // A seek before the first play starts playback.
        if self.state == PlayerState::Loaded {
            self.state = PlayerState::Playing;
            cmds.push(SurfaceCommand::Play);
        }
        cmds
    }

    /// Apply a status event from the widget.
    pub fn on_status(&mut self, status: PlaybackStatus) {
        if self.state == PlayerState::Idle || !status.is_loaded {
            return;
        }
        self.position_ms = status.position_ms;
        self.duration_ms = status.duration_ms;
        self.state = match (self.state, status.is_playing) {
            (_, true)                    => PlayerState::Playing,
            (PlayerState::Loaded, false) => PlayerState::Loaded,
            (_, false)                   => PlayerState::Paused,
        };
    }
}
