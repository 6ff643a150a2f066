// crates/vidshelf-media/src/worker.rs
//
// PlayerWorker: owns the playback decode thread. The UI drives it through the
// VideoSurface trait and drains `rx` once per frame.
//
// Frames are paced against the wall clock: the thread decodes one frame ahead
// and waits on the command channel until that frame is due, so commands are
// handled with at most one frame of latency.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use uuid::Uuid;

use vidshelf_core::files::uri_to_path;
use vidshelf_core::media_types::{PlayerEvent, VideoFrame};
use vidshelf_core::playback::{PlaybackStatus, VideoSurface};

use crate::decode::{DecodedFrame, LiveDecoder};

/// Minimum gap between Status events while playing.
const STATUS_INTERVAL: Duration = Duration::from_millis(250);

enum WorkerCmd {
    Load { session: Uuid, path: PathBuf },
    Play,
    Pause,
    Seek(u64),
    Unload,
    Shutdown,
}

/// Called from the decode thread after every event so an idle UI wakes up
/// and drains `rx`.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Copy, Debug)]
pub struct WorkerOptions {
    /// Restart from 0 at end of file instead of stopping.
    pub looping:         bool,
    pub max_frame_width: u32,
}

// ── PlayerWorker ──────────────────────────────────────────────────────────────

pub struct PlayerWorker {
    /// Status, frame and error events, tagged with the session they belong to.
    pub rx:  Receiver<PlayerEvent>,
    cmd_tx:  Sender<WorkerCmd>,
    session: Option<Uuid>,
    handle:  Option<JoinHandle<()>>,
}

impl PlayerWorker {
    pub fn new(opts: WorkerOptions) -> Self {
        Self::with_waker(opts, Arc::new(|| {}))
    }

    pub fn with_waker(opts: WorkerOptions, wake: Waker) -> Self {
        let (cmd_tx, cmd_rx) = bounded::<WorkerCmd>(64);
        // Frames are try_send'd, so a slow UI drops frames instead of stalling decode.
        let (ev_tx, rx) = bounded::<PlayerEvent>(8);
        let events = EventSink { tx: ev_tx, wake };

        let handle = thread::Builder::new()
            .name("vidshelf-player".into())
            .spawn(move || PlayerThread { events, opts, current: None }.run(cmd_rx))
            .map_err(|e| log::error!("[player] spawn failed: {e}"))
            .ok();

        Self { rx, cmd_tx, session: None, handle }
    }

    /// Session of the most recent `load`, or `None` when nothing is loaded.
    /// Events from any other session are stale.
    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    pub fn shutdown(&mut self) {
        let _ = self.cmd_tx.try_send(WorkerCmd::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("[player] decode thread panicked");
            }
        }
    }

    fn send(&self, cmd: WorkerCmd) {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {}
            Err(TrySendError::Full(_))         => log::warn!("[player] command queue full, dropped"),
            Err(TrySendError::Disconnected(_)) => log::error!("[player] decode thread is gone"),
        }
    }

    fn flush_events(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl VideoSurface for PlayerWorker {
    fn load(&mut self, uri: &str) {
        let session = Uuid::new_v4();
        self.session = Some(session);
        self.flush_events();
        self.send(WorkerCmd::Load { session, path: uri_to_path(uri) });
    }

    fn unload(&mut self) {
        self.session = None;
        self.send(WorkerCmd::Unload);
        self.flush_events();
    }

    fn play(&mut self)                    { self.send(WorkerCmd::Play); }
    fn pause(&mut self)                   { self.send(WorkerCmd::Pause); }
    fn seek_to(&mut self, position_ms: u64) { self.send(WorkerCmd::Seek(position_ms)); }
}

impl Drop for PlayerWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── Decode thread ─────────────────────────────────────────────────────────────

/// Wall-clock anchor: `origin_ms` of media time was on screen at `started`.
#[derive(Clone, Copy, Debug)]
struct PlayClock {
    started:   Instant,
    origin_ms: u64,
}

impl PlayClock {
    fn start(origin_ms: u64, now: Instant) -> Self {
        Self { started: now, origin_ms }
    }

    /// How long to wait before a frame at `frame_ms` is due.
    fn delay_until(&self, frame_ms: u64, now: Instant) -> Duration {
        let due = self.started + Duration::from_millis(frame_ms.saturating_sub(self.origin_ms));
        due.saturating_duration_since(now)
    }
}

struct Playback {
    session:     Uuid,
    decoder:     LiveDecoder,
    duration_ms: u64,
    position_ms: u64,
    playing:     bool,
    clock:       Option<PlayClock>,
    /// Decoded but not yet due.
    pending:     Option<DecodedFrame>,
    last_status: Instant,
    /// Frames shown since the decoder was (re)opened; 0 at EOF means the
    /// file has nothing decodable and looping would spin.
    shown:       u64,
}

enum Wait {
    Block,
    Eof,
    For(Duration),
}

struct PlayerThread {
    events:  EventSink,
    opts:    WorkerOptions,
    current: Option<Playback>,
}

impl PlayerThread {
    fn run(mut self, cmds: Receiver<WorkerCmd>) {
        loop {
            let cmd = match self.next_wait() {
                Wait::Block => match cmds.recv() {
                    Ok(cmd) => cmd,
                    Err(_)  => return,
                },
                Wait::Eof => {
                    self.on_eof();
                    continue;
                }
                Wait::For(delay) => match cmds.recv_timeout(delay) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        self.present_pending();
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => return,
                },
            };
            if !self.handle(cmd) {
                log::debug!("[player] decode thread exiting");
                return;
            }
        }
    }

    fn next_wait(&mut self) -> Wait {
        let Some(pb) = self.current.as_mut().filter(|pb| pb.playing) else {
            return Wait::Block;
        };
        if pb.pending.is_none() {
            pb.pending = pb.decoder.next_frame();
        }
        match (&pb.pending, pb.clock) {
            (None, _)              => Wait::Eof,
            (Some(f), Some(clock)) => Wait::For(clock.delay_until(f.position_ms, Instant::now())),
            (Some(_), None)        => Wait::For(Duration::ZERO),
        }
    }

    /// Returns false on shutdown.
    fn handle(&mut self, cmd: WorkerCmd) -> bool {
        match cmd {
            WorkerCmd::Load { session, path } => self.load(session, path),
            WorkerCmd::Play      => self.set_playing(true),
            WorkerCmd::Pause     => self.set_playing(false),
            WorkerCmd::Seek(ms)  => self.seek(ms),
            WorkerCmd::Unload    => self.current = None,
            WorkerCmd::Shutdown  => return false,
        }
        true
    }

    fn load(&mut self, session: Uuid, path: PathBuf) {
        self.current = None;
        let mut decoder = match LiveDecoder::open(&path, 0, self.opts.max_frame_width) {
            Ok(d) => d,
            Err(e) => {
                log::error!("[player] load {}: {e:#}", path.display());
                self.events.emit(PlayerEvent::Error { session, msg: format!("{e:#}") });
                return;
            }
        };
        let duration_ms = decoder.duration_ms();
        log::info!("[player] loaded {} ({duration_ms}ms)", path.display());

        // First frame doubles as the poster while paused.
        let poster = decoder.next_frame();
        let pb = Playback {
            session, decoder, duration_ms,
            position_ms: 0,
            playing:     false,
            clock:       None,
            pending:     None,
            last_status: Instant::now(),
            shown:       0,
        };
        if let Some(frame) = poster {
            self.events.emit(frame_event(session, frame));
        }
        self.events.emit(status_event(&pb));
        self.current = Some(pb);
    }

    fn set_playing(&mut self, playing: bool) {
        let at_end = self.current.as_ref().is_some_and(|pb| {
            !pb.playing && pb.duration_ms > 0 && pb.position_ms >= pb.duration_ms
        });
        if playing && at_end {
            self.seek(0);
        }
        let Some(pb) = self.current.as_mut() else { return };
        pb.playing = playing;
        pb.clock   = playing.then(|| PlayClock::start(pb.position_ms, Instant::now()));
        pb.last_status = Instant::now();
        self.events.emit(status_event(pb));
    }

    /// Reopen at the keyframe before `ms` and decode forward to it.
    fn seek(&mut self, ms: u64) {
        let max_width = self.opts.max_frame_width;
        let Some(pb) = self.current.as_mut() else { return };
        let target = if pb.duration_ms > 0 { ms.min(pb.duration_ms) } else { ms };

        match LiveDecoder::open(&pb.decoder.path, target, max_width) {
            Ok(mut decoder) => {
                if let Some(frame) = decoder.advance_to(target) {
                    self.events.emit(frame_event(pb.session, frame));
                }
                pb.decoder = decoder;
                pb.shown   = 1;
            }
            Err(e) => {
                log::error!("[player] seek to {target}ms: {e:#}");
                self.events.emit(PlayerEvent::Error { session: pb.session, msg: format!("{e:#}") });
                return;
            }
        }
        pb.pending     = None;
        pb.position_ms = target;
        pb.clock       = pb.playing.then(|| PlayClock::start(target, Instant::now()));
        pb.last_status = Instant::now();
        self.events.emit(status_event(pb));
    }

    fn present_pending(&mut self) {
        let Some(pb) = self.current.as_mut() else { return };
        let Some(frame) = pb.pending.take() else { return };
        pb.position_ms = frame.position_ms;
        pb.shown += 1;
        self.events.emit(frame_event(pb.session, frame));
        if pb.last_status.elapsed() >= STATUS_INTERVAL {
            pb.last_status = Instant::now();
            self.events.emit(status_event(pb));
        }
    }

    fn on_eof(&mut self) {
        let looping   = self.opts.looping;
        let max_width = self.opts.max_frame_width;
        let Some(pb) = self.current.as_mut() else { return };

        if looping && pb.shown > 0 {
            match LiveDecoder::open(&pb.decoder.path, 0, max_width) {
                Ok(decoder) => {
                    log::debug!("[player] looping {}", pb.decoder.path.display());
                    pb.decoder     = decoder;
                    pb.position_ms = 0;
                    pb.shown       = 0;
                    pb.clock       = Some(PlayClock::start(0, Instant::now()));
                    self.events.emit(status_event(pb));
                    return;
                }
                Err(e) => {
                    log::error!("[player] reopen for loop: {e:#}");
                    self.events.emit(PlayerEvent::Error { session: pb.session, msg: format!("{e:#}") });
                }
            }
        } else if pb.shown == 0 {
            log::warn!("[player] no decodable frames in {}", pb.decoder.path.display());
        }

        pb.playing     = false;
        pb.clock       = None;
        pb.position_ms = pb.position_ms.max(pb.duration_ms);
        self.events.emit(status_event(pb));
    }
}

fn status_event(pb: &Playback) -> PlayerEvent {
    PlayerEvent::Status {
        session: pb.session,
        status:  PlaybackStatus {
            position_ms: pb.position_ms,
            duration_ms: pb.duration_ms,
            is_playing:  pb.playing,
            is_loaded:   true,
        },
    }
}

fn frame_event(session: Uuid, frame: DecodedFrame) -> PlayerEvent {
    PlayerEvent::Frame(VideoFrame {
        session,
        position_ms: frame.position_ms,
        width:       frame.width,
        height:      frame.height,
        data:        frame.data,
    })
}

struct EventSink {
    tx:   Sender<PlayerEvent>,
    wake: Waker,
}

impl EventSink {
    /// Non-blocking: a full channel means the UI is behind and the event is stale.
    fn emit(&self, ev: PlayerEvent) {
        if let Err(TrySendError::Full(ev)) = self.tx.try_send(ev) {
            // Status must not be lost behind a burst of frames.
            if matches!(ev, PlayerEvent::Status { .. } | PlayerEvent::Error { .. }) {
                let _ = self.tx.send_timeout(ev, Duration::from_millis(50));
            }
        }
        (self.wake)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_delays_future_frames() {
        let now = Instant::now();
        let clock = PlayClock::start(5_000, now);
        assert_eq!(clock.delay_until(5_040, now), Duration::from_millis(40));
        assert_eq!(clock.delay_until(5_000, now), Duration::ZERO);
    }

    #[test]
    fn clock_never_waits_for_late_frames() {
        let now = Instant::now();
        let clock = PlayClock::start(0, now);
        let later = now + Duration::from_millis(500);
        assert_eq!(clock.delay_until(100, later), Duration::ZERO);
        assert_eq!(clock.delay_until(600, later), Duration::from_millis(100));
    }

    #[test]
    fn load_of_missing_file_reports_error_for_that_session() {
        let _ = ffmpeg_the_third::init();
        let mut worker = PlayerWorker::new(WorkerOptions { looping: true, max_frame_width: 320 });
        worker.load("/definitely/not/here.mp4");
        let session = worker.session().unwrap();

        let ev = worker.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(ev.session(), session);
        assert!(matches!(ev, PlayerEvent::Error { .. }));
        worker.shutdown();
    }

    #[test]
    fn unload_clears_session() {
        let mut worker = PlayerWorker::new(WorkerOptions { looping: false, max_frame_width: 0 });
        worker.load("file:///nowhere.mp4");
        assert!(worker.session().is_some());
        worker.unload();
        assert!(worker.session().is_none());
    }

    #[test]
    fn waker_fires_for_each_event() {
        let _ = ffmpeg_the_third::init();
        let (wake_tx, wake_rx) = bounded::<()>(8);
        let mut worker = PlayerWorker::with_waker(
            WorkerOptions { looping: false, max_frame_width: 0 },
            Arc::new(move || { let _ = wake_tx.try_send(()); }),
        );
        worker.load("/definitely/not/here.mp4");
        assert!(wake_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert!(matches!(worker.rx.try_recv(), Ok(PlayerEvent::Error { .. })));
        worker.shutdown();
    }

    // ── Decode thread driven by hand on a generated clip ─────────────────────

    fn thread_with(looping: bool) -> (PlayerThread, Receiver<PlayerEvent>) {
        let (tx, rx) = bounded(64);
        let events = EventSink { tx, wake: Arc::new(|| {}) };
        let opts = WorkerOptions { looping, max_frame_width: 0 };
        (PlayerThread { events, opts, current: None }, rx)
    }

    fn loaded_clip(looping: bool, dir: &tempfile::TempDir) -> (PlayerThread, Receiver<PlayerEvent>) {
        let path = dir.path().join("clip.mp4");
        crate::test_clip::write_clip(&path, 10, 10).unwrap();
        let (mut th, rx) = thread_with(looping);
        th.load(Uuid::new_v4(), path);
        (th, rx)
    }

    fn drain(rx: &Receiver<PlayerEvent>) -> Vec<PlayerEvent> {
        rx.try_iter().collect()
    }

    fn last_status(events: &[PlayerEvent]) -> PlaybackStatus {
        events.iter().rev().find_map(|e| match e {
            PlayerEvent::Status { status, .. } => Some(*status),
            _ => None,
        }).unwrap()
    }

    /// Present frames back to back, ignoring pacing, until the end of file
    /// has been handled.
    fn play_through(th: &mut PlayerThread) {
        for _ in 0..100 {
            match th.next_wait() {
                Wait::Eof     => { th.on_eof(); return; }
                Wait::For(_)  => th.present_pending(),
                Wait::Block   => panic!("not playing"),
            }
        }
        panic!("clip never reached end of file");
    }

    #[test]
    fn load_emits_poster_and_paused_status() {
        let dir = tempfile::tempdir().unwrap();
        let (_th, rx) = loaded_clip(false, &dir);
        let events = drain(&rx);
        assert!(events.iter().any(|e| matches!(e, PlayerEvent::Frame(f) if f.position_ms < 100)));
        let status = last_status(&events);
        assert!(status.is_loaded && !status.is_playing);
        assert_eq!(status.position_ms, 0);
        assert!(status.duration_ms >= 900);
    }

    #[test]
    fn without_looping_playback_stops_at_end_then_restarts_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let (mut th, rx) = loaded_clip(false, &dir);
        th.set_playing(true);
        drain(&rx);

        play_through(&mut th);
        let at_end = last_status(&drain(&rx));
        assert!(!at_end.is_playing);
        assert_eq!(at_end.position_ms, at_end.duration_ms);
        assert!(matches!(th.next_wait(), Wait::Block));

        th.set_playing(true);
        let restarted = last_status(&drain(&rx));
        assert!(restarted.is_playing);
        assert_eq!(restarted.position_ms, 0);
    }

    #[test]
    fn looping_wraps_to_start_and_keeps_playing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut th, rx) = loaded_clip(true, &dir);
        th.set_playing(true);
        drain(&rx);

        play_through(&mut th);
        let wrapped = last_status(&drain(&rx));
        assert!(wrapped.is_playing);
        assert_eq!(wrapped.position_ms, 0);
        assert!(matches!(th.next_wait(), Wait::For(_)));
    }

    #[test]
    fn paused_seek_shows_frame_at_target() {
        let dir = tempfile::tempdir().unwrap();
        let (mut th, rx) = loaded_clip(false, &dir);
        drain(&rx);

        th.seek(500);
        let events = drain(&rx);
        let frame_ms = events.iter().find_map(|e| match e {
            PlayerEvent::Frame(f) => Some(f.position_ms),
            _ => None,
        }).unwrap();
        assert!(frame_ms >= 500, "frame at {frame_ms}");
        let status = last_status(&events);
        assert!(!status.is_playing);
        assert_eq!(status.position_ms, 500);
    }
}
