// crates/vidshelf-core/src/commands.rs
//
// Every user action in VidShelf is expressed as an AppCommand.
// Panels emit these; Session::apply processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in session.rs.

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // ── Library ──────────────────────────────────────────────────────────────
    /// Run the import pipeline (permission → picker → copy → persist).
    ImportVideo,
    /// Ask before deleting the record with this id.
    RequestDelete(String),
    /// Ask before wiping the whole library.
    RequestClearAll,
    /// The user accepted the pending confirmation.
    ConfirmPending,
    /// The user dismissed the pending confirmation.
    CancelPending,

    // ── Player ───────────────────────────────────────────────────────────────
    OpenPlayer(String),
    ClosePlayer,
    TogglePlayPause,
    /// Relative seek in milliseconds (negative = back).
    SeekBy(i64),
    /// Absolute seek as a fraction of the duration (slider release).
    SeekToFraction(f64),
    /// A tap on the video surface at `x` within a surface `width` wide.
    Tap { x: f32, width: f32 },

    // ── View / UI ────────────────────────────────────────────────────────────
    DismissNotice,
}

/// A destructive action waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirm {
    DeleteOne { id: String, name: String },
    ClearAll,
}

impl PendingConfirm {
    pub fn title(&self) -> &'static str {
        match self {
            PendingConfirm::DeleteOne { .. } => "Delete video",
            PendingConfirm::ClearAll         => "Delete all videos",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingConfirm::DeleteOne { name, .. } => format!("Delete \"{name}\"?"),
            PendingConfirm::ClearAll => "Delete every video? This cannot be undone.".into(),
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            PendingConfirm::DeleteOne { .. } => "Delete",
            PendingConfirm::ClearAll         => "Delete all",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A one-off message for the user (import result, permission problem).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind:  NoticeKind,
    pub title: String,
    pub body:  String,
}

impl Notice {
    pub fn info(title: &str, body: &str) -> Self {
        Self { kind: NoticeKind::Info, title: title.into(), body: body.into() }
    }

    pub fn error(title: &str, body: &str) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), body: body.into() }
    }
}
