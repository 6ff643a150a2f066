// crates/vidshelf-media/src/lib.rs
//
// No egui dependency: talks to vidshelf-ui through PlayerEvent channels and
// the VideoSurface trait only.

pub mod decode;
pub mod probe;
pub mod worker;

#[cfg(test)]
mod test_clip;

// Re-export the main public API so vidshelf-ui imports are simple.
pub use probe::probe_duration;
pub use vidshelf_core::media_types::{PlayerEvent, VideoFrame};
pub use worker::{PlayerWorker, Waker, WorkerOptions};
