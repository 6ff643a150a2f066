// crates/vidshelf-media/src/probe.rs
//
// In-process FFmpeg probing. Only duration is needed: the picker uses it to
// fill in `VideoRecord::duration` when the dialog itself can't tell us.

use std::path::Path;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::input;
use ffmpeg::media::Type;

/// Duration of the file at `path` in seconds, or `None` when it can't be
/// opened or reports no usable duration.
pub fn probe_duration(path: &Path) -> Option<f64> {
    match input(path) {
        Ok(ctx) => {
            let dur = container_duration_secs(&ctx);
            match dur {
                Some(d) => log::debug!("[media] duration {d:.2}s ← {}", path.display()),
                None    => log::warn!("[media] duration unknown ← {}", path.display()),
            }
            dur
        }
        Err(e) => {
            log::warn!("[media] probe_duration open failed for {}: {e}", path.display());
            None
        }
    }
}

/// Container duration, falling back to the best video (then audio) stream.
pub(crate) fn container_duration_secs(ctx: &ffmpeg::format::context::Input) -> Option<f64> {
    let dur = ctx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    if dur > 0.0 {
        return Some(dur);
    }
    let stream = ctx.streams().best(Type::Video)
        .or_else(|| ctx.streams().best(Type::Audio))?;
    let tb = stream.time_base();
    if tb.denominator() == 0 {
        return None;
    }
    let d = stream.duration() as f64 * tb.numerator() as f64 / tb.denominator() as f64;
    (d > 0.0).then_some(d)
}
