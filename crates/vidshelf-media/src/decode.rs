// crates/vidshelf-media/src/decode.rs
//
// LiveDecoder: stateful per-file decoder that streams RGBA frames forward
// from an initial seek point. Seeking backwards means opening a new one.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};
use ffmpeg::util::frame::video::Video as RawFrame;

use crate::probe::container_duration_secs;

/// One scaled RGBA frame.
pub struct DecodedFrame {
    pub data:        Vec<u8>,
    pub width:       u32,
    pub height:      u32,
    pub position_ms: u64,
}

pub struct LiveDecoder {
    pub path:    PathBuf,
    ictx:        ffmpeg::format::context::Input,
    decoder:     ffmpeg::decoder::video::Video,
    video_idx:   usize,
    last_pts:    i64,
    tb_num:      i32,
    tb_den:      i32,
    out_w:       u32,
    out_h:       u32,
    scaler:      SwsContext,
    duration_ms: u64,
    /// Demuxer exhausted and EOF sent to the decoder.
    drained:     bool,
}

impl LiveDecoder {
    /// Open `path` positioned at the keyframe at or before `start_ms`.
    /// Frames wider than `max_width` are scaled down (0 = native size).
    pub fn open(path: &Path, start_ms: u64, max_width: u32) -> Result<Self> {
        let mut ictx = input(path).with_context(|| format!("open {}", path.display()))?;
        let duration_ms = container_duration_secs(&ictx)
            .map(|s| (s * 1000.0).round() as u64)
            .unwrap_or(0);

        let (video_idx, tb_num, tb_den) = {
            let stream = ictx.streams().best(Type::Video)
                .ok_or_else(|| anyhow!("no video stream in {}", path.display()))?;
            let tb = stream.time_base();
            (stream.index(), tb.numerator(), tb.denominator().max(1))
        };

        if start_ms > 0 {
            // Container-level seek: timestamps are in AV_TIME_BASE units.
            let ts = start_ms as i64 * (ffmpeg::ffi::AV_TIME_BASE as i64 / 1000);
            if let Err(e) = ictx.seek(ts, ..=ts) {
                log::debug!("[decode] seek to {start_ms}ms failed, decoding from start: {e}");
            }
        }

        // Second context for decoder params (avoids borrow conflict with ictx).
        let ictx2   = input(path)?;
        let stream2 = ictx2.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
        let decoder = dec_ctx.decoder().video()?;

        let (out_w, out_h) = fit_width(decoder.width(), decoder.height(), max_width);
        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        )?;

        Ok(Self {
            path: path.to_path_buf(), ictx, decoder, video_idx,
            last_pts: 0, tb_num, tb_den, out_w, out_h, scaler, duration_ms,
            drained: false,
        })
    }

    /// 0 when the container doesn't report one.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn pts_to_ms(&self, pts: i64) -> u64 {
        let ms = pts as f64 * self.tb_num as f64 * 1000.0 / self.tb_den as f64;
        ms.max(0.0) as u64
    }

    fn ms_to_pts(&self, ms: u64) -> i64 {
        (ms as f64 * self.tb_den as f64 / (self.tb_num.max(1) as f64 * 1000.0)) as i64
    }

    /// Next frame in presentation order. `None` at end of file.
    pub fn next_frame(&mut self) -> Option<DecodedFrame> {
        self.decode_until(None)
    }

    /// Decode forward to the first frame at or past `target_ms`. Frames before
    /// it are decoded but never scaled.
    pub fn advance_to(&mut self, target_ms: u64) -> Option<DecodedFrame> {
        self.decode_until(Some(self.ms_to_pts(target_ms)))
    }

    fn decode_until(&mut self, target_pts: Option<i64>) -> Option<DecodedFrame> {
        let mut decoded = RawFrame::empty();
        loop {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(self.last_pts + 1);
                self.last_pts = pts;
                if target_pts.is_some_and(|t| pts < t) {
                    continue;
                }
                let data = scale_rgba(&mut self.scaler, &decoded, self.out_w, self.out_h)?;
                return Some(DecodedFrame {
                    data,
                    width:       self.out_w,
                    height:      self.out_h,
                    position_ms: self.pts_to_ms(pts),
                });
            }
            if self.drained {
                return None;
            }

            let mut fed = false;
            for (stream, packet) in self.ictx.packets().flatten() {
                if stream.index() != self.video_idx { continue; }
                if self.decoder.send_packet(&packet).is_ok() {
                    fed = true;
                    break;
                }
            }
            if !fed {
                // Flush the frames the codec is still holding.
                let _ = self.decoder.send_eof();
                self.drained = true;
            }
        }
    }
}

fn scale_rgba(scaler: &mut SwsContext, frame: &RawFrame, w: u32, h: u32) -> Option<Vec<u8>> {
    let mut out = RawFrame::empty();
    if let Err(e) = scaler.run(frame, &mut out) {
        log::warn!("[decode] scale failed: {e}");
        return None;
    }
    let stride    = out.stride(0);
    let raw       = out.data(0);
    let row_bytes = w as usize * 4;
    let mut data  = Vec::with_capacity(row_bytes * h as usize);
    for row in 0..h as usize {
        let s = row * stride;
        data.extend_from_slice(&raw[s..s + row_bytes]);
    }
    Some(data)
}

/// Output size for a `w`×`h` source capped at `max_w` wide, aspect preserved.
fn fit_width(w: u32, h: u32, max_w: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (2, 2);
    }
    if max_w == 0 || w <= max_w {
        return (w.max(2), h.max(2));
    }
    let out_w = max_w.max(2) & !1;
    let out_h = ((h as u64 * out_w as u64 / w as u64) as u32).max(2) & !1;
    (out_w, out_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sources_keep_native_size() {
        assert_eq!(fit_width(640, 360, 1280), (640, 360));
        assert_eq!(fit_width(640, 360, 0), (640, 360));
    }

    #[test]
    fn wide_sources_scale_down_evenly() {
        assert_eq!(fit_width(3840, 2160, 1280), (1280, 720));
        let (w, h) = fit_width(1921, 1081, 1001);
        assert_eq!(w, 1000);
        assert_eq!(h % 2, 0);
    }

    #[test]
    fn degenerate_source_gets_minimum_size() {
        assert_eq!(fit_width(0, 0, 1280), (2, 2));
    }

    #[test]
    fn open_missing_file_fails() {
        let _ = ffmpeg::init();
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveDecoder::open(&dir.path().join("none.mp4"), 0, 1280).is_err());
    }

    #[test]
    fn advance_to_lands_on_or_after_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        crate::test_clip::write_clip(&path, 10, 10).unwrap();

        let mut dec = LiveDecoder::open(&path, 500, 0).unwrap();
        let frame = dec.advance_to(500).unwrap();
        assert!(frame.position_ms >= 500, "landed at {}", frame.position_ms);
        assert_eq!((frame.width, frame.height), (crate::test_clip::WIDTH, crate::test_clip::HEIGHT));
        assert_eq!(frame.data.len(), (frame.width * frame.height * 4) as usize);
    }

    #[test]
    fn next_frame_runs_out_at_end_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        crate::test_clip::write_clip(&path, 6, 10).unwrap();

        let mut dec = LiveDecoder::open(&path, 0, 0).unwrap();
        let mut count = 0;
        while dec.next_frame().is_some() {
            count += 1;
            assert!(count <= 6);
        }
        assert_eq!(count, 6);
        assert!(dec.next_frame().is_none());
    }
}
