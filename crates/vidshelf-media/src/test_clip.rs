// crates/vidshelf-media/src/test_clip.rs
//
// Tiny MPEG-4 Part 2 clips for tests. Every ffmpeg build ships the native
// mpeg4 encoder, so no fixtures are checked in.

use std::path::Path;

use anyhow::{anyhow, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec::{self, Id as CodecId};
use ffmpeg::encoder;
use ffmpeg::format::{output as open_output, Pixel};
use ffmpeg::util::frame::video::Video as RawFrame;
use ffmpeg::util::rational::Rational;
use ffmpeg::Packet;

pub const WIDTH: u32  = 64;
pub const HEIGHT: u32 = 48;

/// Write `frames` solid-colour frames at `fps` to `path` (.mp4).
pub fn write_clip(path: &Path, frames: i64, fps: i32) -> Result<()> {
    let _ = ffmpeg::init();
    let codec = encoder::find(CodecId::MPEG4).ok_or_else(|| anyhow!("mpeg4 encoder missing"))?;
    let tb = Rational::new(1, fps);

    let mut octx = open_output(path)?;
    let mut ost = octx.add_stream(codec)?;
    ost.set_time_base(tb);

    let mut enc = codec::context::Context::new_with_codec(codec).encoder().video()?;
    enc.set_width(WIDTH);
    enc.set_height(HEIGHT);
    enc.set_format(Pixel::YUV420P);
    enc.set_time_base(tb);
    enc.set_frame_rate(Some(Rational::new(fps, 1)));
    let mut enc = enc.open_as_with(codec, ffmpeg::Dictionary::new())?;

    // encoder::Video has no AsPtr<AVCodecParameters>; copy through FFI.
    unsafe {
        let ret = ffmpeg::ffi::avcodec_parameters_from_context(
            (**(*octx.as_mut_ptr()).streams.add(0)).codecpar,
            enc.as_ptr() as *mut ffmpeg::ffi::AVCodecContext,
        );
        if ret < 0 {
            return Err(anyhow!("avcodec_parameters_from_context failed: {ret}"));
        }
    }

    octx.write_header()?;
    let ost_tb = octx.stream(0).ok_or_else(|| anyhow!("stream 0 missing"))?.time_base();

    let mut frame = RawFrame::new(Pixel::YUV420P, WIDTH, HEIGHT);
    for i in 0..frames {
        frame.data_mut(0).fill((16 + i * 20).min(235) as u8);
        frame.data_mut(1).fill(128);
        frame.data_mut(2).fill(128);
        frame.set_pts(Some(i));
        enc.send_frame(&frame)?;
        drain_packets(&mut enc, &mut octx, tb, ost_tb)?;
    }
    enc.send_eof()?;
    drain_packets(&mut enc, &mut octx, tb, ost_tb)?;
    octx.write_trailer()?;
    Ok(())
}

fn drain_packets(
    enc:    &mut encoder::video::Video,
    octx:   &mut ffmpeg::format::context::Output,
    tb:     Rational,
    ost_tb: Rational,
) -> Result<()> {
    let mut pkt = Packet::empty();
    while enc.receive_packet(&mut pkt).is_ok() {
        pkt.set_stream(0);
        pkt.rescale_ts(tb, ost_tb);
        pkt.write_interleaved(octx)?;
    }
    Ok(())
}
