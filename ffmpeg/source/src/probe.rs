/*!
    Probing functionality for extracting media metadata.
*/

use std::time::Duration;

use ffmpeg_next::{Stream, format::context::Input as InputContext};

use ffmpeg_types::{MediaInfo, Pts, VideoStreamInfo};

use crate::convert::rational_from_ffmpeg;

/**
    Extract MediaInfo from an already-opened input context.

    Falls back to the duration of `video` when the container has none.
*/
pub(crate) fn extract_media_info(input_ctx: &InputContext, video: &Stream<'_>) -> MediaInfo {
    MediaInfo {
        format_name: input_ctx.format().name().to_string(),
        duration: container_duration(input_ctx).or_else(|| stream_duration(video)),
        stream_count: input_ctx.nb_streams() as usize,
    }
}

/**
    Extract video stream info from one stream of the input context.
*/
pub(crate) fn extract_video_stream_info(stream: &Stream<'_>) -> VideoStreamInfo {
    // An unopened decoder context exposes the probed dimensions
    let (width, height) = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .and_then(|ctx| ctx.decoder().video())
        .map(|decoder| (decoder.width(), decoder.height()))
        .unwrap_or_default();

    let frame_rate = if stream.avg_frame_rate().numerator() != 0 {
        Some(rational_from_ffmpeg(stream.avg_frame_rate()))
    } else if stream.rate().numerator() != 0 {
        Some(rational_from_ffmpeg(stream.rate()))
    } else {
        None
    };

    VideoStreamInfo {
        index: stream.index(),
        width,
        height,
        frame_rate,
        time_base: rational_from_ffmpeg(stream.time_base()),
        codec_name: stream.parameters().id().name().to_string(),
    }
}

fn container_duration(input_ctx: &InputContext) -> Option<Duration> {
    u64::try_from(input_ctx.duration())
        .ok()
        .filter(|&micros| micros > 0)
        .map(Duration::from_micros)
}

/// Container-supplied values; anything out of range gives `None`.
fn stream_duration(stream: &Stream<'_>) -> Option<Duration> {
    if stream.duration() <= 0 {
        return None;
    }
    Pts(stream.duration()).to_duration(rational_from_ffmpeg(stream.time_base()))
}
