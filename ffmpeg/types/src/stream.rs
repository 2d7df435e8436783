/*!
    Stream information types.
*/

use std::time::Duration;

use crate::Rational;

/**
    Information about the selected video stream.
*/
#[derive(Clone, Debug)]
pub struct VideoStreamInfo {
    /// Index of the stream in the container.
    pub index: usize,
    /// Frame width in pixels, as probed.
    pub width: u32,
    /// Frame height in pixels, as probed.
    pub height: u32,
    /// Frame rate (may be approximate or unavailable).
    pub frame_rate: Option<Rational>,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// FFmpeg's short name for the codec.
    pub codec_name: String,
}

impl VideoStreamInfo {
    /**
        Returns the frame rate as fps, if available.
    */
    pub fn fps(&self) -> Option<f64> {
        self.frame_rate.map(|r| r.to_f64())
    }
}

/**
    Container-level information about a media source.
*/
#[derive(Clone, Debug, Default)]
pub struct MediaInfo {
    /// Short name of the container format.
    pub format_name: String,
    /// Total duration of the media (may be unavailable).
    pub duration: Option<Duration>,
    /// Number of streams of any type.
    pub stream_count: usize,
}
