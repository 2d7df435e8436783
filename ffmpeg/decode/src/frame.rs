/*!
    Decoded video frame.
*/

use std::time::Duration;

use ffmpeg_next::{format::Pixel, util::frame::video::Video as VideoFrameFFmpeg};

use ffmpeg_types::{Pts, Rational};

/**
    A picture as the decoder produced it.

    The frame keeps the decoder's native pixel format and padded planes, so
    it can go to the scaler without an intermediate copy. Its buffers are
    reference counted by FFmpeg and released on drop.
*/
pub struct DecodedFrame {
    frame: VideoFrameFFmpeg,
    time_base: Rational,
}

impl DecodedFrame {
    pub(crate) fn new(frame: VideoFrameFFmpeg, time_base: Rational) -> Self {
        Self { frame, time_base }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// FFmpeg's pixel format of the decoded planes.
    pub fn format(&self) -> Pixel {
        self.frame.format()
    }

    pub fn pts(&self) -> Option<Pts> {
        self.frame.pts().map(Pts)
    }

    /**
        Presentation time of the frame, when it has a usable timestamp.
    */
    pub fn timestamp(&self) -> Option<Duration> {
        self.pts()?.to_duration(self.time_base)
    }

    /// The underlying FFmpeg frame.
    pub fn as_ffmpeg(&self) -> &VideoFrameFFmpeg {
        &self.frame
    }
}

impl std::fmt::Debug for DecodedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedFrame")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .field("pts", &self.pts())
            .finish()
    }
}
