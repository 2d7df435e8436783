/*!
    Video frame conversion for the framedump ffmpeg crates.

    This crate converts decoded frames between pixel formats and sizes using
    FFmpeg's software scaler.
*/

mod video;

pub use video::{ScalingAlgorithm, VideoTransform, VideoTransformConfig};
