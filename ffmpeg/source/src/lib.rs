/*!
    Media source and demuxing for the framedump ffmpeg crates.

    This crate handles the input side of the pipeline. It opens a media file,
    probes its streams, selects the first video stream and produces that
    stream's encoded packets for a decoder.
*/

mod codec_config;
pub mod convert;
mod probe;
mod source;

pub use codec_config::CodecConfig;
pub use source::Source;
