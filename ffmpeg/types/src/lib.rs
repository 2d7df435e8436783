/*!
    Shared types for the framedump ffmpeg crates.

    This crate defines the vocabulary that crosses crate boundaries: pixel
    formats, timestamps, packets, stream descriptions and the common error
    type. It has no dependency on FFmpeg, so consumers can name these types
    without pulling in FFmpeg bindings.
*/

mod error;
mod format;
mod packet;
mod stream;
mod time;

pub use error::{Error, ParseError, Result};
pub use format::{PixelFormat, PlaneLayout};
pub use packet::Packet;
pub use stream::{MediaInfo, VideoStreamInfo};
pub use time::{MediaDuration, Pts, Rational};
