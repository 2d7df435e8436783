/*!
    Media decoding for the framedump ffmpeg crates.

    This crate turns encoded packets into raw frames. The decoder is driven
    one step at a time (send a packet, receive a frame) so callers can model
    codec buffering explicitly.
*/

mod frame;
mod video;

pub use frame::DecodedFrame;
pub use video::{SendStatus, VideoDecoder};
