/*!
    Encoded packet type.
*/

use crate::{MediaDuration, Pts, Rational};

/**
    A unit of compressed data belonging to one stream, in container order.
*/
#[derive(Clone, Debug)]
pub struct Packet {
    /// Compressed payload.
    pub data: Vec<u8>,
    /// Presentation timestamp.
    pub pts: Option<Pts>,
    /// Decode timestamp.
    pub dts: Option<Pts>,
    /// Packet duration in time base units.
    pub duration: MediaDuration,
    /// Time base of the owning stream.
    pub time_base: Rational,
    /// True if the packet starts a keyframe.
    pub is_keyframe: bool,
    /// Index of the owning stream in the container.
    pub stream_index: usize,
}

impl Packet {
    pub fn new(
        data: Vec<u8>,
        pts: Option<Pts>,
        dts: Option<Pts>,
        duration: MediaDuration,
        time_base: Rational,
        is_keyframe: bool,
        stream_index: usize,
    ) -> Self {
        Self {
            data,
            pts,
            dts,
            duration,
            time_base,
            is_keyframe,
            stream_index,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
