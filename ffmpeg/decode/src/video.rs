/*!
    Video decoder implementation.
*/

use ffmpeg_next::{
    codec::{self, decoder::Video as VideoDecoderFFmpeg},
    ffi,
    format::Pixel,
    util::frame::video::Video as VideoFrameFFmpeg,
};
use log::trace;

use ffmpeg_source::CodecConfig;
use ffmpeg_types::{Error, Packet, Rational, Result};

use crate::DecodedFrame;

/**
    Outcome of submitting a packet to the decoder.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    /// The decoder took the packet.
    Accepted,
    /// The decoder's input is full. Drain frames, then send the same packet again.
    Full,
}

/**
    Video decoder.

    Wraps an opened FFmpeg decoder for one stream. Frames are handed out in
    the decoder's native pixel format, without copying their planes.
*/
pub struct VideoDecoder {
    decoder: VideoDecoderFFmpeg,
    time_base: Rational,
    codec_name: &'static str,
}

impl VideoDecoder {
    /**
        Create a new video decoder from codec configuration.

        Fails with [`Error::UnsupportedCodec`] if FFmpeg has no decoder for
        the codec, [`Error::DecoderInit`] if the stream parameters cannot be
        copied into a decoder context, and [`Error::DecoderOpen`] if the
        decoder refuses to open.

        # Arguments

        * `codec_config` - Codec configuration from the source
        * `time_base` - Time base for the video stream
    */
    pub fn new(codec_config: CodecConfig, time_base: Rational) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::DecoderInit(e.to_string()))?;

        let parameters = codec_config.into_parameters();
        let codec_id = parameters.id();

        let codec = ffmpeg_next::decoder::find(codec_id)
            .ok_or_else(|| Error::UnsupportedCodec(codec_id.name().to_string()))?;

        let decoder_ctx = codec::context::Context::from_parameters(parameters)
            .map_err(|e| Error::DecoderInit(e.to_string()))?;

        let decoder = decoder_ctx
            .decoder()
            .open_as(codec)
            .and_then(|opened| opened.video())
            .map_err(|e| Error::DecoderOpen(format!("{}: {}", codec_id.name(), e)))?;

        Ok(Self {
            decoder,
            time_base,
            codec_name: codec_id.name(),
        })
    }

    /**
        FFmpeg's short name for the codec being decoded.
    */
    pub fn codec_name(&self) -> &'static str {
        self.codec_name
    }

    /**
        Coded frame width, as configured from the stream.
    */
    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    /**
        Coded frame height, as configured from the stream.
    */
    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    /**
        Output pixel format, as configured from the stream.

        May be [`Pixel::None`] for codecs that only learn it from the first
        frame.
    */
    pub fn format(&self) -> Pixel {
        self.decoder.format()
    }

    /**
        Submit one packet.

        EAGAIN is not an error here: it means frames must be received before
        the decoder accepts more input, and is reported as [`SendStatus::Full`].
    */
    pub fn send_packet(&mut self, packet: &Packet) -> Result<SendStatus> {
        // An empty packet would put the decoder into draining mode
        if packet.is_empty() {
            trace!("skipping empty packet");
            return Ok(SendStatus::Accepted);
        }

        let mut ffmpeg_pkt = ffmpeg_next::Packet::copy(&packet.data);
        ffmpeg_pkt.set_pts(packet.pts.map(|pts| pts.0));
        ffmpeg_pkt.set_dts(packet.dts.map(|dts| dts.0));
        ffmpeg_pkt.set_duration(packet.duration.0);
        if packet.is_keyframe {
            ffmpeg_pkt.set_flags(ffmpeg_next::packet::Flags::KEY);
        }

        match self.decoder.send_packet(&ffmpeg_pkt) {
            Ok(()) => Ok(SendStatus::Accepted),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                trace!("decoder input full");
                Ok(SendStatus::Full)
            }
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }

    /**
        Signal end of stream so the decoder releases the frames it buffered.
    */
    pub fn send_eof(&mut self) -> Result<()> {
        match self.decoder.send_eof() {
            Ok(()) => Ok(()),
            // Already draining
            Err(ffmpeg_next::Error::Eof) => Ok(()),
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }

    /**
        Receive the next decoded frame, if one is available.

        Returns `Ok(None)` when the decoder needs more input, or when it has
        been fully drained after [`send_eof`](Self::send_eof).
    */
    pub fn receive_frame(&mut self) -> Result<Option<DecodedFrame>> {
        let mut frame = VideoFrameFFmpeg::empty();
        match self.decoder.receive_frame(&mut frame) {
            Ok(()) => {
                let frame = DecodedFrame::new(frame, self.time_base);
                trace!(
                    "decoded {}x{} {:?} frame at {:?}",
                    frame.width(),
                    frame.height(),
                    frame.format(),
                    frame.timestamp()
                );
                Ok(Some(frame))
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => Ok(None),
            Err(ffmpeg_next::Error::Eof) => Ok(None),
            Err(e) => Err(Error::codec(e.to_string())),
        }
    }
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("codec", &self.codec_name)
            .field("time_base", &self.time_base)
            .finish_non_exhaustive()
    }
}
