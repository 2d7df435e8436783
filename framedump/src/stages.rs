/*!
    Seams between the pipeline and the FFmpeg crates.

    The reader and exporter only see these traits, so tests can drive them
    with in-memory doubles instead of real media.
*/

use ffmpeg_decode::{DecodedFrame, SendStatus, VideoDecoder};
use ffmpeg_source::Source;
use ffmpeg_transform::VideoTransform;
use ffmpeg_types::{Error, Packet, PixelFormat, Result};
use image::RgbImage;

/// Produces the compressed packets of the selected stream, in container order.
pub trait PacketSource {
    fn next_packet(&mut self) -> Result<Option<Packet>>;
}

/// Step-wise decoder: submit packets, then collect whatever frames are ready.
pub trait FrameDecoder {
    type Frame;

    fn send_packet(&mut self, packet: &Packet) -> Result<SendStatus>;
    fn send_eof(&mut self) -> Result<()>;
    /// `Ok(None)` means no frame is ready yet, or the decoder is drained.
    fn receive_frame(&mut self) -> Result<Option<Self::Frame>>;
}

/// Converts a decoded frame to RGB24, into a buffer the converter owns.
pub trait FrameConverter<F> {
    fn convert(&mut self, frame: &F) -> Result<&RgbImage>;
}

impl PacketSource for Source {
    fn next_packet(&mut self) -> Result<Option<Packet>> {
        Source::next_packet(self)
    }
}

impl FrameDecoder for VideoDecoder {
    type Frame = DecodedFrame;

    fn send_packet(&mut self, packet: &Packet) -> Result<SendStatus> {
        VideoDecoder::send_packet(self, packet)
    }

    fn send_eof(&mut self) -> Result<()> {
        VideoDecoder::send_eof(self)
    }

    fn receive_frame(&mut self) -> Result<Option<DecodedFrame>> {
        VideoDecoder::receive_frame(self)
    }
}

/**
    RGB24 converter with a single picture buffer, allocated once and
    overwritten by every conversion.
*/
#[derive(Debug)]
pub struct RgbConverter {
    transform: VideoTransform,
    image: RgbImage,
}

impl RgbConverter {
    /**
        Wrap a transform whose target format is RGB24.
    */
    pub fn new(transform: VideoTransform) -> Result<Self> {
        let config = transform.config();
        if config.format != PixelFormat::Rgb24 {
            return Err(Error::unsupported_format(format!(
                "expected an Rgb24 target, got {:?}",
                config.format
            )));
        }

        let image = RgbImage::new(config.width, config.height);
        Ok(Self { transform, image })
    }
}

impl FrameConverter<DecodedFrame> for RgbConverter {
    fn convert(&mut self, frame: &DecodedFrame) -> Result<&RgbImage> {
        self.transform.convert_into(frame.as_ffmpeg(), &mut self.image)?;
        Ok(&self.image)
    }
}
