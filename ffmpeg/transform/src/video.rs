/*!
    Video frame transformation.
*/

use std::str::FromStr;

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};
use log::debug;

use ffmpeg_source::convert::pixel_format_to_ffmpeg;
use ffmpeg_types::{Error, ParseError, PixelFormat, Result};

/**
    Scaling algorithm for video resizing.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingAlgorithm {
    /// Nearest neighbor - fastest, lowest quality.
    Nearest,
    /// Bilinear interpolation - fast, acceptable quality.
    #[default]
    Bilinear,
    /// Bicubic interpolation - moderate speed, good quality.
    Bicubic,
    /// Lanczos resampling - slowest, highest quality.
    Lanczos,
}

impl ScalingAlgorithm {
    fn to_ffmpeg_flags(self) -> ScalerFlags {
        match self {
            Self::Nearest => ScalerFlags::POINT,
            Self::Bilinear => ScalerFlags::BILINEAR,
            Self::Bicubic => ScalerFlags::BICUBIC,
            Self::Lanczos => ScalerFlags::LANCZOS,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::Lanczos => "lanczos",
        }
    }
}

impl std::fmt::Display for ScalingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingAlgorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "bicubic" => Ok(Self::Bicubic),
            "lanczos" => Ok(Self::Lanczos),
            _ => Err(ParseError {
                kind: "scaling algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/**
    Target of a video transformation.
*/
#[derive(Clone, Debug)]
pub struct VideoTransformConfig {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Target pixel format.
    pub format: PixelFormat,
    /// Scaling algorithm to use.
    pub algorithm: ScalingAlgorithm,
}

impl VideoTransformConfig {
    /**
        Create a new video transform configuration.
    */
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Create configuration for packed RGB24 output.
    */
    pub fn to_rgb24(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Rgb24)
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/**
    Video frame transformer.

    Holds one scaler context and one output frame, created for a fixed input
    geometry and format. Frames that do not match that input are rejected
    rather than triggering a new context, so every converted frame of a run
    shares one setup.
*/
pub struct VideoTransform {
    config: VideoTransformConfig,
    context: ScalerContext,
    output: VideoFrameFFmpeg,
    src_width: u32,
    src_height: u32,
    src_format: Pixel,
}

impl VideoTransform {
    /**
        Create a transformer for frames of the given size and FFmpeg format.

        Any input format the software scaler supports is accepted. Fails with
        [`Error::UnsupportedFormat`] if the scaler cannot convert between the
        two formats, or either size is empty.
    */
    pub fn new(
        src_width: u32,
        src_height: u32,
        src_format: Pixel,
        config: VideoTransformConfig,
    ) -> Result<Self> {
        if src_width == 0 || src_height == 0 || config.width == 0 || config.height == 0 {
            return Err(Error::unsupported_format(format!(
                "cannot scale {}x{} to {}x{}",
                src_width, src_height, config.width, config.height
            )));
        }

        let dst_format = pixel_format_to_ffmpeg(config.format);
        let context = ScalerContext::get(
            src_format,
            src_width,
            src_height,
            dst_format,
            config.width,
            config.height,
            config.algorithm.to_ffmpeg_flags(),
        )
        .map_err(|e| {
            Error::unsupported_format(format!(
                "cannot convert {:?} to {:?}: {}",
                src_format, config.format, e
            ))
        })?;

        debug!(
            "scaler {:?} {}x{} -> {:?} {}x{} ({})",
            src_format,
            src_width,
            src_height,
            config.format,
            config.width,
            config.height,
            config.algorithm
        );

        Ok(Self {
            output: VideoFrameFFmpeg::new(dst_format, config.width, config.height),
            config,
            context,
            src_width,
            src_height,
            src_format,
        })
    }

    /**
        Get the target configuration.
    */
    pub fn config(&self) -> &VideoTransformConfig {
        &self.config
    }

    /**
        Size in bytes of one tightly packed output picture.
    */
    pub fn output_size(&self) -> usize {
        self.config.format.frame_size(self.config.width, self.config.height)
    }

    /**
        Convert `frame` into `out`, tightly packed with no row padding.

        `out` must be exactly [`output_size`](Self::output_size) bytes.
        The scaler reads the frame's planes in place and writes into an
        output frame owned by the transformer.
    */
    pub fn convert_into(&mut self, frame: &VideoFrameFFmpeg, out: &mut [u8]) -> Result<()> {
        if frame.width() != self.src_width
            || frame.height() != self.src_height
            || frame.format() != self.src_format
        {
            return Err(Error::invalid_data(format!(
                "expected {:?} {}x{} input, got {:?} {}x{}",
                self.src_format,
                self.src_width,
                self.src_height,
                frame.format(),
                frame.width(),
                frame.height()
            )));
        }
        if out.len() != self.output_size() {
            return Err(Error::invalid_data(format!(
                "output buffer is {} bytes, expected {}",
                out.len(),
                self.output_size()
            )));
        }

        self.context
            .run(frame, &mut self.output)
            .map_err(|e| Error::codec(format!("scaling failed: {}", e)))?;

        pack_planes(&self.output, self.config.format, out)
    }
}

/**
    Copy the planes of an FFmpeg frame into `out`, dropping the row padding
    FFmpeg reports through the plane strides.
*/
fn pack_planes(frame: &VideoFrameFFmpeg, format: PixelFormat, out: &mut [u8]) -> Result<()> {
    let mut offset = 0;

    for (index, plane) in format.plane_layouts(frame.width(), frame.height()).iter().enumerate() {
        let stride = frame.stride(index);
        let data = frame.data(index);

        for row in 0..plane.rows {
            let row_start = row * stride;
            let src = data
                .get(row_start..row_start + plane.row_bytes)
                .ok_or_else(|| Error::invalid_data(format!("scaler output plane {index} too small")))?;
            out[offset..offset + plane.row_bytes].copy_from_slice(src);
            offset += plane.row_bytes;
        }
    }

    Ok(())
}

impl std::fmt::Debug for VideoTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTransform")
            .field("config", &self.config)
            .field("src_width", &self.src_width)
            .field("src_height", &self.src_height)
            .field("src_format", &self.src_format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An FFmpeg frame whose visible bytes are `fill(plane, x, y)`, padding left untouched.
    fn frame(format: Pixel, width: u32, height: u32, fill: impl Fn(usize, usize, usize) -> u8) -> VideoFrameFFmpeg {
        let samples_per_pixel = if format == Pixel::RGB24 { 3 } else { 1 };
        let mut frame = VideoFrameFFmpeg::new(format, width, height);
        for plane in 0..frame.planes() {
            let row_bytes = frame.plane_width(plane) as usize * samples_per_pixel;
            let rows = frame.plane_height(plane) as usize;
            let stride = frame.stride(plane);
            let data = frame.data_mut(plane);
            for y in 0..rows {
                for x in 0..row_bytes {
                    data[y * stride + x] = fill(plane, x, y);
                }
            }
        }
        frame
    }

    fn rgb24(width: u32, height: u32) -> VideoTransformConfig {
        VideoTransformConfig::to_rgb24(width, height)
    }

    #[test]
    fn scaling_algorithm_parses() {
        assert_eq!("bilinear".parse::<ScalingAlgorithm>(), Ok(ScalingAlgorithm::Bilinear));
        assert_eq!("Lanczos".parse::<ScalingAlgorithm>(), Ok(ScalingAlgorithm::Lanczos));
        assert_eq!("point".parse::<ScalingAlgorithm>(), Ok(ScalingAlgorithm::Nearest));
        assert!("trilinear".parse::<ScalingAlgorithm>().is_err());
        assert_eq!(ScalingAlgorithm::Bicubic.to_string(), "bicubic");
    }

    #[test]
    fn rgb24_identity_is_lossless_and_unpadded() {
        // 7 * 3 = 21 byte rows, so FFmpeg pads every row of both frames
        let input = frame(Pixel::RGB24, 7, 5, |_, x, y| (x * 7 + y * 31) as u8);
        let mut transform = VideoTransform::new(7, 5, Pixel::RGB24, rgb24(7, 5)).unwrap();
        let mut out = vec![0; transform.output_size()];

        transform.convert_into(&input, &mut out).unwrap();

        assert_eq!(out.len(), 7 * 5 * 3);
        let expected: Vec<u8> = (0..5)
            .flat_map(|y| (0..21).map(move |x| (x * 7 + y * 31) as u8))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn grey_yuv_formats_become_grey_rgb() {
        for format in [Pixel::YUV420P, Pixel::YUV422P, Pixel::YUV444P, Pixel::YUV411P, Pixel::YUVJ420P] {
            // Odd sizes exercise chroma rounding and stride padding
            let input = frame(format, 5, 3, |plane, _, _| if plane == 0 { 150 } else { 128 });
            let mut transform = VideoTransform::new(5, 3, format, rgb24(5, 3)).unwrap();
            let mut out = vec![0; 5 * 3 * 3];

            transform.convert_into(&input, &mut out).unwrap();

            for pixel in out.chunks_exact(3) {
                let max = *pixel.iter().max().unwrap() as i32;
                let min = *pixel.iter().min().unwrap() as i32;
                assert!(max - min <= 3, "{format:?}: {pixel:?}");
                assert!(max > 100, "{format:?}: {pixel:?}");
            }
        }
    }

    #[test]
    fn output_frame_is_reused() {
        let mut transform = VideoTransform::new(4, 4, Pixel::YUV420P, rgb24(4, 4)).unwrap();
        let mut out = vec![0; transform.output_size()];

        transform
            .convert_into(&frame(Pixel::YUV420P, 4, 4, |p, _, _| if p == 0 { 16 } else { 128 }), &mut out)
            .unwrap();
        let first_plane = transform.output.data(0).as_ptr();
        let dark = out.clone();
        transform
            .convert_into(&frame(Pixel::YUV420P, 4, 4, |p, _, _| if p == 0 { 235 } else { 128 }), &mut out)
            .unwrap();

        assert_eq!(transform.output.data(0).as_ptr(), first_plane);
        assert!(out.iter().zip(&dark).all(|(bright, dark)| bright > dark));
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let mut transform = VideoTransform::new(
            8,
            8,
            Pixel::YUV420P,
            rgb24(8, 8).with_algorithm(ScalingAlgorithm::Nearest),
        )
        .unwrap();
        let mut out = vec![0; transform.output_size()];

        let other_size = frame(Pixel::YUV420P, 4, 4, |_, _, _| 0);
        assert!(matches!(
            transform.convert_into(&other_size, &mut out),
            Err(Error::InvalidData(_))
        ));

        let other_format = frame(Pixel::GRAY8, 8, 8, |_, _, _| 0);
        assert!(transform.convert_into(&other_format, &mut out).is_err());

        let right_frame = frame(Pixel::YUV420P, 8, 8, |_, _, _| 0);
        assert!(transform.convert_into(&right_frame, &mut out[1..]).is_err());
    }

    #[test]
    fn empty_geometry_is_rejected() {
        let result = VideoTransform::new(0, 4, Pixel::YUV420P, rgb24(0, 4));
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn unscalable_format_is_rejected() {
        let result = VideoTransform::new(4, 4, Pixel::None, rgb24(4, 4));
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
