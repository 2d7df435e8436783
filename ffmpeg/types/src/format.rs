/*!
    Pixel format types.
*/

/**
    Video pixel formats.

    This is the subset of formats commonly produced by software and hardware
    decoders. Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Planar YUV 4:2:0, full range (MJPEG output)
    Yuvj420p,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:2:2, full range
    Yuvj422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:4:4, full range
    Yuvj444p,
    /// Planar YUV 4:2:0, 10-bit little-endian (HDR content)
    Yuv420p10,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Semi-planar YUV 4:2:0, 10-bit little-endian
    P010le,
    /// Single 8-bit luma plane
    Gray8,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed BGRA, 32bpp
    Bgra,
}

/**
    Size of one plane of a picture, without any row padding.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Bytes of pixel data in one row.
    pub row_bytes: usize,
    /// Number of rows.
    pub rows: usize,
}

impl PlaneLayout {
    pub const fn len(&self) -> usize {
        self.row_bytes * self.rows
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PixelFormat {
    /**
        Returns the number of bytes used to store one sample.
    */
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::Yuv420p10 | Self::P010le => 2,
            _ => 1,
        }
    }

    /**
        Returns the unpadded layout of every plane for a picture of the given size.

        Chroma dimensions round up, matching how FFmpeg sizes subsampled planes
        for odd widths and heights.
    */
    pub fn plane_layouts(self, width: u32, height: u32) -> Vec<PlaneLayout> {
        let width = width as usize;
        let height = height as usize;
        let half_width = width.div_ceil(2);
        let half_height = height.div_ceil(2);
        let sample = self.bytes_per_sample();

        let plane = |row_bytes, rows| PlaneLayout { row_bytes, rows };

        match self {
            Self::Yuv420p | Self::Yuvj420p | Self::Yuv420p10 => vec![
                plane(width * sample, height),
                plane(half_width * sample, half_height),
                plane(half_width * sample, half_height),
            ],
            Self::Yuv422p | Self::Yuvj422p => vec![
                plane(width, height),
                plane(half_width, height),
                plane(half_width, height),
            ],
            Self::Yuv444p | Self::Yuvj444p => vec![plane(width, height); 3],
            // Interleaved UV plane: two samples per chroma position
            Self::Nv12 | Self::P010le => vec![
                plane(width * sample, height),
                plane(half_width * 2 * sample, half_height),
            ],
            Self::Gray8 => vec![plane(width, height)],
            Self::Rgb24 | Self::Bgr24 => vec![plane(width * 3, height)],
            Self::Rgba | Self::Bgra => vec![plane(width * 4, height)],
        }
    }

    /**
        Returns the size in bytes of a tightly packed picture in this format.
    */
    pub fn frame_size(self, width: u32, height: u32) -> usize {
        self.plane_layouts(width, height)
            .iter()
            .map(PlaneLayout::len)
            .sum()
    }
}
