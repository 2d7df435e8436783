#![allow(dead_code)]

use std::{fs, io::Write, path::Path};

use anyhow::Result;

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 48;

/// Size of a `WIDTH`x`HEIGHT` frame file: header plus packed pixels.
pub const PPM_LEN: usize = 3 + 6 + 4 + (WIDTH * HEIGHT * 3) as usize;

/**
    Chroma layouts of the YUV4MPEG2 `C` header tag.
*/
#[derive(Clone, Copy, Debug)]
pub enum Chroma {
    C420,
    C411,
    C422,
    C444,
    /// 4:4:4 with 10-bit samples, stored as two little-endian bytes.
    C444p10,
    Mono,
}

impl Chroma {
    fn tag(self) -> &'static str {
        match self {
            Self::C420 => "420jpeg",
            Self::C411 => "411",
            Self::C422 => "422",
            Self::C444 => "444",
            Self::C444p10 => "444p10",
            Self::Mono => "mono",
        }
    }

    /// Samples in each chroma plane, 0 for greyscale.
    fn chroma_samples(self, width: u32, height: u32) -> usize {
        let (w, h) = match self {
            Self::C420 => (width.div_ceil(2), height.div_ceil(2)),
            Self::C411 => (width.div_ceil(4), height),
            Self::C422 => (width.div_ceil(2), height),
            Self::C444 | Self::C444p10 => (width, height),
            Self::Mono => (0, 0),
        };
        (w * h) as usize
    }
}

/**
    Write an uncompressed YUV4MPEG2 clip with `frames` 4:2:0 frames.

    Each frame has a distinct luma level so frames can be told apart after
    conversion.
*/
pub fn write_y4m(path: &Path, width: u32, height: u32, frames: u32) -> Result<()> {
    write_y4m_as(path, Chroma::C420, width, height, frames)
}

/**
    Like [`write_y4m`], with the given chroma layout. Chroma is neutral, so
    every frame is grey.
*/
pub fn write_y4m_as(path: &Path, chroma: Chroma, width: u32, height: u32, frames: u32) -> Result<()> {
    let mut out = Vec::new();
    writeln!(out, "YUV4MPEG2 W{width} H{height} F25:1 Ip A1:1 C{}", chroma.tag())?;

    let luma = (width * height) as usize;
    let chroma_len = chroma.chroma_samples(width, height) * 2;
    for index in 0..frames {
        out.extend_from_slice(b"FRAME\n");
        if let Chroma::C444p10 = chroma {
            let level = u16::from(luma_level(index)) << 2;
            for _ in 0..luma {
                out.extend_from_slice(&level.to_le_bytes());
            }
            for _ in 0..chroma_len {
                out.extend_from_slice(&512u16.to_le_bytes());
            }
        } else {
            out.extend(std::iter::repeat_n(luma_level(index), luma));
            out.extend(std::iter::repeat_n(128u8, chroma_len));
        }
    }

    fs::write(path, out)?;
    Ok(())
}

pub fn luma_level(frame_index: u32) -> u8 {
    (40 + frame_index * 30).min(235) as u8
}

/**
    Write a short mono 16-bit PCM WAV file: a container without any video.
*/
pub fn write_wav(path: &Path) -> Result<()> {
    let samples = 800u32;
    let data_len = samples * 2;

    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&8000u32.to_le_bytes());
    out.extend_from_slice(&16000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(out.len() + data_len as usize, 0);

    fs::write(path, out)?;
    Ok(())
}

/// Names of the `frame*.ppm` files in `dir`, sorted.
pub fn frame_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with("frame") && name.ends_with(".ppm") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
