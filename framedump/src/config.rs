use std::path::PathBuf;

use clap::Parser;
use ffmpeg_transform::ScalingAlgorithm;

/// Number of leading frames written when `--frames` is not given.
pub const DEFAULT_FRAME_LIMIT: u64 = 5;

/**
    Decode a video file and write its first frames as PPM images.
*/
#[derive(Parser, Debug, Clone)]
#[command(name = "framedump", version)]
pub struct Config {
    /// Media file to read.
    pub input: PathBuf,

    /// Directory the frame files are written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of leading frames to export.
    #[arg(short = 'n', long = "frames", default_value_t = DEFAULT_FRAME_LIMIT)]
    pub frame_limit: u64,

    /// Scaling algorithm used for the RGB conversion: nearest, bilinear, bicubic or lanczos.
    #[arg(long, default_value = "bilinear")]
    pub scaling: ScalingAlgorithm,

    /// Print the container description before decoding.
    #[arg(long)]
    pub dump_format: bool,
}

impl Config {
    /**
        Configuration with default options for one input file.
    */
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("."),
            frame_limit: DEFAULT_FRAME_LIMIT,
            scaling: ScalingAlgorithm::default(),
            dump_format: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = limit;
        self
    }
}
