/*!
    Decode the leading frames of a video file and write them as PPM images.

    [`run`] drives one extraction: it opens the container, picks the first
    video stream, decodes it to the end and writes the first
    [`Config::frame_limit`] frames as `frame1.ppm`, `frame2.ppm`, ... in the
    output directory.

    The stages are connected through the traits in [`stages`], so
    [`FrameReader`] and [`run_pipeline`] can be driven without FFmpeg.
*/

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod reader;
pub mod stages;

pub use config::{Config, DEFAULT_FRAME_LIMIT};
pub use error::RunError;
pub use export::{FrameCounter, PpmExporter, write_ppm};
pub use pipeline::{RunSummary, run, run_pipeline};
pub use reader::{FrameReader, ReaderState};
pub use stages::RgbConverter;
