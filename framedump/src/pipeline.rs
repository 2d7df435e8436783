/*!
    The extraction run: open, decode, convert and export.
*/

use std::{fs, path::PathBuf};

use ffmpeg_decode::VideoDecoder;
use ffmpeg_source::Source;
use ffmpeg_transform::{VideoTransform, VideoTransformConfig};
use ffmpeg_types::Error;
use log::{debug, info, warn};

use crate::{
    config::Config,
    error::RunError,
    export::{FrameCounter, PpmExporter},
    reader::FrameReader,
    stages::{FrameConverter, FrameDecoder, PacketSource, RgbConverter},
};

/**
    Outcome of a completed run.
*/
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames decoded from the whole stream, exported or not.
    pub frames_decoded: u64,
    /// Frames the decoder failed on and skipped.
    pub frames_failed: u64,
    /// Files written, in frame order.
    pub written: Vec<PathBuf>,
    /// Frames within the limit that could not be converted or written.
    pub failed_exports: u64,
}

/**
    Decode every frame the reader yields, exporting those the counter numbers.

    A frame that fails to convert or write is logged and skipped; it still
    uses up its number. Only errors the reader cannot recover from end the
    run.
*/
pub fn run_pipeline<S, D, C>(
    reader: &mut FrameReader<S, D>,
    converter: &mut C,
    counter: &mut FrameCounter,
    exporter: &PpmExporter,
) -> Result<RunSummary, Error>
where
    S: PacketSource,
    D: FrameDecoder,
    C: FrameConverter<D::Frame>,
{
    let mut summary = RunSummary::default();

    while let Some(frame) = reader.decode_next()? {
        let Some(number) = counter.advance() else {
            continue;
        };

        let image = match converter.convert(&frame) {
            Ok(image) => image,
            Err(e) => {
                warn!("frame {number}: conversion failed: {e}");
                summary.failed_exports += 1;
                continue;
            }
        };

        match exporter.export(number, image) {
            Ok(path) => {
                debug!("frame {number} written to {}", path.display());
                summary.written.push(path);
            }
            Err(e) => {
                warn!(
                    "frame {number}: failed to write {}: {e}",
                    exporter.path_for(number).display()
                );
                summary.failed_exports += 1;
            }
        }
    }

    summary.frames_decoded = counter.processed();
    summary.frames_failed = reader.frames_failed();
    Ok(summary)
}

/**
    Run one extraction as described by `config`.

    The output directory is only created once the input has been opened.
*/
pub fn run(config: &Config) -> Result<RunSummary, RunError> {
    let mut source = Source::open(&config.input)?;
    if config.dump_format {
        source.dump_format();
    }

    let media = source.media_info();
    let stream = source.video_stream_info();
    info!(
        "{} ({}, {} streams{}): {} video stream #{} {}x{}{}",
        config.input.display(),
        media.format_name,
        media.stream_count,
        media
            .duration
            .map(|d| format!(", {:.2}s", d.as_secs_f64()))
            .unwrap_or_default(),
        stream.codec_name,
        stream.index,
        stream.width,
        stream.height,
        stream
            .fps()
            .map(|fps| format!(" @ {fps:.3} fps"))
            .unwrap_or_default()
    );

    fs::create_dir_all(&config.output_dir).map_err(|source| RunError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let codec_config = source
        .take_video_codec_config()
        .ok_or_else(|| Error::DecoderInit("codec parameters unavailable".into()))?;
    let decoder = VideoDecoder::new(codec_config, source.video_time_base())?;

    let (width, height) = (decoder.width(), decoder.height());
    debug!(
        "{} decodes to {:?}, converting to rgb24",
        decoder.codec_name(),
        decoder.format()
    );
    let transform = VideoTransform::new(
        width,
        height,
        decoder.format(),
        VideoTransformConfig::to_rgb24(width, height).with_algorithm(config.scaling),
    )?;
    let mut converter = RgbConverter::new(transform)?;

    let mut reader = FrameReader::new(source, decoder);
    let mut counter = FrameCounter::new(config.frame_limit);
    let exporter = PpmExporter::new(&config.output_dir);

    let summary = run_pipeline(&mut reader, &mut converter, &mut counter, &exporter)?;

    info!(
        "decoded {} frames from {} packets, wrote {} files to {}",
        summary.frames_decoded,
        reader.packets_sent(),
        summary.written.len(),
        exporter.dir().display()
    );
    let skipped = reader.source().skipped_packets();
    if skipped > 0 {
        debug!("ignored {skipped} packets from other streams");
    }
    if reader.packets_rejected() > 0 {
        warn!("{} packets could not be decoded", reader.packets_rejected());
    }
    if summary.frames_failed > 0 {
        warn!("{} frames could not be decoded", summary.frames_failed);
    }

    Ok(summary)
}
