/*!
    Media source implementation.
*/

use std::ffi::CString;
use std::path::Path;
use std::ptr;

use ffmpeg_next::{ffi, format::context::Input as InputContext, media::Type};
use log::{debug, warn};

use ffmpeg_types::{Error, MediaInfo, Packet, Rational, Result, VideoStreamInfo};

use crate::codec_config::CodecConfig;
use crate::convert::{duration_from_ffmpeg, pts_from_ffmpeg};
use crate::probe::{extract_media_info, extract_video_stream_info};

/**
    A media source that produces the encoded packets of its first video stream.

    Created by [`Source::open`]. The container is closed when the
    source is dropped.
*/
pub struct Source {
    /// The FFmpeg input context.
    input: InputContext,
    /// Path as handed to FFmpeg, kept for `av_dump_format`.
    path: CString,
    /// Cached media info.
    media_info: MediaInfo,
    /// Selected video stream.
    video_stream: VideoStreamInfo,
    /// Codec config of the selected stream, until taken by a decoder.
    video_codec_config: Option<CodecConfig>,
    /// Packets from other streams dropped so far.
    skipped_packets: u64,
    /// Set once the demuxer reported end of input.
    finished: bool,
}

impl Source {
    /**
        Open a media file and select its first video stream.

        Fails with [`Error::Open`] if the file cannot be opened,
        [`Error::Probe`] if its stream information cannot be read, and
        [`Error::NoVideoStream`] if none of its streams is video.

        # Example

        ```ignore
        let source = Source::open("video.mp4")?;
        println!("{}x{}", source.video_stream_info().width, source.video_stream_info().height);
        ```
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::Open(e.to_string()))?;

        let path = path.as_ref();
        let c_path = path_to_cstring(path)
            .ok_or_else(|| Error::Open(format!("{}: path contains a NUL byte", path.display())))?;

        let input = open_input(path, &c_path)?;

        // First video stream in index order, not the demuxer's "best" pick
        let (video_stream, media_info, codec_config) = {
            let stream = input
                .streams()
                .find(|s| s.parameters().medium() == Type::Video)
                .ok_or(Error::NoVideoStream)?;
            (
                extract_video_stream_info(&stream),
                extract_media_info(&input, &stream),
                CodecConfig::from(stream.parameters()),
            )
        };

        debug!(
            "selected stream #{} ({}, {}x{}) of {}",
            video_stream.index,
            video_stream.codec_name,
            video_stream.width,
            video_stream.height,
            path.display()
        );

        Ok(Self {
            input,
            path: c_path,
            media_info,
            video_stream,
            video_codec_config: Some(codec_config),
            skipped_packets: 0,
            finished: false,
        })
    }

    /**
        Get the media info for this source.
    */
    pub fn media_info(&self) -> &MediaInfo {
        &self.media_info
    }

    /**
        Get information about the selected video stream.
    */
    pub fn video_stream_info(&self) -> &VideoStreamInfo {
        &self.video_stream
    }

    /**
        Time base of the selected video stream.
    */
    pub fn video_time_base(&self) -> Rational {
        self.video_stream.time_base
    }

    /**
        Take the video codec configuration.

        Pass this to `ffmpeg-decode` to create a video decoder.
    */
    pub fn take_video_codec_config(&mut self) -> Option<CodecConfig> {
        self.video_codec_config.take()
    }

    /**
        Number of packets from other streams skipped so far.
    */
    pub fn skipped_packets(&self) -> u64 {
        self.skipped_packets
    }

    /**
        Write FFmpeg's description of the container to stderr.

        Output goes through FFmpeg's logger at info level.
    */
    pub fn dump_format(&self) {
        // SAFETY: the context is open for the lifetime of self and the path
        // is a valid NUL-terminated string. The last argument selects input.
        unsafe {
            ffi::av_dump_format(
                self.input.as_ptr() as *mut ffi::AVFormatContext,
                0,
                self.path.as_ptr(),
                0,
            );
        }
    }

    /**
        Read the next packet of the selected video stream.

        Returns `Ok(Some(packet))` for each packet in container order and
        `Ok(None)` at end of stream. Packets of other streams are skipped.
        A read error ends the stream, as the demuxer cannot resume past it.
    */
    pub fn next_packet(&mut self) -> Result<Option<Packet>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let mut ffmpeg_packet = ffmpeg_next::Packet::empty();

            match ffmpeg_packet.read(&mut self.input) {
                Ok(()) => {}
                Err(ffmpeg_next::Error::Eof) => {
                    self.finished = true;
                    return Ok(None);
                }
                Err(e) => {
                    warn!("read error, treating as end of stream: {e}");
                    self.finished = true;
                    return Ok(None);
                }
            }

            if ffmpeg_packet.stream() != self.video_stream.index {
                self.skipped_packets += 1;
                continue;
            }

            let data = ffmpeg_packet.data().map(|d| d.to_vec()).unwrap_or_default();

            return Ok(Some(Packet::new(
                data,
                pts_from_ffmpeg(ffmpeg_packet.pts()),
                pts_from_ffmpeg(ffmpeg_packet.dts()),
                duration_from_ffmpeg(ffmpeg_packet.duration()),
                self.video_stream.time_base,
                ffmpeg_packet.is_key(),
                self.video_stream.index,
            )));
        }
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("path", &self.path)
            .field("video_stream", &self.video_stream.index)
            .field("skipped_packets", &self.skipped_packets)
            .finish_non_exhaustive()
    }
}

/**
    Path bytes as FFmpeg expects them. On Unix any byte sequence without NUL
    is a valid path, UTF-8 or not.
*/
#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Option<CString> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_os_str().as_bytes()).ok()
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Option<CString> {
    path.to_str().and_then(|s| CString::new(s).ok())
}

/**
    Open the container and read its stream information as two separate steps,
    so the two failures stay distinguishable.
*/
fn open_input(path: &Path, c_path: &CString) -> Result<InputContext> {
    // SAFETY: `ctx` starts null as avformat_open_input requires. On a failed
    // probe the context is closed here; on success ownership moves into
    // `InputContext`, which closes it on drop.
    unsafe {
        let mut ctx = ptr::null_mut();

        let ret = ffi::avformat_open_input(
            &mut ctx,
            c_path.as_ptr(),
            ptr::null_mut(),
            ptr::null_mut(),
        );
        if ret < 0 {
            return Err(Error::Open(format!(
                "{}: {}",
                path.display(),
                ffmpeg_next::Error::from(ret)
            )));
        }

        let ret = ffi::avformat_find_stream_info(ctx, ptr::null_mut());
        if ret < 0 {
            ffi::avformat_close_input(&mut ctx);
            return Err(Error::Probe(format!(
                "{}: {}",
                path.display(),
                ffmpeg_next::Error::from(ret)
            )));
        }

        Ok(InputContext::wrap(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_y4m(path: &Path, frames: usize) {
        let mut data = b"YUV4MPEG2 W8 H6 F25:1 Ip A1:1 C420jpeg\n".to_vec();
        for i in 0..frames {
            data.extend_from_slice(b"FRAME\n");
            data.extend(std::iter::repeat_n(i as u8, 8 * 6 + 2 * 4 * 3));
        }
        std::fs::write(path, data).unwrap();
    }

    #[test]
    fn raw_clip_yields_one_packet_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.y4m");
        write_y4m(&path, 3);

        let mut source = Source::open(&path).unwrap();

        let stream = source.video_stream_info();
        assert_eq!((stream.index, stream.width, stream.height), (0, 8, 6));
        assert_eq!(stream.codec_name, "rawvideo");
        assert_eq!(source.media_info().stream_count, 1);
        assert!(source.take_video_codec_config().is_some());
        assert!(source.take_video_codec_config().is_none());

        let mut sizes = Vec::new();
        while let Some(packet) = source.next_packet().unwrap() {
            assert_eq!(packet.stream_index, 0);
            sizes.push(packet.len());
        }
        assert_eq!(sizes, vec![72; 3]);
        assert_eq!(source.skipped_packets(), 0);
        // Stays at end of stream
        assert!(source.next_packet().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_pass_through() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let path = Path::new(OsStr::from_bytes(b"clip-\xff.y4m"));
        let c_path = path_to_cstring(path).unwrap();
        assert_eq!(c_path.as_bytes(), b"clip-\xff.y4m");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_missing_file_reaches_ffmpeg() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"missing-\xff.mp4"));
        let err = Source::open(&path).unwrap_err();
        // FFmpeg's own "No such file" error, not a rejected path
        assert!(matches!(&err, Error::Open(m) if !m.contains("NUL")), "{err:?}");
    }

    #[test]
    fn nul_in_path_is_an_open_error() {
        let err = Source::open("bad\0name.mp4").unwrap_err();
        assert!(matches!(err, Error::Open(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Source::open(dir.path().join("missing.mp4")).unwrap_err();
        assert!(matches!(err, Error::Open(_)), "{err:?}");
    }
}
