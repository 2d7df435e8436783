use std::path::PathBuf;

use thiserror::Error;

/**
    Fatal errors of a run. Each maps to its own process exit code.
*/
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Media(#[from] ffmpeg_types::Error),
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RunError {
    /**
        Process exit code for this error.

        Codes 0 and 1 are never used, and 2 is left to usage errors.
    */
    pub fn exit_code(&self) -> u8 {
        use ffmpeg_types::Error as E;

        match self {
            Self::Media(E::Open(_)) => 3,
            Self::Media(E::Probe(_)) => 4,
            Self::Media(E::NoVideoStream) => 5,
            Self::Media(E::UnsupportedCodec(_)) => 6,
            Self::Media(E::DecoderInit(_)) => 7,
            Self::Media(E::DecoderOpen(_)) => 8,
            Self::Media(E::UnsupportedFormat(_)) => 9,
            Self::Media(E::Codec(_) | E::InvalidData(_)) => 10,
            Self::OutputDir { .. } => 11,
        }
    }
}
