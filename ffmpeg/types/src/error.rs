/*!
    Error type shared by the media crates.
*/

use thiserror::Error;

/**
    Errors produced while opening, decoding or converting media.

    The first six variants are the setup failures of the pipeline, in the
    order they can occur. Callers that need to tell them apart (for example
    to pick a process exit code) can match on them directly.
*/
#[derive(Debug, Error)]
pub enum Error {
    // ── Setup ─────────────────────────────────────────────────────────
    #[error("could not open input: {0}")]
    Open(String),
    #[error("could not read stream information: {0}")]
    Probe(String),
    #[error("no video stream found")]
    NoVideoStream,
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),
    #[error("could not initialize decoder context: {0}")]
    DecoderInit(String),
    #[error("could not open decoder: {0}")]
    DecoderOpen(String),

    // ── Processing ────────────────────────────────────────────────────
    #[error("codec error: {0}")]
    Codec(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }
}

/// Type alias for results that may return an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by `FromStr` implementations on enum types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_accept_str_and_string() {
        assert!(matches!(Error::codec("boom"), Error::Codec(m) if m == "boom"));
        assert!(matches!(
            Error::invalid_data(String::from("short")),
            Error::InvalidData(m) if m == "short"
        ));
    }

    #[test]
    fn setup_messages_carry_detail() {
        let err = Error::Probe("clip.mkv: End of file".into());
        assert_eq!(err.to_string(), "could not read stream information: clip.mkv: End of file");
    }

    #[test]
    fn parse_error_message() {
        let err = ParseError {
            kind: "scaling algorithm",
            value: "cubic".into(),
        };
        assert_eq!(err.to_string(), "unknown scaling algorithm 'cubic'");
    }
}
