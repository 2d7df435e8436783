/*!
    Opaque codec configuration for passing to decoders.
*/

use ffmpeg_next::codec;

/**
    Opaque codec configuration extracted from a source stream.

    Holds the codec parameters needed to create a decoder without exposing
    ffmpeg-next types in the public API of the source. Pass this to
    `ffmpeg-decode` to create a decoder for the stream.
*/
pub struct CodecConfig {
    parameters: codec::Parameters,
}

impl From<codec::Parameters> for CodecConfig {
    fn from(parameters: codec::Parameters) -> Self {
        Self { parameters }
    }
}

impl CodecConfig {
    /**
        Consume the config, returning the raw parameters for the decoder crate.
    */
    pub fn into_parameters(self) -> codec::Parameters {
        self.parameters
    }
}

impl Clone for CodecConfig {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
        }
    }
}

impl std::fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecConfig")
            .field("codec_id", &self.parameters.id())
            .finish_non_exhaustive()
    }
}
