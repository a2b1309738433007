use static_assertions::assert_cfg;
use thiserror::Error;

pub mod codec;
pub mod data;
pub mod loader;
pub mod writer;

#[cfg(feature = "io_flexbuffers")]
pub mod flexbuffers;

#[cfg(feature = "io_json")]
pub mod json;


assert_cfg!(
    any(
        feature = "io_json",
        feature = "io_flexbuffers",
    ),
    "no texture array io enabled",
);


#[derive(Debug, Error)]
pub enum TextureArrayIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "io_json")]
    #[error("invalid texture array json: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "io_flexbuffers")]
    #[error("failed to encode texture array flexbuffer: {0}")]
    FlexbuffersEncode(#[from] ::flexbuffers::SerializationError),

    #[cfg(feature = "io_flexbuffers")]
    #[error("failed to decode texture array flexbuffer: {0}")]
    FlexbuffersDecode(#[from] ::flexbuffers::DeserializationError),

    #[error("unsupported texture array file `{0}`")]
    UnsupportedExtension(String),

    #[error("texture array level {level} lists {found} slices, expected {expected}")]
    SliceCountMismatch {
        level: usize,
        expected: usize,
        found: usize,
    },
}
