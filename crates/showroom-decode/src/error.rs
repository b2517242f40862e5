use thiserror::Error;

/// Errors that can occur while decoding a scene buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse glTF scene: {0}")]
    Parse(String),
}

impl From<gltf::Error> for DecodeError {
    fn from(err: gltf::Error) -> Self {
        DecodeError::Parse(err.to_string())
    }
}
