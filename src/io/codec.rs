use super::TextureArrayIoError;

/// Binary encoding of the persisted texture array form.
pub trait TextureArrayCodec: Sized {
    fn encode(&self) -> Result<Vec<u8>, TextureArrayIoError>;
    fn decode(data: &[u8]) -> Result<Self, TextureArrayIoError>;
}
