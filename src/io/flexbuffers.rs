use flexbuffers::FlexbufferSerializer;
use serde::Serialize;

use crate::io::{
    TextureArrayIoError,
    codec::TextureArrayCodec,
    data::TextureArrayData,
};


impl TextureArrayCodec for TextureArrayData {
    fn encode(&self) -> Result<Vec<u8>, TextureArrayIoError> {
        let mut serializer = FlexbufferSerializer::new();
        self.serialize(&mut serializer)?;

        Ok(serializer.view().to_vec())
    }

    fn decode(data: &[u8]) -> Result<Self, TextureArrayIoError> {
        let data: Self = flexbuffers::from_slice(data)?;
        data.validate()?;

        Ok(data)
    }
}
