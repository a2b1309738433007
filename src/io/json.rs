use crate::io::{TextureArrayIoError, data::TextureArrayData};


impl TextureArrayData {
    pub fn to_json(&self) -> Result<Vec<u8>, TextureArrayIoError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, TextureArrayIoError> {
        let data: Self = serde_json::from_slice(bytes)?;
        data.validate()?;

        Ok(data)
    }
}
