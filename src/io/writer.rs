use std::{io::Write, path::Path};

use crate::io::{TextureArrayIoError, data::TextureArrayData};


/// Write `data` to `path`, json for `.texarray.json`, flexbuffers for `.texarray`.
pub fn write_texture_array_to_file(
    data: &TextureArrayData,
    path: impl AsRef<Path>,
) -> Result<(), TextureArrayIoError> {
    let path = path.as_ref();
    let bytes = encode_for_path(data, path)?;

    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(bytes.as_slice())?;
    writer.flush()?;

    Ok(())
}

pub fn encode_for_path(
    data: &TextureArrayData,
    path: &Path,
) -> Result<Vec<u8>, TextureArrayIoError> {
    let name = path.to_string_lossy();

    if name.ends_with(".texarray.json") {
        #[cfg(feature = "io_json")]
        return data.to_json();
    }

    if name.ends_with(".texarray") {
        #[cfg(feature = "io_flexbuffers")]
        return crate::io::codec::TextureArrayCodec::encode(data);
    }

    Err(TextureArrayIoError::UnsupportedExtension(name.into_owned()))
}
