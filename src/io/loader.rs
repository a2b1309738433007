use std::path::Path;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    image::Image,
    prelude::*,
};

use crate::{
    asset::TextureArrayAsset,
    io::{TextureArrayIoError, data::TextureArrayData},
    settings::TextureArraySettings,
};


#[derive(Default)]
pub struct TextureArrayLoader;

impl TextureArrayLoader {
    fn decode(path: &Path, bytes: &[u8]) -> Result<TextureArrayData, TextureArrayIoError> {
        let name = path.to_string_lossy();

        if name.ends_with(".texarray.json") {
            #[cfg(feature = "io_json")]
            return TextureArrayData::from_json(bytes);

            #[cfg(not(feature = "io_json"))]
            return Err(TextureArrayIoError::UnsupportedExtension(
                "json support not enabled, enable with io_json feature".to_string(),
            ));
        }

        if name.ends_with(".texarray") {
            #[cfg(feature = "io_flexbuffers")]
            return crate::io::codec::TextureArrayCodec::decode(bytes);

            #[cfg(not(feature = "io_flexbuffers"))]
            return Err(TextureArrayIoError::UnsupportedExtension(
                "flexbuffers support not enabled, enable with io_flexbuffers feature".to_string(),
            ));
        }

        Err(TextureArrayIoError::UnsupportedExtension(name.into_owned()))
    }
}

impl AssetLoader for TextureArrayLoader {
    type Asset = TextureArrayAsset;
    type Settings = TextureArraySettings;
    type Error = TextureArrayIoError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let path = load_context.path().to_path_buf();
        let data = Self::decode(&path, &bytes)?;

        // slice references are relative to the manifest
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let slices = data.placeholder_source(|_, _, reference| {
            load_context.load::<Image>(root.join(reference))
        });

        debug!(
            path = %path.display(),
            levels = slices.len(),
            slices = data.slice,
            "loaded texture array manifest"
        );

        Ok(TextureArrayAsset {
            data,
            slices,
            settings: settings.clone(),
        })
    }

    fn extensions(&self) -> &[&str] {
        &["texarray.json", "texarray"]
    }
}
