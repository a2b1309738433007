use std::sync::Arc;

use bevy::{asset::LoadState, image::Image, prelude::*};

use crate::{
    binder::ImageArrayBinder,
    image::ImageSlice,
    io::data::TextureArrayData,
    mipmap::SourceMipmaps,
    settings::TextureArraySettings,
    texture_array::TextureArray,
};


/// Loaded texture array manifest with a handle per referenced slice image.
#[derive(Asset, Clone, Debug, Default, Reflect)]
pub struct TextureArrayAsset {
    pub data: TextureArrayData,
    pub slices: Vec<Vec<Handle<Image>>>,
    pub settings: TextureArraySettings,
}

impl TextureArrayAsset {
    /// Source grid of the loaded slice images, `None` until every slice is
    /// available.
    pub fn source(&self, images: &Assets<Image>) -> Option<SourceMipmaps<ImageSlice>> {
        self.slices
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|handle| images.get(handle).cloned().map(Arc::new))
                    .collect()
            })
            .collect()
    }

    /// First slice image the asset server failed to load.
    pub fn failed_slice(&self, asset_server: &AssetServer) -> Option<&Handle<Image>> {
        // images added at runtime are not tracked by the server
        self.slices.iter().flatten().find(|handle| {
            matches!(asset_server.get_load_state(handle.id()), Some(LoadState::Failed(_)))
        })
    }
}


#[derive(Component, Clone, Debug, Default, Reflect)]
pub struct TextureArrayHandle(pub Handle<TextureArrayAsset>);

/// Array texture built from a [`TextureArrayHandle`].
///
/// `image` is `None` when the slices normalized to an empty texture.
#[derive(Component, Clone, Debug, Default, Reflect)]
pub struct TextureArrayImage {
    pub image: Option<Handle<Image>>,
    pub slice_count: u32,
    pub mip_level_count: u32,
}


pub fn build_texture_arrays(
    mut commands: Commands,
    texture_arrays: Query<(Entity, &TextureArrayHandle), Without<TextureArrayImage>>,
    array_assets: Res<Assets<TextureArrayAsset>>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Option<Res<AssetServer>>,
) {
    for (entity, handle) in texture_arrays.iter() {
        let Some(array) = array_assets.get(&handle.0) else {
            continue;
        };

        let Some(source) = array.source(&images) else {
            let failed = asset_server
                .as_deref()
                .and_then(|asset_server| array.failed_slice(asset_server));

            match failed {
                Some(slice) => {
                    warn!(?entity, path = ?slice.path(), "texture array slice image failed to load");
                    commands.entity(entity).insert(TextureArrayImage::default());
                }
                None => debug!(?entity, "waiting for texture array slice images"),
            }
            continue;
        };

        let mut texture = TextureArray::with_settings(ImageArrayBinder::default(), array.settings.clone());
        if let Err(err) = texture.set_mipmaps(source) {
            warn!(?entity, %err, "texture array slices are inconsistent");
        }

        let slice_count = texture.slice_count() as u32;
        let mip_level_count = texture.generated_mipmaps().level_count() as u32;
        let image = texture.into_binder().take_image().map(|image| images.add(image));

        debug!(?entity, slice_count, mip_level_count, "built texture array image");

        commands.entity(entity).insert(TextureArrayImage {
            image,
            slice_count,
            mip_level_count,
        });
    }
}
