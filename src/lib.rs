use bevy::prelude::*;

pub use asset::{
    TextureArrayAsset,
    TextureArrayHandle,
    TextureArrayImage,
};
pub use binder::{
    ImageArrayBinder,
    TextureArrayBinder,
    TextureArrayInfo,
    TextureArrayViewInfo,
};
pub use image::{ImageSlice, MipmapImage};
pub use io::{
    TextureArrayIoError,
    data::TextureArrayData,
    loader::TextureArrayLoader,
};
pub use mipmap::{
    GeneratedMipmaps,
    MipmapError,
    MipmapSet,
    SourceMipmaps,
    normalize,
};
pub use settings::{MismatchPolicy, TextureArraySettings};
pub use texture_array::{TextureArray, TextureArrayCreateInfo};

pub mod asset;
pub mod binder;
pub mod image;
pub mod io;
pub mod mipmap;
pub mod settings;
pub mod texture_array;


#[derive(Default)]
pub struct TextureArrayPlugin;

impl Plugin for TextureArrayPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TextureArrayAsset>();
        app.init_asset_loader::<TextureArrayLoader>();

        app.register_asset_reflect::<TextureArrayAsset>();
        app.register_type::<TextureArrayHandle>();
        app.register_type::<TextureArrayImage>();
        app.register_type::<TextureArraySettings>();

        app.add_systems(Update, asset::build_texture_arrays);
    }
}
