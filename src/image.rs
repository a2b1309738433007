use std::sync::Arc;

use bevy::{
    image::Image,
    prelude::*,
    render::render_resource::{Extent3d, TextureDescriptor, TextureFormat},
};


/// Reference-counted slice image handed to a texture array.
pub type ImageSlice = Arc<Image>;


/// Image source consumed by mipmap normalization.
///
/// The two extraction operations map to the two shapes a caller can describe:
/// a single set of slices that each carry their own mip chain uses
/// [`MipmapImage::extract_mipmaps`], while a level-by-level grid of base images
/// uses [`MipmapImage::extract_base_level`].
pub trait MipmapImage: Clone {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> TextureFormat;

    /// Full ordered mip chain of this image, level 0 first.
    fn extract_mipmaps(&self) -> Vec<Self>;

    /// Level 0 of this image only.
    fn extract_base_level(&self) -> Self;
}


/// Byte size of mip `level` for an image of `width` x `height` texels.
///
/// Returns `None` for formats without a single copyable aspect.
pub fn mip_level_byte_len(
    format: TextureFormat,
    width: u32,
    height: u32,
    level: u32,
) -> Option<usize> {
    let (block_width, block_height) = format.block_dimensions();
    let block_size = format.block_copy_size(None)?;

    let level_width = level_dimension(width, level);
    let level_height = level_dimension(height, level);

    let blocks_x = level_width.div_ceil(block_width) as usize;
    let blocks_y = level_height.div_ceil(block_height) as usize;

    Some(blocks_x * blocks_y * block_size as usize)
}

// levels past the 32nd stay at one texel
fn level_dimension(size: u32, level: u32) -> u32 {
    size.checked_shr(level).unwrap_or(0).max(1)
}

/// Extent of mip `level` for a base extent of `width` x `height`.
pub fn mip_level_extent(width: u32, height: u32, level: u32) -> Extent3d {
    Extent3d {
        width: level_dimension(width, level),
        height: level_dimension(height, level),
        depth_or_array_layers: 1,
    }
}


fn single_level_image(source: &Image, level: u32, data: Vec<u8>) -> Image {
    Image {
        data: Some(data),
        texture_descriptor: TextureDescriptor {
            size: mip_level_extent(source.width(), source.height(), level),
            mip_level_count: 1,
            ..source.texture_descriptor.clone()
        },
        sampler: source.sampler.clone(),
        asset_usage: source.asset_usage,
        ..default()
    }
}

// levels of layer 0 are stored back to back, level 0 first
fn split_levels(image: &Image) -> Option<Vec<Image>> {
    let data = image.data.as_ref()?;
    let format = image.texture_descriptor.format;
    let level_count = image.texture_descriptor.mip_level_count;

    let mut offset = 0;
    let mut levels = Vec::with_capacity(level_count as usize);
    for level in 0..level_count {
        let len = mip_level_byte_len(format, image.width(), image.height(), level)?;
        let bytes = data.get(offset..offset + len)?;
        levels.push(single_level_image(image, level, bytes.to_vec()));
        offset += len;
    }

    Some(levels)
}


impl MipmapImage for ImageSlice {
    fn width(&self) -> u32 {
        Image::width(self)
    }

    fn height(&self) -> u32 {
        Image::height(self)
    }

    fn format(&self) -> TextureFormat {
        self.texture_descriptor.format
    }

    fn extract_mipmaps(&self) -> Vec<Self> {
        if self.texture_descriptor.mip_level_count <= 1 {
            return vec![Arc::clone(self)];
        }

        match split_levels(self) {
            Some(levels) => levels.into_iter().map(Arc::new).collect(),
            None => {
                warn!(
                    mip_level_count = self.texture_descriptor.mip_level_count,
                    "image data does not cover its mip chain; using the base level only"
                );
                vec![self.extract_base_level()]
            }
        }
    }

    fn extract_base_level(&self) -> Self {
        if self.texture_descriptor.mip_level_count <= 1 {
            return Arc::clone(self);
        }

        let base = self.data.as_ref().and_then(|data| {
            let len = mip_level_byte_len(self.format(), Image::width(self), Image::height(self), 0)?;
            data.get(..len).map(<[u8]>::to_vec)
        });

        match base {
            Some(bytes) => Arc::new(single_level_image(self, 0, bytes)),
            None => Arc::clone(self),
        }
    }
}


/// 2x2 checkerboard used as the stand-in slice of a default texture array.
pub fn checkerboard_image() -> Image {
    const DARK: [u8; 4] = [0, 0, 0, 255];
    const LIGHT: [u8; 4] = [255, 0, 255, 255];

    let data = [LIGHT, DARK, DARK, LIGHT].concat();

    Image {
        data: Some(data),
        texture_descriptor: TextureDescriptor {
            size: mip_level_extent(2, 2, 0),
            format: TextureFormat::Rgba8UnormSrgb,
            mip_level_count: 1,
            ..Image::default().texture_descriptor
        },
        ..default()
    }
}
