use std::ops::Range;

use bevy::{
    image::Image,
    prelude::*,
    render::render_resource::{
        Extent3d, TextureDescriptor, TextureDimension, TextureViewDescriptor,
        TextureViewDimension,
    },
};
use wgpu::{TextureFormat, TextureUsages};

use crate::image::{ImageSlice, mip_level_byte_len};


pub const DEFAULT_MAX_LEVEL: u32 = 1000;


/// Device texture configuration of a 2d array texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureArrayInfo {
    pub width: u32,
    pub height: u32,
    /// `None` for a zero-sized texture.
    pub format: Option<TextureFormat>,
    pub mip_level_count: u32,
    pub slice_count: u32,
    pub base_level: u32,
    pub max_level: u32,
    pub usage: TextureUsages,
}

impl Default for TextureArrayInfo {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            format: None,
            mip_level_count: 1,
            slice_count: 0,
            base_level: 0,
            max_level: DEFAULT_MAX_LEVEL,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        }
    }
}

impl TextureArrayInfo {
    pub fn is_zero_sized(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.slice_count == 0
            || self.mip_level_count == 0
            || self.format.is_none()
    }

    /// Mip levels visible through views, `base_level..=max_level` clamped to
    /// the allocated chain.
    pub fn view_levels(&self) -> Range<u32> {
        let last = self.mip_level_count.saturating_sub(1);
        let base = self.base_level.min(last);
        let max = self.max_level.clamp(base, last);

        base..max + 1
    }
}


/// View over all slices of a 2d array texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureArrayViewInfo {
    pub base_layer: u32,
    pub layer_count: u32,
    pub base_level: u32,
    pub level_count: u32,
    pub format: Option<TextureFormat>,
}


/// Device side of a texture array: receives the texture configuration and
/// one image per `(level, slice)` subresource.
pub trait TextureArrayBinder<S> {
    fn reset(&mut self, info: &TextureArrayInfo);

    fn assign_image(&mut self, image: &S, level: u32, slice: u32);

    fn release(&mut self);
}


/// Packs subresources into a single bevy [`Image`] with layer-major data.
#[derive(Debug, Default)]
pub struct ImageArrayBinder {
    info: Option<TextureArrayInfo>,
    image: Option<Image>,
}

impl ImageArrayBinder {
    pub fn info(&self) -> Option<&TextureArrayInfo> {
        self.info.as_ref()
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn take_image(&mut self) -> Option<Image> {
        self.image.take()
    }

    fn layer_byte_len(info: &TextureArrayInfo, format: TextureFormat) -> Option<usize> {
        (0..info.mip_level_count)
            .map(|level| mip_level_byte_len(format, info.width, info.height, level))
            .sum()
    }

    fn subresource_range(&self, level: u32, slice: u32) -> Option<Range<usize>> {
        let info = self.info.as_ref()?;
        let format = info.format?;
        if level >= info.mip_level_count || slice >= info.slice_count {
            return None;
        }

        let layer_len = Self::layer_byte_len(info, format)?;
        let level_offset: usize = (0..level)
            .map(|level| mip_level_byte_len(format, info.width, info.height, level))
            .sum::<Option<usize>>()?;
        let level_len = mip_level_byte_len(format, info.width, info.height, level)?;

        let start = slice as usize * layer_len + level_offset;
        Some(start..start + level_len)
    }

    fn allocate(info: &TextureArrayInfo) -> Option<Image> {
        if info.is_zero_sized() {
            return None;
        }

        let format = info.format?;
        let data_len = Self::layer_byte_len(info, format)? * info.slice_count as usize;
        let view_levels = info.view_levels();

        Some(Image {
            data: Some(vec![0; data_len]),
            texture_descriptor: TextureDescriptor {
                label: None,
                size: Extent3d {
                    width: info.width,
                    height: info.height,
                    depth_or_array_layers: info.slice_count,
                },
                mip_level_count: info.mip_level_count,
                sample_count: 1,
                dimension: TextureDimension::D2,
                format,
                usage: info.usage,
                view_formats: &[],
            },
            texture_view_descriptor: Some(TextureViewDescriptor {
                format: Some(format),
                dimension: Some(TextureViewDimension::D2Array),
                base_mip_level: view_levels.start,
                mip_level_count: Some(view_levels.len() as u32),
                base_array_layer: 0,
                array_layer_count: Some(info.slice_count),
                ..default()
            }),
            ..default()
        })
    }
}

impl TextureArrayBinder<ImageSlice> for ImageArrayBinder {
    fn reset(&mut self, info: &TextureArrayInfo) {
        self.image = Self::allocate(info);
        self.info = Some(*info);
    }

    fn assign_image(&mut self, image: &ImageSlice, level: u32, slice: u32) {
        let Some(range) = self.subresource_range(level, slice) else {
            warn!(level, slice, "texture array subresource out of range");
            return;
        };

        let Some(bytes) = image.data.as_deref() else {
            warn!(level, slice, "texture array slice image has no data");
            return;
        };

        if bytes.len() != range.len() {
            warn!(
                level,
                slice,
                expected = range.len(),
                found = bytes.len(),
                "texture array slice image size does not match subresource"
            );
            return;
        }

        if let Some(data) = self.image.as_mut().and_then(|image| image.data.as_mut()) {
            data[range].copy_from_slice(bytes);
        }
    }

    fn release(&mut self) {
        self.info = None;
        self.image = None;
    }
}
