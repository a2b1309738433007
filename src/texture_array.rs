use std::{fmt, sync::Arc};

use bevy::prelude::*;
use wgpu::{TextureFormat, TextureUsages};

use crate::{
    binder::{DEFAULT_MAX_LEVEL, TextureArrayBinder, TextureArrayInfo, TextureArrayViewInfo},
    image::{ImageSlice, MipmapImage, checkerboard_image},
    mipmap::{GeneratedMipmaps, MipmapError, MipmapSet, SourceMipmaps, normalize},
    settings::{MismatchPolicy, TextureArraySettings},
};


/// Explicit configuration for [`TextureArray::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureArrayCreateInfo {
    pub width: u32,
    pub height: u32,
    pub format: Option<TextureFormat>,
    /// Defaults to 1.
    pub mipmap_level: Option<u32>,
    /// Defaults to 0.
    pub base_level: Option<u32>,
    /// Defaults to 1000.
    pub max_level: Option<u32>,
}


/// 2d array texture built from caller supplied slice images.
///
/// Holds the caller's [`SourceMipmaps`], the [`GeneratedMipmaps`] derived from
/// them and the binder that owns the device texture. Every accepted grid is
/// pushed to the binder as a whole; [`TextureArray::update_mipmaps`] re-pushes
/// a level range.
pub struct TextureArray<S, B> {
    mipmaps: SourceMipmaps<S>,
    generated: GeneratedMipmaps<S>,
    width: u32,
    height: u32,
    format: Option<TextureFormat>,
    mip_level_count: u32,
    base_level: u32,
    max_level: u32,
    settings: TextureArraySettings,
    binder: B,
    released: bool,
}

impl<S: MipmapImage, B: TextureArrayBinder<S>> TextureArray<S, B> {
    pub fn new(binder: B) -> Self {
        Self::with_settings(binder, TextureArraySettings::default())
    }

    pub fn with_settings(binder: B, settings: TextureArraySettings) -> Self {
        Self {
            mipmaps: Vec::new(),
            generated: GeneratedMipmaps::default(),
            width: 0,
            height: 0,
            format: None,
            mip_level_count: 1,
            base_level: settings.base_level.unwrap_or(0),
            max_level: settings.max_level.unwrap_or(DEFAULT_MAX_LEVEL),
            settings,
            binder,
            released: true,
        }
    }

    /// Build from a flat, level-major list of `slices_count` images per level.
    ///
    /// A trailing partial level is dropped.
    pub fn create(binder: B, textures: &[S], slices_count: usize) -> Result<Self, MipmapError> {
        let mipmaps = if slices_count == 0 {
            Vec::new()
        } else {
            textures
                .chunks_exact(slices_count)
                .map(<[S]>::to_vec)
                .collect()
        };

        let mut texture = Self::new(binder);
        texture.set_mipmaps(mipmaps)?;
        Ok(texture)
    }

    pub fn mipmaps(&self) -> &[MipmapSet<S>] {
        &self.mipmaps
    }

    /// Store `mipmaps`, derive the upload grid and push it to the binder.
    ///
    /// On [`MipmapError`] the configured [`MismatchPolicy`] decides whether the
    /// texture is cleared or keeps its previous state.
    pub fn set_mipmaps(&mut self, mipmaps: SourceMipmaps<S>) -> Result<(), MipmapError> {
        let previous = std::mem::replace(&mut self.mipmaps, mipmaps);

        match normalize(&self.mipmaps) {
            Ok(generated) => {
                debug!(
                    levels = generated.level_count(),
                    slices = generated.slice_count(),
                    "normalized texture array mipmaps"
                );
                self.apply(generated);
                Ok(())
            }
            Err(err) => {
                error!(%err, policy = ?self.settings.mismatch_policy, "rejected texture array mipmaps");

                match self.settings.mismatch_policy {
                    MismatchPolicy::Clear => self.apply(GeneratedMipmaps::default()),
                    MismatchPolicy::KeepPrevious => self.mipmaps = previous,
                }

                Err(err)
            }
        }
    }

    pub fn generated_mipmaps(&self) -> &GeneratedMipmaps<S> {
        &self.generated
    }

    /// First source set, the slices of a single-set description.
    pub fn image(&self) -> Option<&[S]> {
        self.mipmaps.first().map(Vec::as_slice)
    }

    pub fn set_image(&mut self, image: Option<MipmapSet<S>>) -> Result<(), MipmapError> {
        self.set_mipmaps(image.into_iter().collect())
    }

    pub fn slice_count(&self) -> usize {
        self.generated.slice_count()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> Option<TextureFormat> {
        self.format
    }

    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }

    pub fn base_level(&self) -> u32 {
        self.base_level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn settings(&self) -> &TextureArraySettings {
        &self.settings
    }

    pub fn binder(&self) -> &B {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    pub fn into_binder(self) -> B {
        self.binder
    }

    /// Reconfigure size, format and mip range, then reset the device texture.
    pub fn reset(&mut self, info: TextureArrayCreateInfo) {
        self.width = info.width;
        self.height = info.height;
        self.format = info.format;
        self.mip_level_count = info.mipmap_level.unwrap_or(1);
        self.base_level = info.base_level.unwrap_or(0);
        self.max_level = info.max_level.unwrap_or(DEFAULT_MAX_LEVEL);

        let info = self.texture_info(
            TextureArrayInfo::default().usage,
            self.format,
            self.mip_level_count,
        );
        self.binder.reset(&info);
        self.released = false;
    }

    /// Re-push `count` levels starting at `first_level`; `count == 0` means
    /// every level from `first_level` on.
    pub fn update_mipmaps(&mut self, first_level: u32, count: u32) {
        let level_count = self.generated.level_count();
        let first_level = first_level as usize;
        if first_level >= level_count {
            return;
        }

        let count = match count {
            0 => level_count,
            count => count as usize,
        };
        let count = count.min(level_count - first_level);

        self.assign_levels(first_level, count);
    }

    /// Re-derive from the retained source mipmaps.
    pub fn initialize(&mut self) -> Result<(), MipmapError> {
        let mipmaps = self.mipmaps.clone();
        self.set_mipmaps(mipmaps)
    }

    pub fn on_loaded(&mut self) -> Result<(), MipmapError> {
        self.initialize()
    }

    /// Drop all slice references and the device texture.
    ///
    /// Returns `false` when there was nothing left to release.
    pub fn destroy(&mut self) -> bool {
        self.mipmaps.clear();
        self.generated.clear();

        if self.released {
            return false;
        }

        self.binder.release();
        self.released = true;
        true
    }

    pub fn release_texture(&mut self) -> bool {
        self.destroy()
    }

    pub fn validate(&self) -> bool {
        !self.generated.is_empty()
    }

    pub fn texture_info(
        &self,
        usage: TextureUsages,
        format: Option<TextureFormat>,
        level_count: u32,
    ) -> TextureArrayInfo {
        TextureArrayInfo {
            width: self.width,
            height: self.height,
            format,
            mip_level_count: level_count,
            slice_count: self.slice_count() as u32,
            base_level: self.base_level,
            max_level: self.max_level,
            usage,
        }
    }

    pub fn view_info(
        &self,
        format: Option<TextureFormat>,
        base_level: u32,
        level_count: u32,
    ) -> TextureArrayViewInfo {
        TextureArrayViewInfo {
            base_layer: 0,
            layer_count: self.slice_count() as u32,
            base_level,
            level_count,
            format,
        }
    }

    fn apply(&mut self, generated: GeneratedMipmaps<S>) {
        self.generated = generated;
        let level_count = self.generated.level_count() as u32;

        let info = match self.generated.base() {
            Some(base) => TextureArrayCreateInfo {
                width: base.width(),
                height: base.height(),
                format: Some(base.format()),
                mipmap_level: Some(level_count),
                base_level: Some(self.base_level),
                max_level: Some(self.max_level),
            },
            None => TextureArrayCreateInfo {
                mipmap_level: Some(level_count),
                base_level: Some(self.base_level),
                max_level: Some(self.max_level),
                ..default()
            },
        };
        self.reset(info);

        if self.generated.base().is_some() {
            self.assign_levels(0, self.generated.level_count());
        }
    }

    fn assign_levels(&mut self, first_level: usize, count: usize) {
        let levels = self.generated.levels().iter().enumerate().skip(first_level).take(count);
        for (level, slices) in levels {
            for (slice, image) in slices.iter().enumerate() {
                self.binder.assign_image(image, level as u32, slice as u32);
            }
        }
    }
}

impl<B: TextureArrayBinder<ImageSlice>> TextureArray<ImageSlice, B> {
    /// Single placeholder slice, shown until real slices are loaded.
    pub fn init_default(&mut self) -> Result<(), MipmapError> {
        self.set_mipmaps(vec![vec![Arc::new(checkerboard_image())]])
    }
}

impl<S: MipmapImage, B: TextureArrayBinder<S>> fmt::Display for TextureArray<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<TextureArray | SlicesCount = {} | Dimension = {}x{}>",
            self.slice_count(),
            self.width,
            self.height,
        )
    }
}

impl<S, B> fmt::Debug for TextureArray<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureArray")
            .field("levels", &self.generated.level_count())
            .field("slices", &self.generated.slice_count())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("base_level", &self.base_level)
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}
