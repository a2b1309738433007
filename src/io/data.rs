use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    io::TextureArrayIoError,
    mipmap::{MipmapSet, SourceMipmaps},
};


/// Persisted form of a texture array.
///
/// `mipmaps[level][slice]` is the reference of the image backing that slice;
/// a single level lists slices that carry their own mip chains.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Reflect,
    Serialize,
    Deserialize,
)]
pub struct TextureArrayData {
    /// Reference of the base texture asset this array was saved from.
    pub base: String,
    pub slice: u32,
    pub mipmaps: Vec<Vec<String>>,
}

impl TextureArrayData {
    pub fn from_source<S>(
        base: impl Into<String>,
        source: &[MipmapSet<S>],
        mut reference_of: impl FnMut(&S) -> String,
    ) -> Self {
        let slice = source.first().map_or(0, Vec::len) as u32;
        let mipmaps = source
            .iter()
            .map(|slices| slices.iter().map(&mut reference_of).collect())
            .collect();

        Self {
            base: base.into(),
            slice,
            mipmaps,
        }
    }

    /// Group a flat, level-major list of references into levels of `slice`
    /// references. A trailing partial level is dropped.
    pub fn from_references(
        base: impl Into<String>,
        slice: u32,
        references: impl IntoIterator<Item = String>,
    ) -> Self {
        let references: Vec<String> = references.into_iter().collect();
        let mipmaps = match slice {
            0 => Vec::new(),
            slice => references
                .chunks_exact(slice as usize)
                .map(<[String]>::to_vec)
                .collect(),
        };

        Self {
            base: base.into(),
            slice,
            mipmaps,
        }
    }

    pub fn level_count(&self) -> usize {
        self.mipmaps.len()
    }

    /// Every level must list at least `slice` references.
    pub fn validate(&self) -> Result<(), TextureArrayIoError> {
        let expected = self.slice as usize;

        match self
            .mipmaps
            .iter()
            .enumerate()
            .find(|(_, references)| references.len() < expected)
        {
            Some((level, references)) => Err(TextureArrayIoError::SliceCountMismatch {
                level,
                expected,
                found: references.len(),
            }),
            None => Ok(()),
        }
    }

    /// Source grid shaped like the persisted form, one placeholder per slice.
    ///
    /// `placeholder` receives `(level, slice, reference)`; the image payload is
    /// filled in once the referenced images are loaded.
    pub fn placeholder_source<S>(
        &self,
        mut placeholder: impl FnMut(usize, usize, &str) -> S,
    ) -> SourceMipmaps<S> {
        self.mipmaps
            .iter()
            .enumerate()
            .map(|(level, references)| {
                references
                    .iter()
                    .take(self.slice as usize)
                    .enumerate()
                    .map(|(slice, reference)| placeholder(level, slice, reference))
                    .collect()
            })
            .collect()
    }
}
