use thiserror::Error;

use crate::image::MipmapImage;


/// Images of one mip level, one per array slice in slice order.
pub type MipmapSet<S> = Vec<S>;

/// Caller description of an array texture.
///
/// A single set lists slices that each provide their own mip chain. Two or more
/// sets list base images level by level.
pub type SourceMipmaps<S> = Vec<MipmapSet<S>>;


#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MipmapError {
    #[error("the number of mipmaps of each slice is different: slice {slice} has {found} levels, expected {expected}")]
    LevelMismatch {
        slice: usize,
        expected: usize,
        found: usize,
    },
    #[error("mip level {level} has {found} slices, expected {expected}")]
    SliceCountMismatch {
        level: usize,
        expected: usize,
        found: usize,
    },
}


/// Normalized `levels x slices` grid, level 0 first.
///
/// Every level holds the same number of slices.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMipmaps<S> {
    levels: Vec<MipmapSet<S>>,
}

impl<S> Default for GeneratedMipmaps<S> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<S> GeneratedMipmaps<S> {
    fn from_levels(levels: Vec<MipmapSet<S>>) -> Result<Self, MipmapError> {
        if let Some(expected) = levels.first().map(Vec::len) {
            if let Some((level, slices)) = levels
                .iter()
                .enumerate()
                .find(|(_, slices)| slices.len() != expected)
            {
                return Err(MipmapError::SliceCountMismatch {
                    level,
                    expected,
                    found: slices.len(),
                });
            }
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[MipmapSet<S>] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&[S]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    pub fn get(&self, level: usize, slice: usize) -> Option<&S> {
        self.levels.get(level)?.get(slice)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn slice_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Level 0 image of slice 0, the source of the texture's size and format.
    pub fn base(&self) -> Option<&S> {
        self.get(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// `(level, slice, image)` for every subresource, level-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &S)> {
        self.levels.iter().enumerate().flat_map(|(level, slices)| {
            slices
                .iter()
                .enumerate()
                .map(move |(slice, image)| (level, slice, image))
        })
    }
}


/// Derive the upload grid from a caller description.
///
/// Grid shape selects the extraction: one set transposes each slice's mip
/// chain into levels, several sets keep their level grouping and reduce every
/// image to its base level.
pub fn normalize<S: MipmapImage>(source: &[MipmapSet<S>]) -> Result<GeneratedMipmaps<S>, MipmapError> {
    match source {
        [] => Ok(GeneratedMipmaps::default()),
        [slices] => transpose_chains(slices),
        levels => GeneratedMipmaps::from_levels(
            levels
                .iter()
                .map(|slices| slices.iter().map(MipmapImage::extract_base_level).collect())
                .collect(),
        ),
    }
}

fn transpose_chains<S: MipmapImage>(slices: &[S]) -> Result<GeneratedMipmaps<S>, MipmapError> {
    let chains: Vec<Vec<S>> = slices.iter().map(MipmapImage::extract_mipmaps).collect();
    let max_levels = chains.iter().map(Vec::len).max().unwrap_or(0);

    if let Some((slice, chain)) = chains
        .iter()
        .enumerate()
        .find(|(_, chain)| chain.len() != max_levels)
    {
        return Err(MipmapError::LevelMismatch {
            slice,
            expected: max_levels,
            found: chain.len(),
        });
    }

    let mut chains: Vec<_> = chains.into_iter().map(Vec::into_iter).collect();
    let levels = (0..max_levels)
        .map(|_| chains.iter_mut().filter_map(|chain| chain.next()).collect())
        .collect();

    Ok(GeneratedMipmaps { levels })
}
