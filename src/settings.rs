use bevy::prelude::*;
use serde::{Deserialize, Serialize};


/// What a texture array keeps when its new mipmaps are rejected.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Reflect,
    Serialize,
    Deserialize,
)]
pub enum MismatchPolicy {
    /// Reset to an empty, zero-sized texture.
    #[default]
    Clear,
    /// Keep the last accepted mipmaps and device texture.
    KeepPrevious,
}


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
#[serde(default)]
pub struct TextureArraySettings {
    pub base_level: Option<u32>,
    pub max_level: Option<u32>,
    pub mismatch_policy: MismatchPolicy,
}
