#![allow(dead_code)]

use bevy_texture_array::{MipmapImage, TextureArrayBinder, TextureArrayInfo};
use wgpu::TextureFormat;


/// Image stand-in that knows how many mip levels it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestImage {
    pub name: String,
    pub level: u32,
    pub width: u32,
    pub height: u32,
    pub levels: u32,
}

impl TestImage {
    pub fn new(name: &str, width: u32, height: u32, levels: u32) -> Self {
        Self {
            name: name.to_string(),
            level: 0,
            width,
            height,
            levels,
        }
    }

    pub fn at_level(&self, level: u32) -> Self {
        Self {
            name: self.name.clone(),
            level,
            width: (self.width >> level).max(1),
            height: (self.height >> level).max(1),
            levels: 1,
        }
    }

    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.level)
    }
}

impl MipmapImage for TestImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::Rgba8Unorm
    }

    fn extract_mipmaps(&self) -> Vec<Self> {
        (0..self.levels).map(|level| self.at_level(level)).collect()
    }

    fn extract_base_level(&self) -> Self {
        self.at_level(0)
    }
}


#[derive(Debug, Default)]
pub struct RecordingBinder {
    pub resets: Vec<TextureArrayInfo>,
    pub assignments: Vec<(String, u32, u32)>,
    pub releases: usize,
}

impl RecordingBinder {
    pub fn last_reset(&self) -> &TextureArrayInfo {
        self.resets.last().expect("binder was never reset")
    }

    pub fn assigned_levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.assignments.iter().map(|(_, level, _)| *level).collect();
        levels.dedup();
        levels
    }
}

impl TextureArrayBinder<TestImage> for RecordingBinder {
    fn reset(&mut self, info: &TextureArrayInfo) {
        self.resets.push(*info);
    }

    fn assign_image(&mut self, image: &TestImage, level: u32, slice: u32) {
        self.assignments.push((image.label(), level, slice));
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}


pub fn square_slices(names: &[&str], size: u32, levels: u32) -> Vec<TestImage> {
    names
        .iter()
        .map(|name| TestImage::new(name, size, size, levels))
        .collect()
}
