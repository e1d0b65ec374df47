//! Resource pack loading and parsing.
//!
//! This module loads the parts of a Minecraft resource pack (ZIP file or
//! directory) that text layout needs: font definitions and the textures
//! their bitmap providers draw from.

pub mod font;
pub mod loader;
pub mod texture;

pub use font::{FontDefinition, FontProvider};
pub use texture::TextureData;

use crate::types::parse_resource_location;
use std::collections::HashMap;

/// A loaded Minecraft resource pack.
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    /// Font definitions by namespace and font path.
    /// Key: namespace (e.g., "minecraft"), Value: map of font path to definition.
    pub fonts: HashMap<String, HashMap<String, FontDefinition>>,

    /// Texture data by namespace and texture path.
    /// Key: namespace, Value: map of texture_path to data.
    pub textures: HashMap<String, HashMap<String, TextureData>>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a font by full resource location (e.g., "minecraft:default").
    pub fn get_font(&self, resource_location: &str) -> Option<&FontDefinition> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.fonts.get(namespace).and_then(|ns| ns.get(path))
    }

    /// Get a texture by full resource location (e.g., "minecraft:font/ascii").
    pub fn get_texture(&self, resource_location: &str) -> Option<&TextureData> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.textures.get(namespace).and_then(|ns| ns.get(path))
    }

    /// Add a font definition.
    pub fn add_font(&mut self, namespace: &str, font_path: &str, font: FontDefinition) {
        self.fonts
            .entry(namespace.to_string())
            .or_default()
            .insert(font_path.to_string(), font);
    }

    /// Add a texture.
    pub fn add_texture(&mut self, namespace: &str, texture_path: &str, texture: TextureData) {
        self.textures
            .entry(namespace.to_string())
            .or_default()
            .insert(texture_path.to_string(), texture);
    }

    /// All font ids, sorted.
    pub fn font_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .fonts
            .iter()
            .flat_map(|(ns, fonts)| fonts.keys().map(move |path| format!("{}:{}", ns, path)))
            .collect();
        ids.sort();
        ids
    }

    /// Get the total number of font definitions.
    pub fn font_count(&self) -> usize {
        self.fonts.values().map(|m| m.len()).sum()
    }

    /// Get the total number of textures.
    pub fn texture_count(&self) -> usize {
        self.textures.values().map(|m| m.len()).sum()
    }

    /// Textures referenced by any font, as `namespace:path` without `.png`.
    pub fn referenced_textures(&self) -> Vec<String> {
        let mut textures: Vec<String> = self
            .fonts
            .values()
            .flat_map(|fonts| fonts.values())
            .flat_map(FontDefinition::textures)
            .collect();
        textures.sort();
        textures.dedup();
        textures
    }
}
