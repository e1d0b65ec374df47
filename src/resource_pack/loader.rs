//! Resource pack loading from ZIP files and directories.
//!
//! Font definitions are read first; only the textures those fonts draw
//! from are decoded afterwards.

use super::{FontDefinition, ResourcePack};
use crate::error::{Error, Result};
use crate::resource_pack::texture::load_texture_from_bytes;
use crate::types::parse_resource_location;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Load a resource pack from a file path.
///
/// Supports both ZIP files and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourcePack> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load a resource pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = ResourcePack::new();

    // Fonts first, so that only the textures they use get decoded
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let file_path = file.name().to_string();

        if let Some((namespace, "font", asset_path)) = parse_asset_path(&file_path) {
            if let Some(font_path) = asset_path.strip_suffix(".json") {
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                add_font(&mut pack, namespace, font_path, &contents);
            }
        }
    }

    let wanted: HashSet<String> = pack.referenced_textures().into_iter().collect();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let file_path = file.name().to_string();

        if let Some((namespace, "textures", asset_path)) = parse_asset_path(&file_path) {
            let Some(texture_path) = asset_path.strip_suffix(".png") else {
                continue;
            };
            if !wanted.contains(&format!("{}:{}", namespace, texture_path)) {
                continue;
            }
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            add_texture(&mut pack, namespace, texture_path, &data);
        }
    }

    log_summary(&pack);
    Ok(pack)
}

/// Load a resource pack from a directory.
fn load_from_directory(path: &Path) -> Result<ResourcePack> {
    let mut pack = ResourcePack::new();

    // Look for assets directory
    let assets_path = path.join("assets");
    if !assets_path.exists() {
        return Err(Error::InvalidResourcePack(
            "No assets directory found".to_string(),
        ));
    }

    // Iterate through namespaces
    for namespace_entry in std::fs::read_dir(&assets_path)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }

        let namespace = namespace_entry
            .file_name()
            .to_string_lossy()
            .to_string();

        let font_path = namespace_entry.path().join("font");
        if font_path.exists() {
            load_json_files_recursive(&font_path, &font_path, &mut |font_id, contents| {
                add_font(&mut pack, &namespace, font_id, contents);
            })?;
        }
    }

    // Load the textures fonts reference
    for texture in pack.referenced_textures() {
        let (namespace, texture_path) = parse_resource_location(&texture);
        if !is_contained(namespace) || !is_contained(texture_path) {
            log::warn!("Skipping texture {} outside the pack", texture);
            continue;
        }
        let file = assets_path
            .join(namespace)
            .join("textures")
            .join(format!("{}.png", texture_path));
        if !file.is_file() {
            continue;
        }
        let data = std::fs::read(&file)?;
        add_texture(&mut pack, namespace, texture_path, &data);
    }

    log_summary(&pack);
    Ok(pack)
}

fn add_font(pack: &mut ResourcePack, namespace: &str, font_path: &str, contents: &str) {
    match serde_json::from_str::<FontDefinition>(contents) {
        Ok(font) => pack.add_font(namespace, font_path, font),
        Err(e) => log::warn!("Failed to parse font {}:{}: {}", namespace, font_path, e),
    }
}

fn add_texture(pack: &mut ResourcePack, namespace: &str, texture_path: &str, data: &[u8]) {
    match load_texture_from_bytes(data) {
        Ok(texture) => pack.add_texture(namespace, texture_path, texture),
        Err(e) => log::warn!("Failed to load texture {}:{}: {}", namespace, texture_path, e),
    }
}

fn log_summary(pack: &ResourcePack) {
    log::debug!(
        "Loaded resource pack with {} fonts and {} font textures",
        pack.font_count(),
        pack.texture_count()
    );
}

/// Parse an asset path from a ZIP file.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Whether a location segment stays below the directory it is joined to.
fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && !path.contains(':')
        && path.split('/').all(|part| part != ".." && part != ".")
}

/// Load JSON files recursively from a directory.
fn load_json_files_recursive<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &str),
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            load_json_files_recursive(base, &path, handler)?;
        } else if path.extension().is_some_and(|e| e == "json") {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");

            let contents = std::fs::read_to_string(&path)?;
            handler(&relative, &contents);
        }
    }
    Ok(())
}
