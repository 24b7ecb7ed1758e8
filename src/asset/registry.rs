//! Asset registry - loading and caching of block textures

use std::collections::HashMap;
use macroquad::prelude::*;
use crate::world::BlockKind;

/// Directory block textures are loaded from
pub const TEXTURES_DIR: &str = "assets/textures";

/// Edge length of generated placeholder textures
const PLACEHOLDER_SIZE: u16 = 64;

/// Image file backing a block kind. Several kinds share one sheet.
pub fn texture_file(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Grass => "grass.png",
        BlockKind::Netherrack | BlockKind::SoulSand => "nether.png",
        BlockKind::EndStone | BlockKind::Obsidian => "end.png",
        BlockKind::Diamond | BlockKind::Lapis => "lapis.png",
        BlockKind::Emerald => "emerald.png",
        BlockKind::Gold => "gold.png",
        BlockKind::Purple => "purple.png",
    }
}

/// Solid RGBA colour used when the texture file is missing
pub fn placeholder_color(kind: BlockKind) -> [u8; 4] {
    match kind {
        BlockKind::Grass => [34, 139, 34, 255],
        BlockKind::Netherrack | BlockKind::SoulSand => [20, 20, 20, 255],
        BlockKind::EndStone | BlockKind::Obsidian => [238, 232, 205, 255],
        BlockKind::Diamond => [0, 191, 255, 255],
        BlockKind::Emerald => [80, 200, 120, 255],
        BlockKind::Gold => [255, 215, 0, 255],
        BlockKind::Purple => [128, 0, 128, 255],
        BlockKind::Lapis => [38, 97, 156, 255],
    }
}

/// Textures keyed by block identifier (`BlockKind::id`)
#[derive(Default)]
pub struct AssetRegistry {
    textures: HashMap<String, Texture2D>,
    /// Identifiers that fell back to a placeholder
    placeholders: Vec<String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture for every block kind. Returns how many came from disk.
    pub async fn load_all(&mut self) -> usize {
        let mut loaded = 0;
        for kind in BlockKind::ALL {
            if self.load(kind).await {
                loaded += 1;
            }
        }
        println!(
            "Assets: loaded {} textures, {} placeholders",
            loaded,
            self.placeholders.len()
        );
        loaded
    }

    /// Load the texture for `kind`, falling back to a placeholder.
    /// Returns true if the file was loaded.
    pub async fn load(&mut self, kind: BlockKind) -> bool {
        let path = format!("{}/{}", TEXTURES_DIR, texture_file(kind));
        match load_texture(&path).await {
            Ok(tex) => {
                tex.set_filter(FilterMode::Nearest);
                self.insert(kind.id(), tex);
                true
            }
            Err(e) => {
                eprintln!("Assets: could not load {} for {}: {}", path, kind.id(), e);
                self.insert_placeholder(kind);
                false
            }
        }
    }

    fn insert_placeholder(&mut self, kind: BlockKind) {
        let [r, g, b, a] = placeholder_color(kind);
        let image = Image::gen_image_color(
            PLACEHOLDER_SIZE,
            PLACEHOLDER_SIZE,
            Color::from_rgba(r, g, b, a),
        );
        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);
        self.insert(kind.id(), tex);
        self.placeholders.push(kind.id().to_string());
    }

    /// Add a texture. Replaces any texture with the same identifier.
    pub fn insert(&mut self, id: &str, texture: Texture2D) {
        self.textures.insert(id.to_string(), texture);
    }

    pub fn get(&self, id: &str) -> Option<&Texture2D> {
        self.textures.get(id)
    }

    pub fn texture(&self, kind: BlockKind) -> Option<&Texture2D> {
        self.get(kind.id())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_texture_sheets() {
        assert_eq!(texture_file(BlockKind::Netherrack), texture_file(BlockKind::SoulSand));
        assert_eq!(texture_file(BlockKind::EndStone), texture_file(BlockKind::Obsidian));
        assert_eq!(texture_file(BlockKind::Diamond), "lapis.png");
    }

    #[test]
    fn test_every_kind_has_a_file_and_colour() {
        for kind in BlockKind::ALL {
            assert!(texture_file(kind).ends_with(".png"));
            assert_eq!(placeholder_color(kind)[3], 255);
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = AssetRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("grass").is_none());
        assert!(registry.placeholders.is_empty());
    }
}
