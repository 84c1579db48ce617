use std::collections::HashMap;
use crate::assets::error::AssetError;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{SpriteComponent, AtlasId};

/// Registry of named sprites, built from an AssetManifest.
/// Provides name-based sprite lookup for game code.
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let sprites = manifest
            .sprites
            .iter()
            .map(|(name, desc)| {
                let sprite = SpriteComponent::new(
                    AtlasId(desc.atlas),
                    desc.col as f32,
                    desc.row as f32,
                );
                (name.clone(), sprite)
            })
            .collect();
        Self { sprites }
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Look up a sprite the game cannot run without.
    pub fn require(&self, name: &str) -> Result<SpriteComponent, AssetError> {
        self.get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownSprite(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "player", "cols": 8, "rows": 2, "path": "player.png" }
            ],
            "sprites": {
                "player_walk3": { "atlas": 0, "col": 3, "row": 1 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = SpriteRegistry::from_manifest(&manifest);
        assert_eq!(reg.len(), 1);

        let walk = reg.get("player_walk3").expect("walk frame should exist");
        assert_eq!(walk.atlas, AtlasId(0));
        assert_eq!(walk.col, 3.0);
        assert_eq!(walk.row, 1.0);
        assert_eq!(walk.alpha, 1.0);
        assert!(!walk.flip_x);
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get("nonexistent").is_none());
    }

    #[test]
    fn require_reports_missing_name() {
        let reg = SpriteRegistry::new();
        match reg.require("player_idle") {
            Err(AssetError::UnknownSprite(name)) => assert_eq!(name, "player_idle"),
            other => panic!("expected UnknownSprite, got {:?}", other),
        }
    }
}
