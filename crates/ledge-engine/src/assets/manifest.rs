use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use super::error::AssetError;

/// Asset manifest describing all atlases, named sprites and sounds for a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "tiles").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the image file.
    pub path: String,
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string. Sound event ids must fit the
    /// host's one-byte sound buffer.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let manifest: AssetManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), AssetError> {
        for (name, sound) in &self.sounds {
            if let Some(event_id) = sound.event_id {
                if u8::try_from(event_id).is_err() {
                    return Err(AssetError::SoundEventOutOfRange {
                        name: name.clone(),
                        event_id,
                    });
                }
            }
        }
        Ok(())
    }

    /// Index of the atlas with the given name.
    pub fn atlas_index(&self, name: &str) -> Option<u32> {
        self.atlases
            .iter()
            .position(|a| a.name == name)
            .map(|i| i as u32)
    }

    /// Event id of a named sound, if the sound declares one.
    pub fn sound_event(&self, name: &str) -> Option<u32> {
        self.sounds.get(name).and_then(|s| s.event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "atlases": [],
            "sounds": {
                "gem": { "path": "coin1.wav", "event_id": 3 },
                "jump": { "path": "jump1.wav" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["gem"].path, "coin1.wav");
        assert_eq!(manifest.sound_event("gem"), Some(3));
        assert_eq!(manifest.sound_event("jump"), None);
        assert_eq!(manifest.sound_event("missing"), None);
    }

    #[test]
    fn atlas_lookup_by_name() {
        let json = r#"{
            "atlases": [
                { "name": "player", "cols": 8, "rows": 2, "path": "player.png" },
                { "name": "tiles", "cols": 16, "rows": 8, "path": "tiles.png" }
            ],
            "sprites": {
                "player_idle": { "atlas": 0, "col": 0, "row": 0 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases[1].cols, 16);
        assert_eq!(manifest.atlas_index("tiles"), Some(1));
        assert_eq!(manifest.atlas_index("ui"), None);
        assert_eq!(manifest.sprites["player_idle"].atlas, 0);
    }

    #[test]
    fn sound_event_ids_must_fit_a_byte() {
        let json = r#"{ "sounds": { "gem": { "path": "coin1.wav", "event_id": 255 } } }"#;
        assert_eq!(AssetManifest::from_json(json).unwrap().sound_event("gem"), Some(255));

        let json = r#"{ "sounds": { "gem": { "path": "coin1.wav", "event_id": 257 } } }"#;
        match AssetManifest::from_json(json) {
            Err(AssetError::SoundEventOutOfRange { name, event_id }) => {
                assert_eq!(name, "gem");
                assert_eq!(event_id, 257);
            }
            other => panic!("expected out-of-range sound, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_an_asset_error() {
        assert!(matches!(
            AssetManifest::from_json("{ \"atlases\": 5 }"),
            Err(AssetError::Manifest(_))
        ));
    }
}
