use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the sprite sheets and the animation clips cut
/// from them. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Sprite sheets. A sheet's index in this list is its frame source id.
    pub sheets: Vec<SheetDescriptor>,
    /// Clip sets keyed by actor ("player", "enemy", "projectile"), then by clip name.
    #[serde(default)]
    pub clips: HashMap<String, HashMap<String, ClipDescriptor>>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single horizontal-strip sprite sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Human-readable name (e.g., "player_walk").
    pub name: String,
    /// Relative path to the image file.
    pub path: String,
    /// Width of one frame in pixels.
    #[serde(default)]
    pub frame_width: u32,
    /// Height of one frame in pixels.
    #[serde(default)]
    pub frame_height: u32,
}

/// Describes one animation clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDescriptor {
    /// Name of the sheet the frames come from.
    pub sheet: String,
    pub frames: usize,
    pub fps: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

/// Describes an audio asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

fn default_looping() -> bool {
    true
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Index of the sheet named `name`.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sheets": [],
            "sounds": {
                "sword": { "path": "sword.mp3", "event_id": 4 },
                "ambience": { "path": "ambience1.mp3" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["sword"].event_id, Some(4));
        assert_eq!(manifest.sounds["ambience"].event_id, None);
    }

    #[test]
    fn parse_sheets_and_clips() {
        let json = r#"{
            "sheets": [
                { "name": "slime", "path": "slime.png", "frame_width": 25, "frame_height": 32 }
            ],
            "clips": {
                "enemy": {
                    "hop": { "sheet": "slime", "frames": 3, "fps": 6 },
                    "die": { "sheet": "slime", "frames": 4, "fps": 10, "looping": false }
                }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sheet_index("slime"), Some(0));
        assert_eq!(manifest.sheet_index("missing"), None);
        let enemy = &manifest.clips["enemy"];
        assert!(enemy["hop"].looping);
        assert!(!enemy["die"].looping);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AssetManifest::from_json("{ \"sheets\": 3 }").is_err());
    }
}
