//! Level descriptors and the ASCII tile-map format.
//!
//! One character per tile, rows top to bottom:
//!
//! ```text
//! 1-5  platform tile (the digit picks the tile graphic)
//! P    player spawn          E  slime
//! S    spikes                W  water
//! A    apple (heal)          *  star (boost)
//! F    goal flag             ' ' or '.'  empty
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player spawn used when a map has no `P`.
pub const DEFAULT_PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 100.0);

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level '{0}' has no rows")]
    Empty(String),
    #[error("unknown tile '{ch}' at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },
    #[error("second player spawn at row {row}, column {column}")]
    DuplicatePlayer { row: usize, column: usize },
    #[error("tile size must be positive, got {0}")]
    BadTileSize(f32),
    #[error("malformed level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a tile spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnKind {
    Platform { tile: u8 },
    Player,
    Enemy,
    Spike,
    Water,
    Apple,
    Star,
    Flag,
}

impl SpawnKind {
    fn from_tile(ch: char) -> Option<Self> {
        let kind = match ch {
            '1'..='5' => SpawnKind::Platform { tile: ch as u8 - b'0' },
            'P' => SpawnKind::Player,
            'E' => SpawnKind::Enemy,
            'S' => SpawnKind::Spike,
            'W' => SpawnKind::Water,
            'A' => SpawnKind::Apple,
            '*' => SpawnKind::Star,
            'F' => SpawnKind::Flag,
            _ => return None,
        };
        Some(kind)
    }
}

/// A spawn point: what, and the top-left corner in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub x: f32,
    pub y: f32,
}

impl Spawn {
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Parsed level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub name: String,
    pub tile_size: f32,
    pub columns: usize,
    pub rows: usize,
    /// Background image index for the host.
    #[serde(default)]
    pub background: u32,
    pub spawns: Vec<Spawn>,
}

impl LevelDescriptor {
    /// Parse an ASCII map. Rows may have different lengths; the widest row
    /// sets the level width.
    pub fn from_ascii(name: &str, rows: &[&str], tile_size: f32) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty(name.to_string()));
        }
        if tile_size <= 0.0 || !tile_size.is_finite() {
            return Err(LevelError::BadTileSize(tile_size));
        }

        let mut spawns = Vec::new();
        let mut player_at: Option<(usize, usize)> = None;
        let mut columns = 0;

        for (row, line) in rows.iter().enumerate() {
            columns = columns.max(line.chars().count());
            for (column, ch) in line.chars().enumerate() {
                if ch == ' ' || ch == '.' {
                    continue;
                }
                let kind = SpawnKind::from_tile(ch).ok_or(LevelError::UnknownTile { ch, row, column })?;
                if kind == SpawnKind::Player {
                    if player_at.is_some() {
                        return Err(LevelError::DuplicatePlayer { row, column });
                    }
                    player_at = Some((row, column));
                }
                spawns.push(Spawn {
                    kind,
                    x: column as f32 * tile_size,
                    y: row as f32 * tile_size,
                });
            }
        }

        log::debug!("parsed level '{}': {} spawns", name, spawns.len());
        Ok(Self {
            name: name.to_string(),
            tile_size,
            columns,
            rows: rows.len(),
            background: 0,
            spawns,
        })
    }

    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Checks what serde cannot: a usable tile size.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.tile_size <= 0.0 || !self.tile_size.is_finite() {
            return Err(LevelError::BadTileSize(self.tile_size));
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// The `P` tile, or [`DEFAULT_PLAYER_SPAWN`].
    pub fn player_spawn(&self) -> Vec2 {
        self.spawns
            .iter()
            .find(|s| s.kind == SpawnKind::Player)
            .map(Spawn::origin)
            .unwrap_or(DEFAULT_PLAYER_SPAWN)
    }

    pub fn count(&self, kind: SpawnKind) -> usize {
        self.spawns.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tiles_into_spawns() {
        let rows = [
            "    A   F",
            " P  E  *.",
            "1111 2233",
        ];
        let level = LevelDescriptor::from_ascii("test", &rows, 64.0).unwrap();
        assert_eq!(level.columns, 9);
        assert_eq!(level.rows, 3);
        assert_eq!(level.width(), 576.0);
        assert_eq!(level.height(), 192.0);
        assert_eq!(level.player_spawn(), Vec2::new(64.0, 64.0));
        assert_eq!(level.count(SpawnKind::Enemy), 1);
        assert_eq!(level.count(SpawnKind::Platform { tile: 1 }), 4);
        assert_eq!(level.count(SpawnKind::Platform { tile: 3 }), 2);
        assert_eq!(level.count(SpawnKind::Flag), 1);
        let apple = level.spawns.iter().find(|s| s.kind == SpawnKind::Apple).unwrap();
        assert_eq!(apple.origin(), Vec2::new(256.0, 0.0));
    }

    #[test]
    fn missing_player_uses_default_spawn() {
        let level = LevelDescriptor::from_ascii("empty", &["    ", "1111"], 64.0).unwrap();
        assert_eq!(level.player_spawn(), DEFAULT_PLAYER_SPAWN);
    }

    #[test]
    fn unknown_tile_is_an_error() {
        let err = LevelDescriptor::from_ascii("bad", &["  ", " Q"], 64.0).unwrap_err();
        assert!(matches!(err, LevelError::UnknownTile { ch: 'Q', row: 1, column: 1 }));
    }

    #[test]
    fn duplicate_player_is_an_error() {
        let err = LevelDescriptor::from_ascii("two", &["P  P"], 64.0).unwrap_err();
        assert!(matches!(err, LevelError::DuplicatePlayer { row: 0, column: 3 }));
    }

    #[test]
    fn empty_and_bad_tile_size_are_errors() {
        assert!(matches!(LevelDescriptor::from_ascii("e", &[], 64.0), Err(LevelError::Empty(_))));
        assert!(matches!(
            LevelDescriptor::from_ascii("z", &["1"], 0.0),
            Err(LevelError::BadTileSize(_))
        ));
    }

    #[test]
    fn json_descriptor() {
        let json = r#"{
            "name": "tiny",
            "tile_size": 32,
            "columns": 4,
            "rows": 2,
            "spawns": [
                { "kind": { "type": "player" }, "x": 0, "y": 0 },
                { "kind": { "type": "platform", "tile": 2 }, "x": 0, "y": 32 }
            ]
        }"#;
        let level = LevelDescriptor::from_json(json).unwrap();
        assert_eq!(level.background, 0);
        assert_eq!(level.width(), 128.0);
        assert_eq!(level.count(SpawnKind::Platform { tile: 2 }), 1);
        assert!(matches!(LevelDescriptor::from_json("[]"), Err(LevelError::Json(_))));
    }

    #[test]
    fn json_descriptor_needs_positive_tile_size() {
        for tile_size in ["0", "-16"] {
            let json = format!(r#"{{ "name": "flat", "tile_size": {tile_size}, "columns": 2, "rows": 1, "spawns": [] }}"#);
            assert!(matches!(LevelDescriptor::from_json(&json), Err(LevelError::BadTileSize(_))));
        }
    }
}
