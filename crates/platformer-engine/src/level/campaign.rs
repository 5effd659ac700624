use serde::Deserialize;

use super::map::{LevelDescriptor, LevelError};

/// Tile edge used by the built-in maps.
pub const TILE_SIZE: f32 = 64.0;

const MEADOW: [&str; 11] = [
    "................................................",
    "................................................",
    "................................................",
    "......................*.........................",
    "....................2222........................",
    "................................................",
    "................................................",
    ".P...........222...............A.......222......",
    "................................................",
    "........E.......A.....E....S...E...E.......E..F.",
    "111111111111111111111111..1111111111111111111111",
];

const MARSH: [&str; 11] = [
    "........................................................",
    "........................................................",
    "........................................................",
    "...........................*............................",
    "..........................333...........................",
    "........................................................",
    "........................................................",
    ".P............33.....................3333...............",
    "........................................................",
    "......E....E.....WW.....E...A...E.....S.S.....E...E..F..",
    "11111111111111111111111..111111111111111111...1111111111",
];

const RIDGE: [&str; 11] = [
    "................................................................",
    "................................................................",
    "................................................................",
    ".........................................*......................",
    "........................................444.....................",
    "................................................................",
    "................................................................",
    ".P................444.............444...........................",
    "................................................................",
    "....E...E....A....E..E...SS....E....E..E..WW...E...A...E..E...F.",
    "4444444444444444444444444444..44444444444444444444...55555555555",
];

/// Ordered list of levels played in sequence.
#[derive(Debug, Clone, Default)]
pub struct Campaign {
    levels: Vec<LevelDescriptor>,
}

/// JSON shape accepted by [`Campaign::from_json`].
#[derive(Deserialize)]
struct CampaignFile {
    levels: Vec<LevelDescriptor>,
}

impl Campaign {
    pub fn new(levels: Vec<LevelDescriptor>) -> Self {
        Self { levels }
    }

    /// The three bundled levels.
    pub fn builtin() -> Result<Self, LevelError> {
        let levels = vec![
            LevelDescriptor::from_ascii("Meadow", &MEADOW, TILE_SIZE)?.with_background(0),
            LevelDescriptor::from_ascii("Marsh", &MARSH, TILE_SIZE)?.with_background(1),
            LevelDescriptor::from_ascii("Ridge", &RIDGE, TILE_SIZE)?.with_background(0),
        ];
        Ok(Self { levels })
    }

    /// `{ "levels": [ <LevelDescriptor>, ... ] }`
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: CampaignFile = serde_json::from_str(json)?;
        for level in &file.levels {
            level.validate()?;
        }
        log::info!("loaded campaign with {} levels", file.levels.len());
        Ok(Self { levels: file.levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDescriptor> {
        self.levels.get(index)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }

    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::map::SpawnKind;

    #[test]
    fn builtin_levels_are_playable() {
        let campaign = Campaign::builtin().unwrap();
        assert_eq!(campaign.len(), 3);
        for level in campaign.levels() {
            assert_eq!(level.count(SpawnKind::Player), 1, "{}", level.name);
            assert_eq!(level.count(SpawnKind::Flag), 1, "{}", level.name);
            assert!(level.count(SpawnKind::Enemy) >= 5, "{}", level.name);
            assert_eq!(level.rows, 11);
        }
        let enemies: Vec<usize> = campaign.levels().iter().map(|l| l.count(SpawnKind::Enemy)).collect();
        assert_eq!(enemies, vec![5, 6, 11]);
        assert_eq!(campaign.get(1).unwrap().background, 1);
        assert!(campaign.is_last(2));
        assert!(!campaign.is_last(0));
        assert!(campaign.get(3).is_none());
    }

    #[test]
    fn levels_get_wider() {
        let campaign = Campaign::builtin().unwrap();
        let widths: Vec<f32> = campaign.levels().iter().map(|l| l.width()).collect();
        assert_eq!(widths, vec![3072.0, 3584.0, 4096.0]);
    }

    #[test]
    fn campaign_from_json() {
        let json = r#"{ "levels": [
            { "name": "a", "tile_size": 64, "columns": 2, "rows": 1, "spawns": [] },
            { "name": "b", "tile_size": 64, "columns": 3, "rows": 1, "background": 2, "spawns": [] }
        ] }"#;
        let campaign = Campaign::from_json(json).unwrap();
        assert_eq!(campaign.len(), 2);
        assert_eq!(campaign.get(1).unwrap().background, 2);
        assert!(Campaign::from_json("{}").is_err());
    }

    #[test]
    fn campaign_rejects_zero_tile_size() {
        let json = r#"{ "levels": [
            { "name": "ok", "tile_size": 64, "columns": 2, "rows": 1, "spawns": [] },
            { "name": "flat", "tile_size": 0, "columns": 2, "rows": 1, "spawns": [] }
        ] }"#;
        assert!(matches!(Campaign::from_json(json), Err(LevelError::BadTileSize(_))));
    }
}
