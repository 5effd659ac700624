//! Clip sets for each actor, built in or loaded from a manifest.

use std::collections::HashMap;

use thiserror::Error;

use crate::assets::manifest::AssetManifest;
use crate::components::animation::AnimationDef;
use crate::components::sprite::{sheets, FrameSource};
use crate::components::{enemy, player, projectile};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed asset manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clip '{actor}.{clip}' references unknown sheet '{sheet}'")]
    UnknownSheet {
        actor: String,
        clip: String,
        sheet: String,
    },
    #[error("clip '{actor}.{clip}' has no frames")]
    EmptyClip { actor: String, clip: String },
}

pub type ClipSet = HashMap<String, AnimationDef>;

pub const PLAYER: &str = "player";
pub const ENEMY: &str = "enemy";
pub const PROJECTILE: &str = "projectile";

/// Manifest sheet names for the non-animated art.
pub const TILESET_SHEET: &str = "tileset";
pub const PICKUPS_SHEET: &str = "pickups";
pub const FLAG_SHEET: &str = "flag";

/// Frame sources for static art: platform tiles, pickups and the goal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSheets {
    pub tileset: FrameSource,
    pub pickups: FrameSource,
    pub flag: FrameSource,
}

impl Default for StaticSheets {
    fn default() -> Self {
        Self {
            tileset: sheets::TILESET,
            pickups: sheets::PICKUPS,
            flag: sheets::FLAG,
        }
    }
}

/// Animation definitions per actor kind. Each spawned entity receives its
/// own copy so animators never share state.
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    player: ClipSet,
    enemy: ClipSet,
    projectile: ClipSet,
    statics: StaticSheets,
}

impl AnimationLibrary {
    /// The stock clip set for the built-in sheet ids.
    pub fn builtin() -> Self {
        let mut lib = Self::default();

        let p = &mut lib.player;
        p.insert(player::clips::IDLE.into(), AnimationDef::looped(sheets::PLAYER_WALK, 1, 1.0));
        p.insert(player::clips::WALK.into(), AnimationDef::looped(sheets::PLAYER_WALK, 8, 10.0));
        p.insert(player::clips::RUN.into(), AnimationDef::looped(sheets::PLAYER_RUN, 8, 15.0));
        p.insert(player::clips::JUMP.into(), AnimationDef::once(sheets::PLAYER_JUMP, 6, 10.0));
        p.insert(player::clips::HURT.into(), AnimationDef::once(sheets::PLAYER_HURT, 2, 10.0));
        p.insert(player::clips::DEAD.into(), AnimationDef::once(sheets::PLAYER_DEAD, 6, 8.0));
        p.insert(player::clips::ATTACK_1.into(), AnimationDef::once(sheets::PLAYER_ATTACK_1, 5, 15.0));
        p.insert(player::clips::ATTACK_2.into(), AnimationDef::once(sheets::PLAYER_ATTACK_2, 4, 15.0));
        p.insert(player::clips::ATTACK_3.into(), AnimationDef::once(sheets::PLAYER_ATTACK_3, 4, 15.0));
        p.insert(player::clips::RUN_ATTACK.into(), AnimationDef::once(sheets::PLAYER_RUN_ATTACK, 6, 15.0));

        let e = &mut lib.enemy;
        e.insert(enemy::clips::IDLE.into(), AnimationDef::looped(sheets::SLIME, 1, 1.0));
        e.insert(enemy::clips::HOP.into(), AnimationDef::looped(sheets::SLIME, 3, 6.0));
        e.insert(enemy::clips::DIE.into(), AnimationDef::once(sheets::SLIME, 4, 10.0));

        lib.projectile
            .insert(projectile::FLY_CLIP.into(), AnimationDef::looped(sheets::FIREBALL, 6, 12.0));

        lib
    }

    /// Build from a manifest. Actor sets missing from the manifest fall back
    /// to the built-in clips.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut lib = Self::builtin();
        let resolve = |name: &str, fallback: FrameSource| match manifest.sheet_index(name) {
            Some(index) => FrameSource(index as u32),
            None => {
                log::warn!("manifest has no '{}' sheet; keeping source {}", name, fallback.0);
                fallback
            }
        };
        lib.statics = StaticSheets {
            tileset: resolve(TILESET_SHEET, lib.statics.tileset),
            pickups: resolve(PICKUPS_SHEET, lib.statics.pickups),
            flag: resolve(FLAG_SHEET, lib.statics.flag),
        };

        for (actor, clips) in &manifest.clips {
            let mut set = ClipSet::with_capacity(clips.len());
            for (name, desc) in clips {
                let sheet = manifest.sheet_index(&desc.sheet).ok_or_else(|| {
                    AssetError::UnknownSheet {
                        actor: actor.clone(),
                        clip: name.clone(),
                        sheet: desc.sheet.clone(),
                    }
                })?;
                if desc.frames == 0 {
                    return Err(AssetError::EmptyClip {
                        actor: actor.clone(),
                        clip: name.clone(),
                    });
                }
                let source = FrameSource(sheet as u32);
                set.insert(name.clone(), AnimationDef::new(source, desc.frames, desc.fps, desc.looping));
            }
            match actor.as_str() {
                PLAYER => lib.player = set,
                ENEMY => lib.enemy = set,
                PROJECTILE => lib.projectile = set,
                other => log::warn!("manifest clips for unknown actor '{}' ignored", other),
            }
        }
        Ok(lib)
    }

    /// Parse a manifest and build from it in one step.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let manifest = AssetManifest::from_json(json)?;
        Self::from_manifest(&manifest)
    }

    pub fn player_clips(&self) -> ClipSet {
        self.player.clone()
    }

    pub fn enemy_clips(&self) -> ClipSet {
        self.enemy.clone()
    }

    pub fn projectile_clips(&self) -> ClipSet {
        self.projectile.clone()
    }

    pub fn statics(&self) -> StaticSheets {
        self.statics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_clip() {
        let lib = AnimationLibrary::builtin();
        let p = lib.player_clips();
        for name in [
            player::clips::IDLE,
            player::clips::WALK,
            player::clips::RUN,
            player::clips::JUMP,
            player::clips::HURT,
            player::clips::DEAD,
            player::clips::ATTACK_1,
            player::clips::ATTACK_2,
            player::clips::ATTACK_3,
            player::clips::RUN_ATTACK,
        ] {
            assert!(p.contains_key(name), "missing player clip {name}");
        }
        assert!(!p[player::clips::DEAD].looping);
        assert_eq!(lib.enemy_clips().len(), 3);
        assert_eq!(lib.projectile_clips()[projectile::FLY_CLIP].frame_count, 6);
    }

    #[test]
    fn manifest_overrides_actor_set() {
        let json = r#"{
            "sheets": [ { "name": "blob", "path": "blob.png" } ],
            "clips": {
                "enemy": { "idle": { "sheet": "blob", "frames": 2, "fps": 4 } }
            }
        }"#;
        let lib = AnimationLibrary::from_json(json).unwrap();
        let enemy = lib.enemy_clips();
        assert_eq!(enemy.len(), 1);
        assert_eq!(enemy["idle"].source, FrameSource(0));
        assert!((enemy["idle"].frame_interval - 0.25).abs() < 1e-6);
        // Untouched actors keep the built-in clips.
        assert_eq!(lib.player_clips().len(), 10);
        assert_eq!(lib.statics(), StaticSheets::default());
    }

    #[test]
    fn static_sheets_resolve_by_name() {
        let json = r#"{
            "sheets": [
                { "name": "pickups", "path": "items.png" },
                { "name": "tileset", "path": "world.png" }
            ]
        }"#;
        let lib = AnimationLibrary::from_json(json).unwrap();
        assert_eq!(lib.statics().pickups, FrameSource(0));
        assert_eq!(lib.statics().tileset, FrameSource(1));
        assert_eq!(lib.statics().flag, sheets::FLAG);
    }

    #[test]
    fn unknown_sheet_is_rejected() {
        let json = r#"{
            "sheets": [],
            "clips": { "player": { "walk": { "sheet": "nope", "frames": 8, "fps": 10 } } }
        }"#;
        let err = AnimationLibrary::from_json(json).unwrap_err();
        assert!(matches!(err, AssetError::UnknownSheet { ref sheet, .. } if sheet == "nope"));
    }

    #[test]
    fn bad_json_maps_to_asset_error() {
        let err = AnimationLibrary::from_json("not json").unwrap_err();
        assert!(matches!(err, AssetError::Json(_)));
    }
}
