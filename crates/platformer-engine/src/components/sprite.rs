/// Handle to a sprite sheet owned by the renderer.
/// The core only passes it through; the sheet may not be loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FrameSource(pub u32);

impl FrameSource {
    /// Instance source id written for entities whose sheet is not ready.
    pub const PLACEHOLDER: f32 = -1.0;
    /// Instance source id written for particles.
    pub const PARTICLE: f32 = -2.0;

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

/// Sheet ids used by the built-in animation library.
/// Must match the order of `sheets` in the default asset manifest.
pub mod sheets {
    use super::FrameSource;

    pub const PLAYER_WALK: FrameSource = FrameSource(0);
    pub const PLAYER_RUN: FrameSource = FrameSource(1);
    pub const PLAYER_JUMP: FrameSource = FrameSource(2);
    pub const PLAYER_HURT: FrameSource = FrameSource(3);
    pub const PLAYER_DEAD: FrameSource = FrameSource(4);
    pub const PLAYER_ATTACK_1: FrameSource = FrameSource(5);
    pub const PLAYER_ATTACK_2: FrameSource = FrameSource(6);
    pub const PLAYER_ATTACK_3: FrameSource = FrameSource(7);
    pub const PLAYER_RUN_ATTACK: FrameSource = FrameSource(8);
    pub const FIREBALL: FrameSource = FrameSource(9);
    pub const SLIME: FrameSource = FrameSource(10);
    pub const TILESET: FrameSource = FrameSource(11);
    pub const PICKUPS: FrameSource = FrameSource(12);
    pub const FLAG: FrameSource = FrameSource(13);

    pub const COUNT: u32 = 14;
}
