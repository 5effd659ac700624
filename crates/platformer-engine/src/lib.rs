pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod level;
pub mod session;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, IdAllocator, SoundEvent, GameEvent};
pub use components::entity::{Body, Capabilities, Facing};
pub use components::animation::{AnimationDef, AnimationEnded, Animator};
pub use components::sprite::FrameSource;
pub use components::player::Player;
pub use components::enemy::Enemy;
pub use components::pickup::{EffectKind, Pickup, PickupLook};
pub use components::platform::Platform;
pub use components::projectile::Projectile;
pub use core::geometry::Aabb;
pub use core::time::{FixedTimestep, FrameClock, FrameTime};
pub use core::tuning::Tuning;
pub use core::world::World;
pub use renderer::instance::{RenderBuffer, SpriteInstance};
pub use renderer::camera::ScrollCamera;
pub use renderer::parallax::Parallax;
pub use input::queue::{InputEvent, InputQueue};
pub use input::keys::{InputSnapshot, Key, KeyBindings, KeyState};
pub use assets::library::{AnimationLibrary, AssetError};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{FrameSourceStatus, SourceRegistry};
pub use bridge::protocol::ProtocolLayout;
pub use level::campaign::Campaign;
pub use level::map::{LevelDescriptor, LevelError};
pub use systems::effects::{EffectsState, Particle, ParticleTint};
pub use systems::render::{EntityView, HudState};
pub use session::{Session, SessionState};
pub use session::events::SessionEvent;
