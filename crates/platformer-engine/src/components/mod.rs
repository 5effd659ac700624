pub mod animation;
pub mod enemy;
pub mod entity;
pub mod pickup;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod sprite;
