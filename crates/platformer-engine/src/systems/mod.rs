pub mod physics;
pub mod collision;
pub mod effects;
pub mod render;
