pub mod geometry;
pub mod rng;
pub mod time;
pub mod tuning;
pub mod world;
