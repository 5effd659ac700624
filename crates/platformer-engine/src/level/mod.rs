pub mod campaign;
pub mod map;
