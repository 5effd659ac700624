pub mod events;
pub mod state;
mod step;

pub use state::{Session, SessionState};
