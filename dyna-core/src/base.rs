//! Core functionalities.
mod agent;
mod env;
mod policy;
mod space;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use policy::Policy;
pub use space::{Action, Coord, State, STATE_STRIDE};
pub use step::{EpisodeBand, EpisodeRecord, PathQuality};
