//! Environment.
use crate::{Action, Coord, GridShape};
use anyhow::Result;

/// A deterministic gridworld.
///
/// The environment only answers queries. Termination, visit counts and
/// rewards for the learner are bookkept by the agent, which asks
/// [`Env::is_terminal`] after every move.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Dimensions of the grid.
    fn shape(&self) -> GridShape;

    /// The cell where every episode starts.
    fn start(&self) -> Coord;

    /// Reward emitted when the agent occupies `coord`.
    fn reward(&self, coord: Coord) -> f32;

    /// Returns the cell reached from `coord` with `action`.
    ///
    /// Moving off the grid or into a wall leaves the agent on `coord`.
    /// Entering a portal teleports the agent.
    fn resolve_move(&self, coord: Coord, action: Action) -> Coord;

    /// Returns `true` if an episode ends when the agent reaches `coord`.
    fn is_terminal(&self, coord: Coord) -> bool;

    /// Turns the dormant late portal into a portal.
    ///
    /// Calling this method more than once has no further effect.
    fn activate_late_portal(&mut self);
}
