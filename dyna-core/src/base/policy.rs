//! Policy.
use crate::{Action, State};

/// A policy on a gridworld.
///
/// Policy is a mapping from a state to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy {
    /// Sample an action given a state.
    fn sample(&mut self, state: State) -> Action;
}
