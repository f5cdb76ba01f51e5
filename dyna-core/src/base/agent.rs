//! Agent.
use super::{Action, Env, EpisodeRecord, Policy, State};

/// A learner interacting with an environment it owns.
///
/// An episode is driven as `start`, `step` until the terminal flag is set,
/// `end`, then `reset`. [`Agent::run_episode`] does exactly this.
pub trait Agent<E: Env>: Policy {
    /// Name of the learning algorithm, used in logs and records.
    fn name(&self) -> &str;

    /// Takes the first action of an episode from `state`.
    fn start(&mut self, state: State) -> Action;

    /// Learns from arriving in `state` with `reward`, then takes the next action.
    fn step(&mut self, state: State, reward: f32) -> Action;

    /// Learns from the terminal state the agent is in. No action is taken.
    fn end(&mut self);

    /// Clears the per-episode fields. Learned values are kept.
    fn reset(&mut self);

    /// Plays one episode and appends its record to [`Agent::episodes`].
    fn run_episode(&mut self) -> EpisodeRecord {
        self.run_episode_with_budget(None)
    }

    /// Plays one episode, truncating it after `max_steps` actions if given.
    fn run_episode_with_budget(&mut self, max_steps: Option<usize>) -> EpisodeRecord;

    /// The environment.
    fn env(&self) -> &E;

    /// The environment, mutably.
    fn env_mut(&mut self) -> &mut E;

    /// Records of the episodes played so far.
    fn episodes(&self) -> &[EpisodeRecord];

    /// Maximal action value of every cell, laid out as `rows x cols`.
    fn value_grid(&self) -> (Vec<f32>, [usize; 2]);

    /// Visit counts of every cell, laid out as `rows x cols`.
    fn visit_grid(&self) -> (Vec<f32>, [usize; 2]);
}
