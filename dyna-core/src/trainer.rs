//! Train an [`Agent`].
mod config;
use crate::{
    error::DynaError,
    record::{Record, RecordStorage, RecordValue, Recorder},
    Agent, Env,
};
use anyhow::Result;
use chrono::Local;
pub use config::TrainerConfig;
use log::{debug, info};

/// Value table of an agent after an episode, laid out on the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSnapshot {
    /// Zero-based index of the episode after which the snapshot was taken.
    pub episode: usize,

    /// Maximal action value of every cell, row-major.
    pub values: Vec<f32>,

    /// `[rows, cols]`.
    pub shape: [usize; 2],
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop of an agent.
///
/// # Training loop
///
/// For every episode requested by [`Trainer::fit`]:
///
/// 1. If the episode index equals `late_portal_episode` and the late portal
///    has not been opened yet, call [`Env::activate_late_portal`].
/// 2. Play the episode with [`Agent::run_episode_with_budget`].
/// 3. Store the step count and terminal reward in a [`RecordStorage`] and
///    take a [`ValueSnapshot`].
/// 4. If the episode index is in `log_every`, build a diagnostic [`Record`],
///    log a summary and, if `plot` is set, write it to the [`Recorder`].
///
/// Episode indices keep counting across calls to [`Trainer::fit`], so a
/// trainer corresponds to one training run of one agent.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     T[Trainer]-->|run_episode|A[Agent]
///     A -->|resolve_move|E[Env]
///     E -->|reward, is_terminal|A
///     T -->|activate_late_portal|E
///     T -->|Record|R[Recorder]
/// ```
pub struct Trainer {
    config: TrainerConfig,
    episodes_played: usize,
    late_portal_activated: bool,
    snapshots: Vec<ValueSnapshot>,
    storage: RecordStorage,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            config,
            episodes_played: 0,
            late_portal_activated: false,
            snapshots: vec![],
            storage: RecordStorage::new(),
        }
    }

    /// The number of episodes played so far.
    pub fn episodes_played(&self) -> usize {
        self.episodes_played
    }

    /// Returns `true` once the late portal has been opened.
    pub fn late_portal_activated(&self) -> bool {
        self.late_portal_activated
    }

    /// Value snapshots, one per completed episode.
    pub fn snapshots(&self) -> &[ValueSnapshot] {
        &self.snapshots
    }

    /// Plays `n_episodes` episodes with `agent`.
    pub fn fit<E, A>(
        &mut self,
        agent: &mut A,
        n_episodes: usize,
        recorder: &mut dyn Recorder,
    ) -> Result<()>
    where
        E: Env,
        A: Agent<E>,
    {
        if self.config.max_steps_per_episode == Some(0) {
            return Err(DynaError::InvalidConfig(
                "max_steps_per_episode must be positive".to_string(),
            )
            .into());
        }

        for _ in 0..n_episodes {
            if !self.late_portal_activated && self.episodes_played == self.config.late_portal_episode
            {
                agent.env_mut().activate_late_portal();
                self.late_portal_activated = true;
                info!(
                    "{}: opened the late portal before episode {}",
                    agent.name(),
                    self.episodes_played
                );
            }

            let episode = agent.run_episode_with_budget(self.config.max_steps_per_episode);
            debug!(
                "{}: episode {}, {} steps, reward = {}",
                agent.name(),
                self.episodes_played,
                episode.steps,
                episode.reward
            );
            self.storage.store(Record::from_slice(&[
                ("episode_steps", RecordValue::Scalar(episode.steps as f32)),
                ("episode_reward", RecordValue::Scalar(episode.reward)),
            ]));

            let (values, shape) = agent.value_grid();
            self.snapshots.push(ValueSnapshot {
                episode: self.episodes_played,
                values,
                shape,
            });

            if self.config.log_every.contains(&self.episodes_played) {
                let record = self.diagnostics(agent);
                if self.config.plot {
                    recorder.write(record);
                }
            }

            self.episodes_played += 1;
        }

        Ok(())
    }

    fn diagnostics<E, A>(&mut self, agent: &A) -> Record
    where
        E: Env,
        A: Agent<E>,
    {
        let episodes = agent.episodes();
        let latest = &episodes[episodes.len().saturating_sub(self.config.history_window)..];
        let steps = latest.iter().map(|e| e.steps as f32).collect::<Vec<_>>();
        let rewards = latest.iter().map(|e| e.reward).collect::<Vec<_>>();
        let n_optimal = latest.iter().filter(|e| e.is_optimal()).count();
        let (values, shape) = agent.value_grid();
        let (visits, _) = agent.visit_grid();

        info!(
            "{}: episode {}, {}/{} of the latest episodes reached the goal on a short path",
            agent.name(),
            self.episodes_played,
            n_optimal,
            latest.len()
        );

        let mut record = Record::from_slice(&[
            ("episode", RecordValue::Scalar(self.episodes_played as f32)),
            ("algorithm", RecordValue::String(agent.name().to_string())),
            ("timestamp", RecordValue::DateTime(Local::now())),
            ("value_grid", RecordValue::Array2(values, shape)),
            ("visit_grid", RecordValue::Array2(visits, shape)),
            ("steps", RecordValue::Array1(steps)),
            ("reward", RecordValue::Array1(rewards)),
        ]);
        record.merge_inplace(self.storage.aggregate());
        record
    }
}
