//! Configuration of [`Learner`](crate::Learner).
use anyhow::Result;
use dyna_core::{error::DynaError, EpisodeBand};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Learning algorithm.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Algorithm {
    /// Direct updates from real experience only.
    QLearning,

    /// Q-learning plus planning updates replayed from a learned model.
    DynaQ,

    /// Dyna-Q with an exploration bonus for pairs not tried for a while.
    DynaQPlus,
}

impl Algorithm {
    /// Name used in logs and records.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::QLearning => "Q-learning",
            Algorithm::DynaQ => "Dyna-Q",
            Algorithm::DynaQPlus => "Dyna-Q+",
        }
    }

    /// Returns `true` for the algorithms with a transition model.
    pub fn is_model_based(&self) -> bool {
        !matches!(self, Algorithm::QLearning)
    }
}

/// Configuration of [`Learner`](crate::Learner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LearnerConfig {
    /// Learning algorithm.
    pub algorithm: Algorithm,

    /// Probability of a random action.
    pub epsilon: f64,

    /// Discount factor.
    pub gamma: f32,

    /// Step size of the value updates.
    pub step_size: f32,

    /// The number of planning updates after each real step.
    /// Ignored by Q-learning.
    pub planning_steps: usize,

    /// Weight of the exploration bonus. Used by Dyna-Q+ only.
    pub kappa: f32,

    /// Seed of the random source.
    pub seed: u64,

    /// Step counts that classify successful episodes.
    #[serde(default)]
    pub band: EpisodeBand,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::QLearning,
            epsilon: 0.1,
            gamma: 1.0,
            step_size: 0.1,
            planning_steps: 100,
            kappa: 1e-3,
            seed: 17,
            band: EpisodeBand::default(),
        }
    }
}

impl LearnerConfig {
    /// Sets the algorithm.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Sets the exploration probability.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the step size.
    pub fn step_size(mut self, v: f32) -> Self {
        self.step_size = v;
        self
    }

    /// Sets the number of planning updates per step.
    pub fn planning_steps(mut self, v: usize) -> Self {
        self.planning_steps = v;
        self
    }

    /// Sets the weight of the exploration bonus.
    pub fn kappa(mut self, v: f32) -> Self {
        self.kappa = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the step counts of successful episodes.
    pub fn band(mut self, v: EpisodeBand) -> Self {
        self.band = v;
        self
    }

    /// Checks the hyper-parameters.
    pub fn validate(&self) -> Result<(), DynaError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(DynaError::InvalidConfig(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(DynaError::InvalidConfig(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        if !(self.step_size > 0.0 && self.step_size <= 1.0) {
            return Err(DynaError::InvalidConfig(format!(
                "step_size must be in (0, 1], got {}",
                self.step_size
            )));
        }
        if self.algorithm.is_model_based() && self.planning_steps == 0 {
            return Err(DynaError::InvalidConfig(format!(
                "{} needs at least one planning step",
                self.algorithm.name()
            )));
        }
        if !(self.kappa >= 0.0) {
            return Err(DynaError::InvalidConfig(format!(
                "kappa must be non-negative, got {}",
                self.kappa
            )));
        }
        if self.band.near_optimal_steps < self.band.optimal_steps {
            return Err(DynaError::InvalidConfig(format!(
                "near_optimal_steps ({}) is below optimal_steps ({})",
                self.band.near_optimal_steps, self.band.optimal_steps
            )));
        }
        Ok(())
    }

    /// Constructs [`LearnerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of learner from {}", path_.display());
        Ok(b)
    }

    /// Saves [`LearnerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of learner into {}", path_.display());
        Ok(())
    }
}
