//! Episode outcomes.
use serde::{Deserialize, Serialize};

/// Step counts that classify a successful episode.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct EpisodeBand {
    /// Length of the shortest path to the goal.
    pub optimal_steps: usize,

    /// Longest episode still counted as near optimal.
    pub near_optimal_steps: usize,
}

impl Default for EpisodeBand {
    fn default() -> Self {
        Self {
            optimal_steps: 12,
            near_optimal_steps: 17,
        }
    }
}

/// Quality of the path followed in an episode.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum PathQuality {
    /// Reached the goal in exactly [`EpisodeBand::optimal_steps`].
    Optimal,

    /// Reached the goal within the band.
    NearOptimal,

    /// Missed the goal or took longer.
    Other,
}

/// Outcome of one episode.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct EpisodeRecord {
    /// The number of actions taken, including the first one.
    pub steps: usize,

    /// Reward of the terminal cell, `0` for truncated episodes.
    pub reward: f32,

    /// The episode was cut by a step budget before reaching a terminal cell.
    pub truncated: bool,

    /// Quality of the path.
    pub quality: PathQuality,
}

impl EpisodeRecord {
    /// Constructs a record, classifying the path with `band`.
    pub fn new(steps: usize, reward: f32, truncated: bool, band: &EpisodeBand) -> Self {
        let quality = if truncated || reward <= 0.0 {
            PathQuality::Other
        } else if steps == band.optimal_steps {
            PathQuality::Optimal
        } else if steps >= band.optimal_steps && steps <= band.near_optimal_steps {
            PathQuality::NearOptimal
        } else {
            PathQuality::Other
        };

        Self {
            steps,
            reward,
            truncated,
            quality,
        }
    }

    /// Returns `true` if the goal was reached within the band.
    pub fn is_optimal(&self) -> bool {
        self.quality != PathQuality::Other
    }
}
