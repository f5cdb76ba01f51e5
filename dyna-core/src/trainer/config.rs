//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// Zero-based index of the episode before which the late portal opens.
    pub late_portal_episode: usize,

    /// Episode indices at which diagnostics are taken.
    pub log_every: Vec<usize>,

    /// Hand the diagnostics to the recorder for rendering.
    pub plot: bool,

    /// The number of latest episodes included in the diagnostics.
    pub history_window: usize,

    /// Truncate episodes after this many actions.
    #[serde(default)]
    pub max_steps_per_episode: Option<usize>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            late_portal_episode: 100,
            log_every: vec![],
            plot: false,
            history_window: 101,
            max_steps_per_episode: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the episode before which the late portal opens.
    pub fn late_portal_episode(mut self, v: usize) -> Self {
        self.late_portal_episode = v;
        self
    }

    /// Sets the episodes at which diagnostics are taken.
    pub fn log_every(mut self, v: impl IntoIterator<Item = usize>) -> Self {
        self.log_every = v.into_iter().collect();
        self
    }

    /// Sets if diagnostics are written to the recorder.
    pub fn plot(mut self, v: bool) -> Self {
        self.plot = v;
        self
    }

    /// Sets the number of latest episodes included in the diagnostics.
    pub fn history_window(mut self, v: usize) -> Self {
        self.history_window = v;
        self
    }

    /// Sets the step budget of an episode.
    pub fn max_steps_per_episode(mut self, v: Option<usize>) -> Self {
        self.max_steps_per_episode = v;
        self
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of trainer from {}", path_.display());
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of trainer into {}", path_.display());
        Ok(())
    }
}
