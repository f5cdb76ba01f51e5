#![warn(missing_docs)]
//! Tabular agents for gridworlds: Q-learning, Dyna-Q and Dyna-Q+.
//!
//! All three algorithms are served by one [`Learner`]; the algorithm picks
//! the [`Planner`] that runs after every direct update.
//!
//! ```rust
//! use dyna_agent::{Algorithm, Learner, LearnerConfig};
//! use dyna_core::{record::NullRecorder, Env, Trainer, TrainerConfig};
//! use dyna_gridworld::{GridConfig, Gridworld};
//!
//! let env = Gridworld::build(&GridConfig::default())?;
//! let config = LearnerConfig::default()
//!     .algorithm(Algorithm::DynaQ)
//!     .planning_steps(5);
//! let mut agent = Learner::build(config, env)?;
//!
//! let config = TrainerConfig::default().max_steps_per_episode(Some(10_000));
//! let mut trainer = Trainer::build(config);
//! trainer.fit(&mut agent, 3, &mut NullRecorder {})?;
//! assert_eq!(trainer.snapshots().len(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```
mod config;
mod learner;
mod model;
mod planner;
pub mod policy;
mod table;
pub use config::{Algorithm, LearnerConfig};
pub use learner::Learner;
pub use model::{Transition, TransitionModel};
pub use planner::Planner;
pub use policy::RandomSource;
pub use table::{StalenessTable, StateActionTable, VisitCounter};
