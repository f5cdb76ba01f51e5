#![warn(missing_docs)]
//! Gridworld environment with walls, traps, a goal and portals.
//!
//! ```rust
//! use dyna_core::{Action, Coord, Env};
//! use dyna_gridworld::{GridConfig, Gridworld};
//!
//! let env = Gridworld::build(&GridConfig::default()).unwrap();
//! assert_eq!(env.start(), Coord::new(1, 6));
//! assert_eq!(env.resolve_move(Coord::new(9, 1), Action::Down), Coord::new(9, 2));
//! assert!(env.is_terminal(Coord::new(9, 2)));
//! ```
mod config;
mod gridworld;
pub use config::GridConfig;
pub use gridworld::{Cell, Gridworld};
