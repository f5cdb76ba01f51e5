#![warn(missing_docs)]
//! Core of tabular reinforcement learning on gridworlds.
//!
//! This crate defines the vocabulary shared by environments and agents
//! ([`State`], [`Coord`], [`Action`], [`GridShape`]), the traits at the seam
//! between them ([`Env`], [`Agent`], [`Policy`]), the record system used for
//! diagnostics, and the [`Trainer`] that drives an agent through episodes.
pub mod error;
pub mod record;

mod base;
pub use base::{
    Action, Agent, Coord, EpisodeBand, EpisodeRecord, Env, PathQuality, Policy, State,
    STATE_STRIDE,
};

mod shape;
pub use shape::GridShape;

mod trainer;
pub use trainer::{Trainer, TrainerConfig, ValueSnapshot};
