#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # HER
//!
//! Hindsight Experience Replay plumbing for vectorized environments.
//!
//! [`HerWrapper`] wraps any [`gym::VecEnv`] so that observations carry a goal,
//! and picks a new goal at every reset from the configured
//! [`GoalSampling`] strategy. It is itself a [`gym::VecEnv`], so it composes
//! with anything that drives one.
//!
//! ```rust,ignore
//! use gym::{BitFlipEnv, DummyVecEnv, VecEnv};
//! use her::{GoalSampling, HerWrapper, SparseReward};
//!
//! let venv = DummyVecEnv::from_prototype(4, &BitFlipEnv::new(8, 8), 0);
//! let mut env = HerWrapper::new(venv, SparseReward::default(), GoalSampling::SampleObs)?;
//! let obs = env.reset()?; // each observation is bits ++ goal bits
//! ```

mod config;
mod error;
pub mod reward;
mod sampling;
mod stack;
mod wrapper;

pub use config::HerConfig;
pub use error::HerError;
pub use reward::{RewardFunction, SparseReward};
pub use sampling::{GoalSampler, GoalSampling, ResetGoal};
pub use stack::GoalStacker;
pub use wrapper::HerWrapper;
