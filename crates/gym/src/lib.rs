#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_possible_truncation)]
//! # Gym
//!
//! The environment contract used by the hindsight goal wrapper in the `her`
//! crate.
//!
//! -   [`Space`] and [`Value`] describe what an environment observes and accepts.
//! -   [`Env`] is a single simulation instance; [`VecEnv`] batches several
//!     behind one reset/step interface with a submit/collect step split.
//! -   [`DummyVecEnv`] runs copies of an [`Env`] sequentially in-process.
//! -   [`BitFlipEnv`] is a small goal-conditioned environment for tests,
//!     benches and the demo runtime.

mod bit_flip;
mod dummy_vec_env;
mod env;
mod error;
pub mod space;
mod value;

pub use bit_flip::BitFlipEnv;
pub use dummy_vec_env::DummyVecEnv;
pub use env::{Env, Info, RenderFrame, RenderMode, StepBatch, Transition, VecEnv};
pub use error::EnvError;
pub use space::Space;
pub use value::{Batch, Value};
