use std::collections::HashMap;

use fastrand::Rng;

use crate::{Batch, EnvError, Space, Value};

/// Auxiliary per-step information returned alongside rewards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    /// Last observation of an episode that was automatically reset by a
    /// vectorized environment.
    pub terminal_observation: Option<Value>,
    pub is_success: Option<bool>,
    pub extra: HashMap<String, f32>,
}

/// A rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    Text(String),
    /// Row-major RGB pixels.
    Pixels { width: u32, height: u32, data: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Human,
    RgbArray,
}

/// Outcome of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Value,
    pub reward: f32,
    pub done: bool,
    pub info: Info,
}

/// Outcome of one step of every sub-environment in a [`VecEnv`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepBatch {
    pub observations: Batch,
    pub rewards: Vec<f32>,
    pub dones: Vec<bool>,
    pub infos: Vec<Info>,
}

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface a single environment must provide. Each call to [`step`] advances
/// the simulation by one action and returns the new observation, a reward
/// signal, and whether the episode has terminated.
///
/// [`step`]: Env::step
pub trait Env {
    fn observation_space(&self) -> Space;

    fn action_space(&self) -> Space;

    /// Reset the environment to a starting state and return the initial
    /// observation. Randomised starts draw from `rng`.
    fn reset(&mut self, rng: &mut Rng) -> Value;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidAction`] when the action is not a member of
    /// the action space.
    fn step(&mut self, action: &Value) -> Result<Transition, EnvError>;

    fn render(&self) -> Option<RenderFrame> {
        None
    }
}

/// A batch of environments driven through a single reset/step interface.
///
/// Stepping is split in two phases: [`step_async`] submits an action batch and
/// [`step_wait`] collects the results. [`step`] does both.
///
/// [`step_async`]: VecEnv::step_async
/// [`step_wait`]: VecEnv::step_wait
/// [`step`]: VecEnv::step
pub trait VecEnv {
    fn num_envs(&self) -> usize;

    fn observation_space(&self) -> &Space;

    fn action_space(&self) -> &Space;

    /// Reset every sub-environment and return the initial observations.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn reset(&mut self) -> Result<Batch, EnvError>;

    /// Submit one action per sub-environment.
    fn step_async(&mut self, actions: Batch);

    /// Collect the results of the last submitted action batch.
    ///
    /// # Errors
    ///
    /// [`EnvError::NoPendingActions`] if nothing was submitted, or any error
    /// raised by a sub-environment.
    fn step_wait(&mut self) -> Result<StepBatch, EnvError>;

    /// # Errors
    ///
    /// See [`VecEnv::step_wait`].
    fn step(&mut self, actions: Batch) -> Result<StepBatch, EnvError> {
        self.step_async(actions);
        self.step_wait()
    }

    /// # Errors
    ///
    /// Implementation specific.
    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        let _ = mode;
        Ok(None)
    }

    /// One frame per sub-environment.
    ///
    /// # Errors
    ///
    /// [`EnvError::NotSupported`] unless overridden.
    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        Err(EnvError::NotSupported("get_images"))
    }

    fn close(&mut self) {}
}

impl<V: VecEnv + ?Sized> VecEnv for &mut V {
    fn num_envs(&self) -> usize {
        (**self).num_envs()
    }
    fn observation_space(&self) -> &Space {
        (**self).observation_space()
    }
    fn action_space(&self) -> &Space {
        (**self).action_space()
    }
    fn reset(&mut self) -> Result<Batch, EnvError> {
        (**self).reset()
    }
    fn step_async(&mut self, actions: Batch) {
        (**self).step_async(actions);
    }
    fn step_wait(&mut self) -> Result<StepBatch, EnvError> {
        (**self).step_wait()
    }
    fn step(&mut self, actions: Batch) -> Result<StepBatch, EnvError> {
        (**self).step(actions)
    }
    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        (**self).render(mode)
    }
    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        (**self).get_images()
    }
    fn close(&mut self) {
        (**self).close();
    }
}

impl<V: VecEnv + ?Sized> VecEnv for Box<V> {
    fn num_envs(&self) -> usize {
        (**self).num_envs()
    }
    fn observation_space(&self) -> &Space {
        (**self).observation_space()
    }
    fn action_space(&self) -> &Space {
        (**self).action_space()
    }
    fn reset(&mut self) -> Result<Batch, EnvError> {
        (**self).reset()
    }
    fn step_async(&mut self, actions: Batch) {
        (**self).step_async(actions);
    }
    fn step_wait(&mut self) -> Result<StepBatch, EnvError> {
        (**self).step_wait()
    }
    fn step(&mut self, actions: Batch) -> Result<StepBatch, EnvError> {
        (**self).step(actions)
    }
    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        (**self).render(mode)
    }
    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        (**self).get_images()
    }
    fn close(&mut self) {
        (**self).close();
    }
}
