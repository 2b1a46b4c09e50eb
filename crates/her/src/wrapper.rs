//! # Hindsight goal wrapper
//!
//! [`HerWrapper`] sits between a learner and a vectorized environment. Every
//! observation it hands out is the raw observation stacked with a goal, and
//! it keeps the observations of the running episode so that goals for the
//! next episode can be drawn from states the agent actually reached.
//!
//! ## Goal bookkeeping
//!
//! -   The **history** holds one observation batch per collected step of the
//!     running episode, preceded by the batch returned from the last reset.
//! -   At every reset the history becomes the **pool** and the history starts
//!     over from the fresh observation.
//! -   The **active goal** is chosen at reset by the configured
//!     [`GoalSampling`] strategy and stacked onto every stepped observation
//!     until the next reset.

use fastrand::Rng;
use gym::{Batch, EnvError, RenderFrame, RenderMode, Space, StepBatch, Value, VecEnv};

use crate::sampling::{sample_pool, sample_space_batch};
use crate::{GoalSampling, GoalStacker, HerConfig, HerError, ResetGoal};

pub struct HerWrapper<E: VecEnv, R> {
    venv: E,
    reward_function: R,
    stacker: GoalStacker,
    sampling: GoalSampling<E>,
    reset_goal: ResetGoal,
    rng: Rng,
    actions: Option<Batch>,
    history: Vec<Batch>,
    pool: Vec<Batch>,
    goal: Batch,
}

impl<E: VecEnv, R> HerWrapper<E, R> {
    /// Wraps `venv` with an entropy-seeded random source.
    ///
    /// # Errors
    ///
    /// [`HerError::UnsupportedSpace`] if the wrapped observation space is not
    /// `Discrete`, `Box`, `MultiDiscrete` or `MultiBinary`.
    pub fn new(venv: E, reward_function: R, sampling: GoalSampling<E>) -> Result<Self, HerError> {
        Self::with_rng(venv, reward_function, sampling, Rng::new())
    }

    /// Wraps `venv`, drawing every random goal from `rng`.
    ///
    /// The goal history starts with one batch sampled from the wrapped
    /// observation space, which is also the initial active goal.
    ///
    /// # Errors
    ///
    /// See [`HerWrapper::new`].
    pub fn with_rng(
        venv: E,
        reward_function: R,
        sampling: GoalSampling<E>,
        mut rng: Rng,
    ) -> Result<Self, HerError> {
        let stacker = GoalStacker::new(venv.observation_space())?;
        let initial = sample_space_batch(venv.observation_space(), venv.num_envs(), &mut rng);
        tracing::debug!(
            wrapped = %venv.observation_space(),
            stacked = %stacker.observation_space(),
            strategy = sampling.name(),
            num_envs = venv.num_envs(),
            "created HER wrapper"
        );
        Ok(Self {
            venv,
            reward_function,
            stacker,
            sampling,
            reset_goal: ResetGoal::default(),
            rng,
            actions: None,
            history: vec![initial.clone()],
            pool: vec![initial.clone()],
            goal: initial,
        })
    }

    /// # Errors
    ///
    /// [`HerError::UnknownStrategy`] for an unrecognised strategy name, or
    /// any error of [`HerWrapper::new`].
    pub fn from_config(venv: E, reward_function: R, config: &HerConfig) -> Result<Self, HerError> {
        let sampling = config.goal_sampling()?;
        Ok(Self::with_rng(venv, reward_function, sampling, config.rng())?
            .with_reset_goal(config.reset_goal))
    }

    #[must_use]
    pub fn with_reset_goal(mut self, reset_goal: ResetGoal) -> Self {
        self.reset_goal = reset_goal;
        self
    }

    /// The goal stacked onto stepped observations, one per sub-environment.
    #[must_use]
    pub fn goal(&self) -> &[Value] {
        &self.goal
    }

    /// Observation batches of the running episode.
    #[must_use]
    pub fn goal_history(&self) -> &[Batch] {
        &self.history
    }

    /// Observation batches of the previous episode.
    #[must_use]
    pub fn goal_pool(&self) -> &[Batch] {
        &self.pool
    }

    #[must_use]
    pub fn reward_function(&self) -> &R {
        &self.reward_function
    }

    #[must_use]
    pub fn stacker(&self) -> &GoalStacker {
        &self.stacker
    }

    #[must_use]
    pub fn reset_goal(&self) -> ResetGoal {
        self.reset_goal
    }

    #[must_use]
    pub fn venv(&self) -> &E {
        &self.venv
    }

    pub fn venv_mut(&mut self) -> &mut E {
        &mut self.venv
    }

    #[must_use]
    pub fn into_inner(self) -> E {
        self.venv
    }

    /// Draws the next active goal. The running history is about to become
    /// the pool, so `SampleObs` draws from it.
    fn choose_goal(&mut self) -> Batch {
        match &mut self.sampling {
            GoalSampling::Random => sample_space_batch(
                self.venv.observation_space(),
                self.venv.num_envs(),
                &mut self.rng,
            ),
            GoalSampling::SampleObs => sample_pool(&self.history, &mut self.rng),
            GoalSampling::Custom(sampler) => sampler.sample_goal(&self.venv),
        }
    }
}

impl<E: VecEnv, R> VecEnv for HerWrapper<E, R> {
    fn num_envs(&self) -> usize {
        self.venv.num_envs()
    }

    fn observation_space(&self) -> &Space {
        self.stacker.observation_space()
    }

    fn action_space(&self) -> &Space {
        self.venv.action_space()
    }

    fn reset(&mut self) -> Result<Batch, EnvError> {
        let obs = self.venv.reset()?;
        let goal = self.choose_goal();
        // nothing is committed until the goals stack with the fresh batch
        let with_goal = self.stacker.stack_batch(&obs, &goal)?;
        let stacked = match self.reset_goal {
            ResetGoal::Resampled => {
                let shown = sample_pool(&self.history, &mut self.rng);
                self.stacker.stack_batch(&obs, &shown)?
            }
            ResetGoal::Active => with_goal,
        };

        self.pool = std::mem::replace(&mut self.history, vec![obs]);
        self.goal = goal;
        tracing::debug!(
            pool = self.pool.len(),
            strategy = self.sampling.name(),
            "reset HER wrapper"
        );
        Ok(stacked)
    }

    fn step_async(&mut self, actions: Batch) {
        self.actions = Some(actions);
    }

    fn step_wait(&mut self) -> Result<StepBatch, EnvError> {
        let actions = self.actions.take().ok_or(EnvError::NoPendingActions)?;
        let mut out = self.venv.step(actions)?;
        self.history.push(out.observations.clone());
        out.observations = self.stacker.stack_batch(&out.observations, &self.goal)?;
        tracing::trace!(history = self.history.len(), "collected HER step");
        Ok(out)
    }

    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        self.venv.render(mode)
    }

    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        self.venv.get_images()
    }

    /// Does not close the wrapped environment; its owner does that.
    fn close(&mut self) {
        tracing::trace!("HER wrapper closed, wrapped environment left open");
    }
}
