use fastrand::Rng;

use crate::{Batch, Env, EnvError, RenderFrame, RenderMode, Space, StepBatch, VecEnv};

/// Runs N copies of an environment sequentially in the current thread.
///
/// Sub-environments that finish an episode are reset immediately; the last
/// observation of the finished episode is kept in
/// [`Info::terminal_observation`].
pub struct DummyVecEnv<E: Env> {
    envs: Vec<E>,
    observation_space: Space,
    action_space: Space,
    rng: Rng,
    actions: Option<Batch>,
}

impl<E: Env> DummyVecEnv<E> {
    /// Creates `n` environments with the provided constructor. `seed` drives
    /// every randomised reset.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(n: usize, mut make_env: impl FnMut() -> E, seed: u64) -> Self {
        assert!(n > 0, "a vectorized environment needs at least one copy");
        let envs: Vec<E> = (0..n).map(|_| make_env()).collect();
        let observation_space = envs[0].observation_space();
        let action_space = envs[0].action_space();
        Self {
            envs,
            observation_space,
            action_space,
            rng: Rng::with_seed(seed),
            actions: None,
        }
    }

    /// Creates `n` clones of `prototype`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn from_prototype(n: usize, prototype: &E, seed: u64) -> Self
    where
        E: Clone,
    {
        Self::new(n, || prototype.clone(), seed)
    }

    #[must_use]
    pub fn envs(&self) -> &[E] {
        &self.envs
    }
}

impl<E: Env> VecEnv for DummyVecEnv<E> {
    fn num_envs(&self) -> usize {
        self.envs.len()
    }

    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }

    fn reset(&mut self) -> Result<Batch, EnvError> {
        let rng = &mut self.rng;
        Ok(self.envs.iter_mut().map(|env| env.reset(rng)).collect())
    }

    fn step_async(&mut self, actions: Batch) {
        self.actions = Some(actions);
    }

    fn step_wait(&mut self) -> Result<StepBatch, EnvError> {
        let actions = self.actions.take().ok_or(EnvError::NoPendingActions)?;
        if actions.len() != self.envs.len() {
            return Err(EnvError::BatchSize {
                expected: self.envs.len(),
                actual: actions.len(),
            });
        }

        let n = self.envs.len();
        let mut out = StepBatch {
            observations: Vec::with_capacity(n),
            rewards: Vec::with_capacity(n),
            dones: Vec::with_capacity(n),
            infos: Vec::with_capacity(n),
        };
        for (i, (env, action)) in self.envs.iter_mut().zip(&actions).enumerate() {
            let mut t = env.step(action)?;
            if t.done {
                tracing::trace!("sub-environment {i} finished its episode, resetting");
                let terminal = std::mem::replace(&mut t.observation, env.reset(&mut self.rng));
                t.info.terminal_observation = Some(terminal);
            }
            out.observations.push(t.observation);
            out.rewards.push(t.reward);
            out.dones.push(t.done);
            out.infos.push(t.info);
        }
        Ok(out)
    }

    fn render(&mut self, _mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        Ok(self.envs.first().and_then(Env::render))
    }

    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        Ok(self.envs.iter().filter_map(Env::render).collect())
    }
}
