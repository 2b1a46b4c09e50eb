#![allow(dead_code)]

use std::collections::VecDeque;

use fastrand::Rng;
use gym::{Batch, EnvError, Info, RenderFrame, RenderMode, Space, StepBatch, Value, VecEnv};

/// Vectorized environment that replays scripted observation batches and
/// falls back to sampling its observation space once the script runs out.
/// Counts every call so tests can check what the wrapper forwarded.
pub struct ScriptedVecEnv {
    pub space: Space,
    pub actions_space: Space,
    pub num_envs: usize,
    pub script: VecDeque<Batch>,
    pub rng: Rng,
    pub pending: Option<Batch>,
    pub resets: usize,
    pub steps: usize,
    pub renders: usize,
    pub closed: bool,
    pub last_actions: Option<Batch>,
}

impl ScriptedVecEnv {
    pub fn new(space: Space, num_envs: usize) -> Self {
        Self {
            space,
            actions_space: Space::discrete(2),
            num_envs,
            script: VecDeque::new(),
            rng: Rng::with_seed(11),
            pending: None,
            resets: 0,
            steps: 0,
            renders: 0,
            closed: false,
            last_actions: None,
        }
    }

    pub fn with_script(mut self, batches: Vec<Batch>) -> Self {
        self.script = batches.into();
        self
    }

    fn next_obs(&mut self) -> Batch {
        match self.script.pop_front() {
            Some(batch) => batch,
            None => (0..self.num_envs).map(|_| self.space.sample(&mut self.rng)).collect(),
        }
    }
}

impl VecEnv for ScriptedVecEnv {
    fn num_envs(&self) -> usize {
        self.num_envs
    }

    fn observation_space(&self) -> &Space {
        &self.space
    }

    fn action_space(&self) -> &Space {
        &self.actions_space
    }

    fn reset(&mut self) -> Result<Batch, EnvError> {
        self.resets += 1;
        Ok(self.next_obs())
    }

    fn step_async(&mut self, actions: Batch) {
        self.pending = Some(actions);
    }

    fn step_wait(&mut self) -> Result<StepBatch, EnvError> {
        let actions = self.pending.take().ok_or(EnvError::NoPendingActions)?;
        self.steps += 1;
        self.last_actions = Some(actions);
        let mut info = Info::default();
        info.extra.insert("step".to_string(), self.steps as f32);
        Ok(StepBatch {
            observations: self.next_obs(),
            rewards: vec![0.5; self.num_envs],
            dones: (0..self.num_envs).map(|i| i == 0).collect(),
            infos: vec![info; self.num_envs],
        })
    }

    fn render(&mut self, _mode: RenderMode) -> Result<Option<RenderFrame>, EnvError> {
        self.renders += 1;
        Ok(Some(RenderFrame::Text(format!("frame {}", self.renders))))
    }

    fn get_images(&mut self) -> Result<Vec<RenderFrame>, EnvError> {
        Ok((0..self.num_envs)
            .map(|i| RenderFrame::Pixels { width: 1, height: 1, data: vec![i as u8; 3] })
            .collect())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

pub fn discrete(values: &[u64]) -> Batch {
    values.iter().map(|&v| Value::Discrete(v)).collect()
}

pub fn zero_actions(n: usize) -> Batch {
    vec![Value::Discrete(0); n]
}
