use anyhow::Result;
use gym::{BitFlipEnv, DummyVecEnv, VecEnv};
use her::{HerConfig, HerWrapper, RewardFunction, SparseReward};

pub struct Settings {
    pub bits: usize,
    pub envs: usize,
    pub episodes: usize,
    pub max_steps: usize,
    pub env_seed: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub episodes: usize,
    pub steps: usize,
    /// Sub-episodes in which the stacked goal was reached at least once.
    pub successes: usize,
}

/// Runs `settings.episodes` random-action episodes through the wrapper.
pub fn run(settings: &Settings, config: &HerConfig) -> Result<Summary> {
    let venv = DummyVecEnv::from_prototype(
        settings.envs,
        &BitFlipEnv::new(settings.bits, settings.max_steps),
        settings.env_seed,
    );
    let mut env = HerWrapper::from_config(venv, SparseReward::default(), config)?;
    let mut rng = fastrand::Rng::with_seed(settings.env_seed.wrapping_add(1));
    let mut summary = Summary::default();

    for episode in 0..settings.episodes {
        env.reset()?;
        let mut reached = vec![false; settings.envs];
        for _ in 0..settings.max_steps {
            let actions = (0..settings.envs)
                .map(|_| env.action_space().sample(&mut rng))
                .collect();
            let out = env.step(actions)?;
            summary.steps += 1;
            for (hit, obs) in reached.iter_mut().zip(&out.observations) {
                let (achieved, desired) = env.stacker().unstack(obs)?;
                if env.reward_function().compute_reward(&achieved, &desired) >= 0.0 {
                    *hit = true;
                }
            }
        }
        let successes = reached.iter().filter(|&&r| r).count();
        summary.successes += successes;
        summary.episodes += 1;
        tracing::info!(
            episode,
            successes,
            pool = env.goal_pool().len(),
            "episode finished"
        );
    }

    env.close();
    Ok(summary)
}
