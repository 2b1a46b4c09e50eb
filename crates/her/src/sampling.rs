//! Goal sampling strategies.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use gym::{Batch, Space};
use serde::{Deserialize, Serialize};

use crate::HerError;

/// Produces a goal batch (one goal per sub-environment) given the wrapped
/// environment.
///
/// Implemented for any `FnMut(&E) -> Batch`.
pub trait GoalSampler<E: ?Sized> {
    fn sample_goal(&mut self, env: &E) -> Batch;
}

impl<E: ?Sized, F> GoalSampler<E> for F
where
    F: FnMut(&E) -> Batch,
{
    fn sample_goal(&mut self, env: &E) -> Batch {
        self(env)
    }
}

/// How the wrapper picks the active goal at every reset.
pub enum GoalSampling<E: ?Sized> {
    /// A fresh sample from the wrapped observation space per sub-environment.
    Random,
    /// An observation batch drawn uniformly from the previous episode.
    SampleObs,
    /// A caller-supplied sampler, called once per reset with the wrapped environment.
    Custom(Box<dyn GoalSampler<E>>),
}

impl<E: ?Sized> GoalSampling<E> {
    #[must_use]
    pub fn custom(sampler: impl GoalSampler<E> + 'static) -> Self {
        GoalSampling::Custom(Box::new(sampler))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GoalSampling::Random => "random",
            GoalSampling::SampleObs => "sample_obs",
            GoalSampling::Custom(_) => "custom",
        }
    }
}

impl<E: ?Sized> Default for GoalSampling<E> {
    fn default() -> Self {
        GoalSampling::SampleObs
    }
}

impl<E: ?Sized> FromStr for GoalSampling<E> {
    type Err = HerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(GoalSampling::Random),
            "sample_obs" => Ok(GoalSampling::SampleObs),
            other => Err(HerError::UnknownStrategy(other.to_string())),
        }
    }
}

impl<E: ?Sized> fmt::Debug for GoalSampling<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which goal is stacked onto the observation returned by `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetGoal {
    /// An independent uniform draw from the goal pool. The active goal chosen
    /// at the same reset is only applied from the first step onwards.
    #[default]
    Resampled,
    /// The active goal chosen at this reset.
    Active,
}

pub(crate) fn sample_space_batch(space: &Space, n: usize, rng: &mut Rng) -> Batch {
    (0..n).map(|_| space.sample(rng)).collect()
}

/// Uniform draw from a non-empty pool.
pub(crate) fn sample_pool(pool: &[Batch], rng: &mut Rng) -> Batch {
    pool[rng.usize(..pool.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        let s: GoalSampling<()> = "random".parse().unwrap();
        assert_eq!(s.name(), "random");
        let s: GoalSampling<()> = "sample_obs".parse().unwrap();
        assert_eq!(s.name(), "sample_obs");
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "future".parse::<GoalSampling<()>>().unwrap_err();
        assert!(matches!(err, HerError::UnknownStrategy(ref s) if s == "future"));
    }

    #[test]
    fn closures_are_samplers() {
        let mut calls = 0;
        let mut sampler = |env: &u64| {
            calls += 1;
            vec![gym::Value::Discrete(*env)]
        };
        assert_eq!(sampler.sample_goal(&3u64), vec![gym::Value::Discrete(3)]);
        assert_eq!(calls, 1);
    }
}
