use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GoalSampling, HerError, ResetGoal};

/// Serializable wrapper settings.
///
/// ```json
/// { "goal_sampling": "random", "reset_goal": "active", "seed": 7 }
/// ```
///
/// Every field is optional; missing fields take the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HerConfig {
    /// `"sample_obs"` or `"random"`.
    pub goal_sampling: String,
    pub reset_goal: ResetGoal,
    /// Seed for the wrapper's random source; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for HerConfig {
    fn default() -> Self {
        Self {
            goal_sampling: "sample_obs".to_string(),
            reset_goal: ResetGoal::default(),
            seed: None,
        }
    }
}

impl HerConfig {
    /// # Errors
    ///
    /// [`HerError::Config`] on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, HerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// [`HerError::UnknownStrategy`] if `goal_sampling` names no strategy.
    pub fn goal_sampling<E: ?Sized>(&self) -> Result<GoalSampling<E>, HerError> {
        self.goal_sampling.parse()
    }

    #[must_use]
    pub fn rng(&self) -> Rng {
        self.seed.map_or_else(Rng::new, Rng::with_seed)
    }
}
