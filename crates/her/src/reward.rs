use gym::Value;

/// Reward of reaching `desired_goal` when the environment is at `achieved_goal`.
///
/// The wrapper stores one of these for the learner but never evaluates it
/// itself; relabelled transitions are scored by the caller.
pub trait RewardFunction {
    fn compute_reward(&self, achieved_goal: &Value, desired_goal: &Value) -> f32;
}

impl<F> RewardFunction for F
where
    F: Fn(&Value, &Value) -> f32,
{
    fn compute_reward(&self, achieved_goal: &Value, desired_goal: &Value) -> f32 {
        self(achieved_goal, desired_goal)
    }
}

/// `0` when every component of the achieved goal is within `tolerance` of the
/// desired one, `-1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SparseReward {
    pub tolerance: f32,
}

impl SparseReward {
    #[must_use]
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }
}

impl RewardFunction for SparseReward {
    fn compute_reward(&self, achieved_goal: &Value, desired_goal: &Value) -> f32 {
        let achieved = achieved_goal.to_f32s();
        let desired = desired_goal.to_f32s();
        let reached = achieved.len() == desired.len()
            && achieved
                .iter()
                .zip(&desired)
                .all(|(a, d)| (a - d).abs() <= self.tolerance);
        if reached {
            0.0
        } else {
            -1.0
        }
    }
}
