use fastrand::Rng;

use crate::{Env, EnvError, Info, RenderFrame, Space, Transition, Value};

/// Environment where the agent flips one bit of an `n`-bit vector per step.
///
/// The classic goal-conditioned toy problem: observations are the current bits,
/// actions select which bit to flip. The environment itself has no notion of a
/// target; every step costs `-1` and episodes last `max_steps` steps. Goal
/// rewards are computed outside, from the observation and the desired bits.
#[derive(Clone, Debug)]
pub struct BitFlipEnv {
    bits: Vec<u8>,
    max_steps: usize,
    steps: usize,
}

impl BitFlipEnv {
    #[must_use]
    pub fn new(n_bits: usize, max_steps: usize) -> Self {
        Self {
            bits: vec![0; n_bits],
            max_steps,
            steps: 0,
        }
    }

    #[must_use]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }
}

impl Env for BitFlipEnv {
    fn observation_space(&self) -> Space {
        Space::multi_binary(self.bits.len())
    }

    fn action_space(&self) -> Space {
        Space::discrete(self.bits.len() as u64)
    }

    fn reset(&mut self, rng: &mut Rng) -> Value {
        for b in &mut self.bits {
            *b = u8::from(rng.bool());
        }
        self.steps = 0;
        Value::MultiBinary(self.bits.clone())
    }

    fn step(&mut self, action: &Value) -> Result<Transition, EnvError> {
        let idx = match action {
            Value::Discrete(i) if (*i as usize) < self.bits.len() => *i as usize,
            other => {
                return Err(EnvError::InvalidAction(format!(
                    "expected a bit index below {}, got {other:?}",
                    self.bits.len()
                )))
            }
        };
        self.bits[idx] ^= 1;
        self.steps += 1;
        Ok(Transition {
            observation: Value::MultiBinary(self.bits.clone()),
            reward: -1.0,
            done: self.steps >= self.max_steps,
            info: Info::default(),
        })
    }

    fn render(&self) -> Option<RenderFrame> {
        let text: String = self
            .bits
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect();
        Some(RenderFrame::Text(text))
    }
}
