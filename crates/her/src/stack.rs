//! Stacking observations with goals.
//!
//! A [`GoalStacker`] is built once from the wrapped observation space. It
//! remembers which kind of space it was built for and applies the matching
//! rule to every observation/goal pair:
//!
//! | wrapped space      | stacked space                 | stacked value            |
//! |--------------------|-------------------------------|--------------------------|
//! | `Discrete(n)`      | `MultiDiscrete([n, n])`       | `[obs, goal]`            |
//! | `Box`, last dim `k`| same shape, last dim `2k`     | rows of `obs ++ goal`    |
//! | `MultiDiscrete(v)` | `MultiDiscrete(v ++ v)`       | `obs ++ goal`            |
//! | `MultiBinary(n)`   | `MultiBinary(2n)`             | `obs ++ goal`            |

use gym::{Batch, EnvError, Space, Value};

use crate::HerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Discrete,
    /// `row` is the length of the innermost axis, `len` the flat length.
    Box { row: usize, len: usize },
    MultiDiscrete { len: usize },
    MultiBinary { len: usize },
}

#[derive(Debug, Clone)]
pub struct GoalStacker {
    layout: Layout,
    observation_space: Space,
}

impl GoalStacker {
    /// Derives the stacked observation space from the wrapped one.
    ///
    /// # Errors
    ///
    /// [`HerError::UnsupportedSpace`] for composite spaces and for discrete
    /// spaces with an empty dimension, which have no value to use as a goal.
    pub fn new(wrapped: &Space) -> Result<Self, HerError> {
        let empty = match wrapped {
            Space::Discrete { n } => *n == 0,
            Space::MultiDiscrete { nvec } => nvec.contains(&0),
            _ => false,
        };
        if empty {
            return Err(HerError::UnsupportedSpace(wrapped.to_string()));
        }
        let (layout, observation_space) = match wrapped {
            Space::Discrete { n } => (Layout::Discrete, Space::multi_discrete(vec![*n, *n])),
            Space::Box { low, high, shape } => {
                let row = shape.last().copied().unwrap_or(1);
                let mut doubled = shape.clone();
                match doubled.last_mut() {
                    Some(last) => *last *= 2,
                    None => doubled.push(2),
                }
                let space = Space::Box {
                    low: interleave_rows(low, low, row),
                    high: interleave_rows(high, high, row),
                    shape: doubled,
                };
                (Layout::Box { row, len: low.len() }, space)
            }
            Space::MultiDiscrete { nvec } => (
                Layout::MultiDiscrete { len: nvec.len() },
                Space::multi_discrete([nvec.as_slice(), nvec.as_slice()].concat()),
            ),
            Space::MultiBinary { n } => (Layout::MultiBinary { len: *n }, Space::multi_binary(n * 2)),
            Space::Tuple(_) | Space::Dict(_) => {
                return Err(HerError::UnsupportedSpace(wrapped.to_string()))
            }
        };
        Ok(Self {
            layout,
            observation_space,
        })
    }

    /// The stacked observation space.
    #[must_use]
    pub fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    /// Combines one observation with one goal.
    ///
    /// # Errors
    ///
    /// [`EnvError::ShapeMismatch`] when either value does not match the
    /// wrapped space.
    pub fn stack(&self, obs: &Value, goal: &Value) -> Result<Value, EnvError> {
        match (self.layout, obs, goal) {
            (Layout::Discrete, Value::Discrete(o), Value::Discrete(g)) => {
                Ok(Value::MultiDiscrete(vec![*o, *g]))
            }
            (Layout::Box { row, len }, Value::Box(o), Value::Box(g))
                if o.len() == len && g.len() == len =>
            {
                Ok(Value::Box(interleave_rows(o, g, row)))
            }
            (Layout::MultiDiscrete { len }, Value::MultiDiscrete(o), Value::MultiDiscrete(g))
                if o.len() == len && g.len() == len =>
            {
                Ok(Value::MultiDiscrete([o.as_slice(), g.as_slice()].concat()))
            }
            (Layout::MultiBinary { len }, Value::MultiBinary(o), Value::MultiBinary(g))
                if o.len() == len && g.len() == len =>
            {
                Ok(Value::MultiBinary([o.as_slice(), g.as_slice()].concat()))
            }
            _ => Err(EnvError::ShapeMismatch(format!(
                "cannot stack {} observation of length {} with {} goal of length {} for {}",
                obs.kind(),
                obs.len(),
                goal.kind(),
                goal.len(),
                self.observation_space
            ))),
        }
    }

    /// Stacks each observation of a batch with the goal at the same index.
    ///
    /// # Errors
    ///
    /// [`EnvError::BatchSize`] if the batches differ in length, otherwise as
    /// [`GoalStacker::stack`].
    pub fn stack_batch(&self, observations: &[Value], goals: &[Value]) -> Result<Batch, EnvError> {
        if observations.len() != goals.len() {
            return Err(EnvError::BatchSize {
                expected: observations.len(),
                actual: goals.len(),
            });
        }
        observations
            .iter()
            .zip(goals)
            .map(|(o, g)| self.stack(o, g))
            .collect()
    }

    /// Splits a stacked value back into `(observation, goal)`.
    ///
    /// # Errors
    ///
    /// [`EnvError::ShapeMismatch`] when `stacked` is not a member of the
    /// stacked space's layout.
    pub fn unstack(&self, stacked: &Value) -> Result<(Value, Value), EnvError> {
        match (self.layout, stacked) {
            (Layout::Discrete, Value::MultiDiscrete(v)) if v.len() == 2 => {
                Ok((Value::Discrete(v[0]), Value::Discrete(v[1])))
            }
            (Layout::Box { row, len }, Value::Box(v)) if v.len() == 2 * len => {
                let (o, g) = split_rows(v, row);
                Ok((Value::Box(o), Value::Box(g)))
            }
            (Layout::MultiDiscrete { len }, Value::MultiDiscrete(v)) if v.len() == 2 * len => {
                let (o, g) = v.split_at(len);
                Ok((Value::MultiDiscrete(o.to_vec()), Value::MultiDiscrete(g.to_vec())))
            }
            (Layout::MultiBinary { len }, Value::MultiBinary(v)) if v.len() == 2 * len => {
                let (o, g) = v.split_at(len);
                Ok((Value::MultiBinary(o.to_vec()), Value::MultiBinary(g.to_vec())))
            }
            _ => Err(EnvError::ShapeMismatch(format!(
                "{} value of length {} is not a stacked {}",
                stacked.kind(),
                stacked.len(),
                self.observation_space
            ))),
        }
    }
}

/// Concatenates `a` and `b` along their innermost axis of length `row`.
fn interleave_rows<T: Copy>(a: &[T], b: &[T], row: usize) -> Vec<T> {
    if row == 0 {
        return Vec::new();
    }
    a.chunks(row)
        .zip(b.chunks(row))
        .flat_map(|(x, y)| x.iter().chain(y))
        .copied()
        .collect()
}

fn split_rows<T: Copy>(v: &[T], row: usize) -> (Vec<T>, Vec<T>) {
    if row == 0 {
        return (Vec::new(), Vec::new());
    }
    let mut first = Vec::with_capacity(v.len() / 2);
    let mut second = Vec::with_capacity(v.len() / 2);
    for chunk in v.chunks(2 * row) {
        let (x, y) = chunk.split_at(row);
        first.extend_from_slice(x);
        second.extend_from_slice(y);
    }
    (first, second)
}
