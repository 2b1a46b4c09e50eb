//! Observation and action spaces.
//!
//! A [`Space`] describes the set of valid [`Value`]s an environment produces
//! or accepts. The four vector kinds (`Discrete`, `Box`, `MultiDiscrete`,
//! `MultiBinary`) carry their own bounds; `Tuple` and `Dict` compose other
//! spaces.

use std::f32::consts::PI;
use std::fmt;

use fastrand::Rng;

use crate::{EnvError, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    /// Integers in `0..n`.
    Discrete { n: u64 },
    /// Real-valued tensor with per-element bounds, stored flat in row-major order.
    Box {
        low: Vec<f32>,
        high: Vec<f32>,
        shape: Vec<usize>,
    },
    /// Vector of integers, element `i` in `0..nvec[i]`.
    MultiDiscrete { nvec: Vec<u64> },
    /// Vector of `n` bits.
    MultiBinary { n: usize },
    Tuple(Vec<Space>),
    Dict(Vec<(String, Space)>),
}

impl Space {
    #[must_use]
    pub fn discrete(n: u64) -> Self {
        Space::Discrete { n }
    }

    /// Box space with explicit per-element bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ShapeMismatch`] when `low` or `high` do not have
    /// exactly one entry per element of `shape`.
    pub fn bounded(low: Vec<f32>, high: Vec<f32>, shape: Vec<usize>) -> Result<Self, EnvError> {
        let expected: usize = shape.iter().product();
        if low.len() != expected || high.len() != expected {
            return Err(EnvError::ShapeMismatch(format!(
                "box bounds have {} / {} elements, shape {shape:?} needs {expected}",
                low.len(),
                high.len()
            )));
        }
        Ok(Space::Box { low, high, shape })
    }

    /// Box space where every element shares the same scalar bounds.
    #[must_use]
    pub fn uniform_box(low: f32, high: f32, shape: Vec<usize>) -> Self {
        let len: usize = shape.iter().product();
        Space::Box {
            low: vec![low; len],
            high: vec![high; len],
            shape,
        }
    }

    #[must_use]
    pub fn multi_discrete(nvec: Vec<u64>) -> Self {
        Space::MultiDiscrete { nvec }
    }

    #[must_use]
    pub fn multi_binary(n: usize) -> Self {
        Space::MultiBinary { n }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Space::Discrete { .. } => "Discrete",
            Space::Box { .. } => "Box",
            Space::MultiDiscrete { .. } => "MultiDiscrete",
            Space::MultiBinary { .. } => "MultiBinary",
            Space::Tuple(_) => "Tuple",
            Space::Dict(_) => "Dict",
        }
    }

    /// Shape of a single value. Scalars and composite spaces report an empty shape.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Space::Box { shape, .. } => shape.clone(),
            Space::MultiDiscrete { nvec } => vec![nvec.len()],
            Space::MultiBinary { n } => vec![*n],
            Space::Discrete { .. } | Space::Tuple(_) | Space::Dict(_) => Vec::new(),
        }
    }

    /// Number of scalar components in a flattened value of this space.
    #[must_use]
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Discrete { .. } => 1,
            Space::Box { shape, .. } => shape.iter().product(),
            Space::MultiDiscrete { nvec } => nvec.len(),
            Space::MultiBinary { n } => *n,
            Space::Tuple(spaces) => spaces.iter().map(Space::flat_dim).sum(),
            Space::Dict(spaces) => spaces.iter().map(|(_, s)| s.flat_dim()).sum(),
        }
    }

    /// Draws a random value from the space.
    ///
    /// Box axes are sampled uniformly when both bounds are finite, from a
    /// shifted exponential when only one is, and from a standard normal
    /// when neither is.
    ///
    /// # Panics
    ///
    /// Panics if a discrete dimension has zero elements.
    pub fn sample(&self, rng: &mut Rng) -> Value {
        match self {
            Space::Discrete { n } => Value::Discrete(rng.u64(0..*n)),
            Space::Box { low, high, .. } => Value::Box(
                low.iter()
                    .zip(high)
                    .map(|(&l, &h)| sample_axis(l, h, rng))
                    .collect(),
            ),
            Space::MultiDiscrete { nvec } => {
                Value::MultiDiscrete(nvec.iter().map(|&n| rng.u64(0..n)).collect())
            }
            Space::MultiBinary { n } => {
                Value::MultiBinary((0..*n).map(|_| u8::from(rng.bool())).collect())
            }
            Space::Tuple(spaces) => Value::Tuple(spaces.iter().map(|s| s.sample(rng)).collect()),
            Space::Dict(spaces) => Value::Dict(
                spaces
                    .iter()
                    .map(|(k, s)| (k.clone(), s.sample(rng)))
                    .collect(),
            ),
        }
    }

    /// Returns `true` if `value` is a member of this space.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Space::Discrete { n }, Value::Discrete(v)) => v < n,
            (Space::Box { low, high, .. }, Value::Box(v)) => {
                v.len() == low.len()
                    && v.iter()
                        .zip(low.iter().zip(high))
                        .all(|(x, (l, h))| x >= l && x <= h)
            }
            (Space::MultiDiscrete { nvec }, Value::MultiDiscrete(v)) => {
                v.len() == nvec.len() && v.iter().zip(nvec).all(|(x, n)| x < n)
            }
            (Space::MultiBinary { n }, Value::MultiBinary(v)) => {
                v.len() == *n && v.iter().all(|&b| b <= 1)
            }
            (Space::Tuple(spaces), Value::Tuple(items)) => {
                spaces.len() == items.len() && spaces.iter().zip(items).all(|(s, v)| s.contains(v))
            }
            (Space::Dict(spaces), Value::Dict(items)) => {
                spaces.len() == items.len()
                    && spaces
                        .iter()
                        .zip(items)
                        .all(|((ks, s), (kv, v))| ks == kv && s.contains(v))
            }
            _ => false,
        }
    }
}

fn sample_axis(low: f32, high: f32, rng: &mut Rng) -> f32 {
    match (low.is_finite(), high.is_finite()) {
        (true, true) => (low + (high - low) * rng.f32()).min(high),
        (true, false) => low + exponential(rng),
        (false, true) => high - exponential(rng),
        (false, false) => standard_normal(rng),
    }
}

fn exponential(rng: &mut Rng) -> f32 {
    // 1 - u lies in (0, 1], keeping ln finite
    -(1.0 - rng.f32()).ln()
}

fn standard_normal(rng: &mut Rng) -> f32 {
    let u1 = 1.0 - rng.f32();
    let u2 = rng.f32();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Discrete { n } => write!(f, "Discrete({n})"),
            Space::Box { shape, .. } => write!(f, "Box(shape={shape:?})"),
            Space::MultiDiscrete { nvec } => write!(f, "MultiDiscrete({nvec:?})"),
            Space::MultiBinary { n } => write!(f, "MultiBinary({n})"),
            Space::Tuple(spaces) => {
                write!(f, "Tuple(")?;
                for (i, s) in spaces.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{s}")?;
                }
                write!(f, ")")
            }
            Space::Dict(spaces) => {
                write!(f, "Dict(")?;
                for (i, (k, s)) in spaces.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {s}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_bounded_box_respects_finite_side() {
        let space = Space::bounded(
            vec![0.0, f32::NEG_INFINITY, f32::NEG_INFINITY],
            vec![f32::INFINITY, 1.0, f32::INFINITY],
            vec![3],
        )
        .unwrap();
        let mut rng = Rng::with_seed(3);
        for _ in 0..200 {
            let Value::Box(v) = space.sample(&mut rng) else {
                panic!("expected a box value");
            };
            assert!(v[0] >= 0.0);
            assert!(v[1] <= 1.0);
            assert!(v[2].is_finite());
        }
    }

    #[test]
    fn display_names_composites() {
        let space = Space::Dict(vec![
            ("obs".into(), Space::discrete(3)),
            ("bits".into(), Space::multi_binary(2)),
        ]);
        assert_eq!(space.to_string(), "Dict(obs: Discrete(3), bits: MultiBinary(2))");
    }
}
