/// A single observation or action, tagged by the kind of space it belongs to.
///
/// `Box` values are stored flat in row-major order; the owning [`Space`]
/// carries the shape.
///
/// [`Space`]: crate::Space
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Discrete(u64),
    Box(Vec<f32>),
    MultiDiscrete(Vec<u64>),
    MultiBinary(Vec<u8>),
    Tuple(Vec<Value>),
    Dict(Vec<(String, Value)>),
}

/// One value per sub-environment of a vectorized environment.
pub type Batch = Vec<Value>;

impl Value {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Discrete(_) => "Discrete",
            Value::Box(_) => "Box",
            Value::MultiDiscrete(_) => "MultiDiscrete",
            Value::MultiBinary(_) => "MultiBinary",
            Value::Tuple(_) => "Tuple",
            Value::Dict(_) => "Dict",
        }
    }

    /// Number of scalar components once flattened.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Value::Discrete(_) => 1,
            Value::Box(v) => v.len(),
            Value::MultiDiscrete(v) => v.len(),
            Value::MultiBinary(v) => v.len(),
            Value::Tuple(items) => items.iter().map(Value::len).sum(),
            Value::Dict(items) => items.iter().map(|(_, v)| v.len()).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the value into a vector of `f32`, e.g. for feeding a network
    /// or comparing achieved and desired goals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32s(&self) -> Vec<f32> {
        match self {
            Value::Discrete(v) => vec![*v as f32],
            Value::Box(v) => v.clone(),
            Value::MultiDiscrete(v) => v.iter().map(|&x| x as f32).collect(),
            Value::MultiBinary(v) => v.iter().map(|&x| f32::from(x)).collect(),
            Value::Tuple(items) => items.iter().flat_map(Value::to_f32s).collect(),
            Value::Dict(items) => items.iter().flat_map(|(_, v)| v.to_f32s()).collect(),
        }
    }
}
