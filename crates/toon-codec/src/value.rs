//! The TOON value tree.
//!
//! [`ToonValue`] is the single recursive sum type both halves of the codec
//! operate on. Objects preserve insertion order on both sides: the encoder
//! emits fields in the order they were inserted, and the decoder records
//! keys in first-occurrence order.

use indexmap::IndexMap;

/// Insertion-ordered map used for TOON objects.
pub type Map<K = String, V = ToonValue> = IndexMap<K, V>;

/// A decoded or to-be-encoded TOON value.
///
/// Numbers carry IEEE-754 double precision; `-0.0` is normalized to `0.0`
/// by the codec, and non-finite values are rejected at encode time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToonValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ToonValue>),
    Object(Map<String, ToonValue>),
}

impl ToonValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ToonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ToonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ToonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ToonValue>> {
        match self {
            ToonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, ToonValue>> {
        match self {
            ToonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<bool> for ToonValue {
    fn from(b: bool) -> Self {
        ToonValue::Bool(b)
    }
}

impl From<i32> for ToonValue {
    fn from(n: i32) -> Self {
        ToonValue::Number(f64::from(n))
    }
}

impl From<i64> for ToonValue {
    fn from(n: i64) -> Self {
        ToonValue::Number(n as f64)
    }
}

impl From<u32> for ToonValue {
    fn from(n: u32) -> Self {
        ToonValue::Number(f64::from(n))
    }
}

impl From<u64> for ToonValue {
    fn from(n: u64) -> Self {
        ToonValue::Number(n as f64)
    }
}

impl From<f64> for ToonValue {
    fn from(n: f64) -> Self {
        ToonValue::Number(n)
    }
}

impl From<&str> for ToonValue {
    fn from(s: &str) -> Self {
        ToonValue::String(s.to_string())
    }
}

impl From<String> for ToonValue {
    fn from(s: String) -> Self {
        ToonValue::String(s)
    }
}

impl<T: Into<ToonValue>> From<Vec<T>> for ToonValue {
    fn from(v: Vec<T>) -> Self {
        ToonValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Map<String, ToonValue>> for ToonValue {
    fn from(m: Map<String, ToonValue>) -> Self {
        ToonValue::Object(m)
    }
}

impl From<serde_json::Value> for ToonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ToonValue::Null,
            serde_json::Value::Bool(b) => ToonValue::Bool(b),
            serde_json::Value::Number(n) => ToonValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => ToonValue::String(s),
            serde_json::Value::Array(arr) => {
                ToonValue::Array(arr.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => ToonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ToonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&ToonValue> for serde_json::Value {
    fn from(value: &ToonValue) -> Self {
        match value {
            ToonValue::Null => serde_json::Value::Null,
            ToonValue::Bool(b) => serde_json::Value::Bool(*b),
            ToonValue::Number(f) => {
                // Integral doubles become JSON integers; non-finite folds to null.
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    serde_json::Value::Number(serde_json::Number::from(*f as i64))
                } else {
                    serde_json::Number::from_f64(*f)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            ToonValue::String(s) => serde_json::Value::String(s.clone()),
            ToonValue::Array(arr) => serde_json::Value::Array(arr.iter().map(Into::into).collect()),
            ToonValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ToonValue> for serde_json::Value {
    fn from(value: ToonValue) -> Self {
        serde_json::Value::from(&value)
    }
}

/// Builds a [`ToonValue`] from a JSON-like literal.
///
/// ```
/// use toon_codec::{toon, ToonValue};
///
/// let value = toon!({
///     "name": "Alice",
///     "tags": ["rust", "toon"]
/// });
/// assert!(value.as_object().is_some());
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::ToonValue::Null
    };

    (true) => {
        $crate::ToonValue::Bool(true)
    };

    (false) => {
        $crate::ToonValue::Bool(false)
    };

    ([]) => {
        $crate::ToonValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::ToonValue::Array(vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::ToonValue::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::ToonValue::Object(object)
    }};

    ($other:expr) => {
        $crate::ToonValue::from($other)
    };
}
