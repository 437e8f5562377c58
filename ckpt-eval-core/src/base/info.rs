//! Values of auxiliary step information.
use serde_json::{Map, Number, Value};

/// Auxiliary information of an environment step, in a form that can always be written
/// to the evaluation log.
///
/// Environments report arbitrary diagnostic data. Leaves that have a JSON counterpart
/// are kept as they are, anything else is kept as [`InfoValue::Opaque`] holding a textual
/// description of the original value.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// Missing value.
    Null,

    /// Boolean.
    Bool(bool),

    /// Integer.
    Int(i64),

    /// Floating-point number, possibly non-finite.
    Float(f64),

    /// Text.
    String(String),

    /// Sequence of values.
    List(Vec<InfoValue>),

    /// Key-value pairs in insertion order.
    Map(Vec<(String, InfoValue)>),

    /// A value without JSON counterpart, kept as its description.
    Opaque(String),
}

impl InfoValue {
    /// Converts the value into JSON.
    ///
    /// Non-finite floats and opaque values become strings.
    /// If a key appears more than once in a map, the last one wins.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Int(v) => Value::Number((*v).into()),
            Self::Float(v) => match Number::from_f64(*v) {
                Some(n) => Value::Number(n),
                None => Value::String(v.to_string()),
            },
            Self::String(v) => Value::String(v.clone()),
            Self::List(vs) => Value::Array(vs.iter().map(|v| v.to_json()).collect()),
            Self::Map(kvs) => {
                let mut map = Map::new();
                for (k, v) in kvs.iter() {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
            Self::Opaque(desc) => Value::String(desc.clone()),
        }
    }
}

impl Default for InfoValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<Value> for InfoValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::Number(n) => match n.as_i64() {
                Some(v) => Self::Int(v),
                // u64 above i64::MAX and floats
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(v) => Self::String(v),
            Value::Array(vs) => Self::List(vs.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<bool> for InfoValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for InfoValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for InfoValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for InfoValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_values_are_kept() {
        let info = InfoValue::Map(vec![
            ("success".to_string(), true.into()),
            ("distance".to_string(), 1.5f64.into()),
            ("steps".to_string(), 3i64.into()),
            ("status".to_string(), "docking".into()),
            (
                "pos".to_string(),
                InfoValue::List(vec![0.5f64.into(), (-2.0f64).into()]),
            ),
            ("failure".to_string(), InfoValue::Null),
        ]);

        assert_eq!(
            info.to_json(),
            json!({
                "success": true,
                "distance": 1.5,
                "steps": 3,
                "status": "docking",
                "pos": [0.5, -2.0],
                "failure": null,
            })
        );
    }

    #[test]
    fn test_unserializable_leaves_are_coerced() {
        let info = InfoValue::Map(vec![
            ("ratio".to_string(), f64::NAN.into()),
            ("limit".to_string(), f64::INFINITY.into()),
            (
                "nested".to_string(),
                InfoValue::List(vec![InfoValue::Opaque("<Deputy object>".to_string())]),
            ),
        ]);

        assert_eq!(
            info.to_json(),
            json!({
                "ratio": "NaN",
                "limit": "inf",
                "nested": ["<Deputy object>"],
            })
        );
    }

    #[test]
    fn test_duplicated_key_last_wins() {
        let info = InfoValue::Map(vec![
            ("a".to_string(), 1i64.into()),
            ("a".to_string(), 2i64.into()),
        ]);
        assert_eq!(info.to_json(), json!({ "a": 2 }));
    }

    #[test]
    fn test_from_json_value() {
        let value = json!({ "a": [1, 2.5, "x"], "b": { "c": null } });
        let info: InfoValue = value.clone().into();
        assert_eq!(info.to_json(), value);
    }
}
