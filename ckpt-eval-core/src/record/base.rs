use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Telemetry of a single environment step in an evaluation rollout.
///
/// Serialized as one JSON object with the fields in declaration order.
/// Non-finite values in `actions`, `obs` and `episode_reward` are written as the strings
/// `"NaN"`, `"inf"` and `"-inf"`, as [`InfoValue::to_json`](crate::InfoValue::to_json) does
/// for `info`, and read back as floats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RolloutRecord {
    /// Auxiliary information returned by the environment.
    pub info: Value,

    /// Action taken at this step.
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    pub actions: Vec<f64>,

    /// Observation after the step.
    #[serde(serialize_with = "serialize_floats", deserialize_with = "deserialize_floats")]
    pub obs: Vec<f64>,

    /// Index of the rollout, starting from 0.
    pub rollout_num: usize,

    /// Index of the step in the rollout, starting from 1.
    pub step_number: usize,

    /// Sum of rewards in the rollout up to and including this step.
    #[serde(serialize_with = "serialize_float", deserialize_with = "deserialize_float")]
    pub episode_reward: f64,
}

fn float_to_json(v: f64) -> Value {
    match serde_json::Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None => Value::String(v.to_string()),
    }
}

fn float_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Only the spellings of non-finite values
        Value::String(s) => s.parse::<f64>().ok().filter(|v| !v.is_finite()),
        _ => None,
    }
}

fn serialize_float<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    float_to_json(*v).serialize(serializer)
}

fn serialize_floats<S: Serializer>(vs: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(vs.iter().map(|v| float_to_json(*v)))
}

fn deserialize_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    float_from_json(&value).ok_or_else(|| D::Error::custom(format!("not a float: {}", value)))
}

fn deserialize_floats<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .iter()
        .map(|value| {
            float_from_json(value)
                .ok_or_else(|| D::Error::custom(format!("not a float: {}", value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(actions: Vec<f64>, obs: Vec<f64>, episode_reward: f64) -> RolloutRecord {
        RolloutRecord {
            info: json!({}),
            actions,
            obs,
            rollout_num: 0,
            step_number: 1,
            episode_reward,
        }
    }

    #[test]
    fn test_non_finite_as_strings() -> anyhow::Result<()> {
        let r = record(
            vec![f64::NAN, 0.5],
            vec![f64::INFINITY, f64::NEG_INFINITY],
            f64::NAN,
        );
        assert_eq!(
            serde_json::to_string(&r)?,
            "{\"info\":{},\"actions\":[\"NaN\",0.5],\"obs\":[\"inf\",\"-inf\"],\
             \"rollout_num\":0,\"step_number\":1,\"episode_reward\":\"NaN\"}"
        );

        let r_: RolloutRecord = serde_json::from_str(&serde_json::to_string(&r)?)?;
        assert!(r_.actions[0].is_nan());
        assert_eq!(r_.actions[1], 0.5);
        assert_eq!(r_.obs, vec![f64::INFINITY, f64::NEG_INFINITY]);
        assert!(r_.episode_reward.is_nan());
        Ok(())
    }

    #[test]
    fn test_integers_read_as_floats() -> anyhow::Result<()> {
        let r: RolloutRecord = serde_json::from_str(
            "{\"info\":null,\"actions\":[1],\"obs\":[-2],\
             \"rollout_num\":0,\"step_number\":1,\"episode_reward\":3}",
        )?;
        let mut expected = record(vec![1.0], vec![-2.0], 3.0);
        expected.info = Value::Null;
        assert_eq!(r, expected);
        Ok(())
    }

    #[test]
    fn test_invalid_float_rejected() {
        for line in [
            "{\"info\":{},\"actions\":[null],\"obs\":[],\"rollout_num\":0,\"step_number\":1,\"episode_reward\":0}",
            "{\"info\":{},\"actions\":[],\"obs\":[\"1.5\"],\"rollout_num\":0,\"step_number\":1,\"episode_reward\":0}",
            "{\"info\":{},\"actions\":[],\"obs\":[],\"rollout_num\":0,\"step_number\":1,\"episode_reward\":\"x\"}",
        ]
        .iter()
        {
            assert!(serde_json::from_str::<RolloutRecord>(line).is_err(), "{}", line);
        }
    }
}
