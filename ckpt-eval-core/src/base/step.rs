//! Environment step.
use super::{Env, InfoValue};

/// Additional information to `Obs` and `Act`.
pub trait Info {
    /// Converts the information into a value that can always be serialized.
    fn to_value(&self) -> InfoValue;
}

impl Info for () {
    fn to_value(&self) -> InfoValue {
        InfoValue::Null
    }
}

impl Info for InfoValue {
    fn to_value(&self) -> InfoValue {
        self.clone()
    }
}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f64,

    /// Flag denoting if the episode ends.
    pub is_done: bool,

    /// Information defined by the environment.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, act: E::Act, reward: f64, is_done: bool, info: E::Info) -> Self {
        Step {
            act,
            obs,
            reward,
            is_done,
            info,
        }
    }
}
