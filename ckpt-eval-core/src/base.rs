//! Core functionalities.
mod agent;
mod env;
mod info;
mod policy;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use info::InfoValue;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
pub trait Obs: Clone + Debug {
    /// Returns the observation as a flat sequence of floating-point values.
    ///
    /// This is what the evaluation log stores under `obs`.
    fn to_vec(&self) -> Vec<f64>;
}

/// An action on an environment.
pub trait Act: Clone + Debug {
    /// Returns the action as a flat sequence of floating-point values.
    ///
    /// This is what the evaluation log stores under `actions`.
    fn to_vec(&self) -> Vec<f64>;
}
