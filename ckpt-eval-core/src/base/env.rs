//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// Unlike a training environment, nothing here resets automatically at the end of an
/// episode. The caller decides when to call [`Env::reset`].
pub trait Env {
    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Seeds the random number generator of the environment.
    ///
    /// `None` leaves the seeding to the environment.
    fn seed(&mut self, seed: Option<i64>) -> Result<()>;
}
