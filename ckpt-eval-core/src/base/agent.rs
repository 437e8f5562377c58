//! Agent.
use super::{Env, Policy};
use anyhow::Result;
use std::path::Path;

/// Represents a trained policy that can be restored from a checkpoint.
pub trait Agent<E: Env>: Policy<E> {
    /// Restores the parameters of the agent from the given checkpoint file.
    fn restore(&mut self, path: &Path) -> Result<()>;

    /// Switches stochastic action selection on or off.
    ///
    /// With exploration off, the agent is expected to act greedily.
    fn set_explore(&mut self, explore: bool) -> Result<()>;

    /// Returns if stochastic action selection is on.
    fn is_explore(&self) -> bool;
}
