//! Evaluate [`Policy`].
use crate::{record::Recorder, Env, Policy};
use anyhow::Result;
mod rollout_evaluator;
pub use rollout_evaluator::RolloutEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Runs evaluation episodes with `policy`, writing their telemetry to `recorder`.
    ///
    /// The caller of this method needs to handle the internal state of `policy`,
    /// like restoring parameters or switching exploration.
    fn evaluate<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<()>
    where
        P: Policy<E> + ?Sized,
        R: Recorder + ?Sized;
}
