//! Rollout-based implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{
    record::{Recorder, RolloutRecord},
    Act, Env, Info, Obs, Policy,
};
use anyhow::Result;
use log::info;

/// Runs a fixed number of rollouts and records every environment step.
///
/// For each rollout the environment is reset, then the policy acts until the environment
/// reports the end of the episode. After every step a [`RolloutRecord`] is written to the
/// recorder. `rollout_num` counts rollouts from 0, `step_number` counts steps from 1 and
/// starts over in every rollout.
///
/// Nothing is retried. An error of the policy, the environment or the recorder ends the
/// evaluation, and the records written before it stay where they are.
///
/// # Examples
///
/// ```ignore
/// let env = RllibEnv::build(&env_params, Some(42))?;
/// let mut evaluator = RolloutEvaluator::new(env, 10)?;
/// let mut recorder = JsonlRecorder::new("eval/ckpt_100/eval.log");
/// evaluator.evaluate(&mut agent, &mut recorder)?;
/// ```
pub struct RolloutEvaluator<E: Env> {
    /// The number of rollouts to run.
    n_rollouts: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for RolloutEvaluator<E> {
    fn evaluate<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<()>
    where
        P: Policy<E> + ?Sized,
        R: Recorder + ?Sized,
    {
        let mut r_total = 0f64;

        for rollout_num in 0..self.n_rollouts {
            let mut obs = self.env.reset()?;
            let mut episode_reward = 0f64;
            let mut step_number = 0;

            loop {
                let act = policy.compute_action(&obs)?;
                let step = self.env.step(&act)?;
                step_number += 1;
                episode_reward += step.reward;

                let record = RolloutRecord {
                    info: step.info.to_value().to_json(),
                    actions: step.act.to_vec(),
                    obs: step.obs.to_vec(),
                    rollout_num,
                    step_number,
                    episode_reward,
                };
                recorder.write(&record)?;

                if step.is_done {
                    break;
                }
                obs = step.obs;
            }

            info!(
                "Rollout {}/{}: {} steps, episode reward {}",
                rollout_num + 1,
                self.n_rollouts,
                step_number,
                episode_reward
            );
            r_total += episode_reward;
        }

        if self.n_rollouts > 0 {
            info!(
                "Mean episode reward over {} rollouts: {}",
                self.n_rollouts,
                r_total / self.n_rollouts as f64
            );
        }

        Ok(())
    }
}

impl<E: Env> RolloutEvaluator<E> {
    /// Constructs a new [`RolloutEvaluator`].
    ///
    /// * `env` - Environment to evaluate in, already seeded.
    /// * `n_rollouts` - Number of rollouts per call of [`Evaluator::evaluate`].
    pub fn new(env: E, n_rollouts: usize) -> Result<Self> {
        Ok(Self { n_rollouts, env })
    }

    /// Returns the environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}
