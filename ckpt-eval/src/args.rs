use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Evaluate a checkpoint of an RLlib experiment
///
/// Restores the policy from a checkpoint, runs rollouts in the environment the policy was
/// trained on and appends every step to `<output_dir>/ckpt_<n>/eval.log`.
#[derive(Clone, Parser, Debug, Serialize, Deserialize)]
#[command(version, about)]
pub struct Args {
    /// The full path to the experiment directory.
    /// The parent of a single experiment run directory is accepted as well.
    #[arg(long)]
    pub dir: PathBuf,

    /// Checkpoint to load. The latest checkpoint is loaded if not given.
    #[arg(long = "ckpt_num")]
    pub ckpt_num: Option<u64>,

    /// Seed used to initialize the evaluation environment.
    /// Defaults to the seed used in training.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Stochastic action selection, for off-policy evaluation.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub explore: bool,

    /// Directory to write evaluation logs in.
    /// Defaults to `eval` in the experiment run directory.
    #[arg(long = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Number of randomly initialized episodes to evaluate.
    #[arg(long = "num_rollouts", default_value_t = 10)]
    pub num_rollouts: usize,

    /// Python module of the trainer class.
    #[arg(long = "agent_module", default_value = "ray.rllib.agents.ppo")]
    pub agent_module: String,

    /// Name of the trainer class.
    #[arg(long = "agent_class", default_value = "PPOTrainer")]
    pub agent_class: String,
}
