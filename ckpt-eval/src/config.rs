//! Settings of an evaluation run.
use crate::args::Args;
use anyhow::Result;
use chrono::{DateTime, Local};
use ckpt_eval_core::{Checkpoint, EvalLayout};
use ckpt_eval_rllib::AgentConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// File name of [`EvalRun`], saved beside the evaluation log.
pub const EVAL_CONFIG: &str = "eval_config.yaml";

/// Settings of an evaluation run as given on the command line.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EvalConfig {
    /// Experiment directory as given.
    pub dir: PathBuf,

    /// Requested checkpoint, the latest one if `None`.
    pub ckpt_num: Option<u64>,

    /// Seed overriding the one used in training.
    pub seed: Option<i64>,

    /// Stochastic action selection.
    pub explore: bool,

    /// Root of evaluation outputs.
    pub output_dir: Option<PathBuf>,

    /// Number of rollouts.
    pub num_rollouts: usize,

    /// Trainer class restoring the checkpoint.
    pub agent: AgentConfig,
}

impl From<Args> for EvalConfig {
    fn from(args: Args) -> Self {
        Self {
            dir: args.dir,
            ckpt_num: args.ckpt_num,
            seed: args.seed,
            explore: args.explore,
            output_dir: args.output_dir,
            num_rollouts: args.num_rollouts,
            agent: AgentConfig::default()
                .module(args.agent_module)
                .class(args.agent_class),
        }
    }
}

/// An [`EvalConfig`] with the values resolved from it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EvalRun {
    /// Settings the run was started with.
    pub config: EvalConfig,

    /// Directory of the experiment run.
    pub experiment_dir: PathBuf,

    /// Id of the evaluated checkpoint.
    pub checkpoint_id: u64,

    /// Checkpoint file the agent was restored from.
    pub checkpoint_path: PathBuf,

    /// Seed given to the environment.
    pub seed: Option<i64>,

    /// Evaluation log.
    pub log_path: PathBuf,

    /// Start time of the run.
    pub started_at: DateTime<Local>,
}

impl EvalRun {
    /// Records the start of a run.
    pub fn new(
        config: EvalConfig,
        experiment_dir: impl AsRef<Path>,
        checkpoint: &Checkpoint,
        layout: &EvalLayout,
        seed: Option<i64>,
    ) -> Self {
        Self {
            config,
            experiment_dir: experiment_dir.as_ref().to_path_buf(),
            checkpoint_id: checkpoint.id,
            checkpoint_path: layout.checkpoint_path.clone(),
            seed,
            log_path: layout.log_path.clone(),
            started_at: Local::now(),
        }
    }

    /// Constructs [`EvalRun`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EvalRun`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempdir::TempDir;

    fn config(argv: &[&str]) -> EvalConfig {
        let mut v = vec!["ckpt-eval"];
        v.extend_from_slice(argv);
        Args::try_parse_from(v).unwrap().into()
    }

    #[test]
    fn test_from_args() {
        let config = config(&[
            "--dir",
            "/exp",
            "--agent_module",
            "ray.rllib.agents.sac",
            "--agent_class",
            "SACTrainer",
            "--explore",
        ]);
        assert_eq!(config.dir, PathBuf::from("/exp"));
        assert!(config.explore);
        assert_eq!(config.num_rollouts, 10);
        assert_eq!(
            config.agent,
            AgentConfig::default()
                .module("ray.rllib.agents.sac")
                .class("SACTrainer")
        );
    }

    #[test]
    fn test_save_load() -> Result<()> {
        let tmp = TempDir::new("eval_run")?;
        let experiment_dir = tmp.path().join("PPO_DockingEnv_0");
        let checkpoint = Checkpoint::from_dir_name("checkpoint_000020").unwrap();
        let layout = EvalLayout::new(&experiment_dir, &checkpoint, None);
        let run = EvalRun::new(
            config(&["--dir", "/exp", "--seed", "5"]),
            &experiment_dir,
            &checkpoint,
            &layout,
            Some(5),
        );

        let path = tmp.path().join(EVAL_CONFIG);
        run.save(&path)?;
        let run_ = EvalRun::load(&path)?;
        assert_eq!(run, run_);
        assert_eq!(run_.checkpoint_id, 20);
        assert_eq!(
            run_.checkpoint_path,
            experiment_dir.join("checkpoint_000020").join("checkpoint-20")
        );
        Ok(())
    }
}
