//! Paths read and written during an evaluation run.
use crate::{checkpoint::Checkpoint, experiment::CONFIG_ARTIFACT};
use anyhow::{Context, Result};
use log::info;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name of the evaluation log.
pub const EVAL_LOG: &str = "eval.log";

/// Paths for evaluating a checkpoint of an experiment run.
///
/// Inputs:
///
/// * `{experiment_dir}/params.pkl`
/// * `{experiment_dir}/checkpoint_<suffix>/checkpoint-<id>`
///
/// Outputs:
///
/// * `{eval_dir}/ckpt_<id>/eval.log`, where `eval_dir` is `{experiment_dir}/eval` unless
///   an output directory is given.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalLayout {
    /// Serialized training configuration.
    pub config_path: PathBuf,

    /// Checkpoint file to restore the agent from.
    pub checkpoint_path: PathBuf,

    /// Root of evaluation outputs.
    pub eval_dir: PathBuf,

    /// Directory of the outputs for the checkpoint.
    pub ckpt_eval_dir: PathBuf,

    /// Evaluation log.
    pub log_path: PathBuf,
}

impl EvalLayout {
    /// Constructs the layout.
    pub fn new(
        experiment_dir: impl AsRef<Path>,
        checkpoint: &Checkpoint,
        output_dir: Option<PathBuf>,
    ) -> Self {
        let experiment_dir = experiment_dir.as_ref();
        let eval_dir = output_dir.unwrap_or_else(|| experiment_dir.join("eval"));
        let ckpt_eval_dir = eval_dir.join(format!("ckpt_{}", checkpoint.id));
        let log_path = ckpt_eval_dir.join(EVAL_LOG);

        Self {
            config_path: experiment_dir.join(CONFIG_ARTIFACT),
            checkpoint_path: experiment_dir
                .join(checkpoint.dir_name())
                .join(checkpoint.file_name()),
            eval_dir,
            ckpt_eval_dir,
            log_path,
        }
    }

    /// Creates the output directories if they do not exist.
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [&self.eval_dir, &self.ckpt_eval_dir].iter() {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        }
        info!("Write evaluation log to {:?}", self.log_path);
        Ok(())
    }
}
