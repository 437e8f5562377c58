mod args;
mod config;
use anyhow::Result;
use args::Args;
use ckpt_eval_core::{
    record::JsonlRecorder, resolve_experiment_dir, select_checkpoint, Agent, Checkpoint,
    EvalError, EvalLayout, Evaluator as _, RolloutEvaluator,
};
use ckpt_eval_rllib::{load_training_params, RayRuntime, RllibAgent, RllibEnv};
use clap::Parser;
use config::{EvalConfig, EvalRun, EVAL_CONFIG};
use log::info;
use std::path::PathBuf;

/// Finds the experiment run and checkpoint to evaluate and creates the output directories.
fn locate(config: &EvalConfig) -> Result<(PathBuf, Checkpoint, EvalLayout)> {
    let experiment_dir = resolve_experiment_dir(&config.dir)?;
    let checkpoint = select_checkpoint(&experiment_dir, config.ckpt_num)?
        .ok_or_else(|| EvalError::NoCheckpoint(experiment_dir.clone()))?;
    info!(
        "Evaluate checkpoint {} of {:?}",
        checkpoint.id, experiment_dir
    );

    let layout = EvalLayout::new(&experiment_dir, &checkpoint, config.output_dir.clone());
    layout.create_dirs()?;
    Ok((experiment_dir, checkpoint, layout))
}

fn eval(config: &EvalConfig) -> Result<()> {
    let (experiment_dir, checkpoint, layout) = locate(config)?;

    let params = load_training_params(&layout.config_path)?;
    let seed = config.seed.or(params.env.seed);
    EvalRun::new(config.clone(), &experiment_dir, &checkpoint, &layout, seed)
        .save(layout.ckpt_eval_dir.join(EVAL_CONFIG))?;

    let ray = RayRuntime::init()?;
    let mut agent = RllibAgent::build(&config.agent, &params.runtime, &params.env, &ray)?;
    agent.restore(&layout.checkpoint_path)?;
    let env = RllibEnv::build(&params.env, seed)?;
    agent.set_explore(config.explore)?;

    let mut evaluator = RolloutEvaluator::new(env, config.num_rollouts)?;
    let mut recorder = JsonlRecorder::new(&layout.log_path);
    evaluator.evaluate(&mut agent, &mut recorder)?;
    info!("Wrote {:?}", layout.log_path);

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config: EvalConfig = Args::parse().into();
    eval(&config)
}
