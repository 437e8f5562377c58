#![warn(missing_docs)]
//! Core of the checkpoint evaluation harness.
//!
//! The harness evaluates a policy saved by an external RL framework. It works in three steps:
//!
//! 1. [`resolve_experiment_dir`] finds the experiment run directory, the one holding
//!    the `params.pkl` configuration artifact.
//! 2. [`select_checkpoint`] picks the checkpoint to restore, either the requested one
//!    or the latest.
//! 3. [`RolloutEvaluator`] runs episodes with an [`Agent`] in an [`Env`] and writes one
//!    [`RolloutRecord`](record::RolloutRecord) per environment step through a
//!    [`Recorder`](record::Recorder).
//!
//! Environments and agents are abstract here. `ckpt-eval-rllib` provides implementations
//! backed by Python objects.
pub mod checkpoint;
pub mod dummy;
pub mod error;
pub mod experiment;
pub mod layout;
pub mod record;

mod base;
pub use base::{Act, Agent, Env, Info, InfoValue, Obs, Policy, Step};

mod evaluator;
pub use checkpoint::{select_checkpoint, Checkpoint};
pub use error::EvalError;
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use experiment::{resolve_experiment_dir, CONFIG_ARTIFACT};
pub use layout::EvalLayout;
