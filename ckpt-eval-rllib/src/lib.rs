//! RLlib agents and environments for the evaluation harness, based on [`PyO3`](https://github.com/PyO3/pyo3).
//!
//! A training run of RLlib leaves a pickled configuration, `params.pkl`, and checkpoint
//! directories in the experiment directory. This crate brings them back to life in an
//! embedded Python interpreter:
//!
//! * [`load_training_params`] unpickles `params.pkl` and splits it into [`RuntimeParams`],
//!   handed to the trainer untouched, and [`EnvParams`], used to build the environment.
//! * [`RayRuntime`] initializes Ray and shuts it down when dropped.
//! * [`RllibAgent`] wraps a trainer such as `PPOTrainer` and implements
//!   [`Agent`](ckpt_eval_core::Agent).
//! * [`RllibEnv`] wraps the environment class stored in the configuration and implements
//!   [`Env`](ckpt_eval_core::Env).
//!
//! Observations and actions stay Python objects, [`PyObs`] and [`PyAct`], so they can be
//! passed back to Python as they are. Each also keeps a flat `Vec<f64>` copy for the
//! evaluation log. Step information is converted into
//! [`InfoValue`](ckpt_eval_core::InfoValue) while the GIL is held, see [`to_info_value`].
mod agent;
mod env;
mod params;
mod runtime;
pub mod util;
pub use agent::{AgentConfig, RllibAgent};
pub use env::{PyAct, PyObs, RllibEnv};
pub use params::{load_training_params, EnvParams, RuntimeParams, TrainingParams};
pub use runtime::RayRuntime;
pub use util::{to_f64_vec, to_info_value};
