//! Wrapper of RLlib trainers.
use crate::{
    env::{PyAct, PyObs},
    params::{EnvParams, RuntimeParams},
    runtime::RayRuntime,
    RllibEnv,
};
use anyhow::{Context, Result};
use ckpt_eval_core::{Agent, Policy};
use log::info;
use pyo3::{types::PyDict, PyObject, Python};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of [`RllibAgent`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AgentConfig {
    /// Python module of the trainer class.
    pub module: String,

    /// Name of the trainer class.
    pub class: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            module: "ray.rllib.agents.ppo".to_string(),
            class: "PPOTrainer".to_string(),
        }
    }
}

impl AgentConfig {
    /// Sets the Python module of the trainer class.
    pub fn module(mut self, v: impl Into<String>) -> Self {
        self.module = v.into();
        self
    }

    /// Sets the name of the trainer class.
    pub fn class(mut self, v: impl Into<String>) -> Self {
        self.class = v.into();
        self
    }
}

/// A trainer of RLlib, used for computing actions.
pub struct RllibAgent {
    trainer: PyObject,
    explore: bool,
}

impl RllibAgent {
    /// Constructs the trainer as `class(config=config, env=env)`.
    ///
    /// `_ray` ties construction to an initialized Ray runtime.
    pub fn build(
        config: &AgentConfig,
        runtime_params: &RuntimeParams,
        env_params: &EnvParams,
        _ray: &RayRuntime,
    ) -> Result<Self> {
        let trainer = Python::with_gil(|py| -> Result<PyObject> {
            let class = py
                .import(config.module.as_str())
                .with_context(|| format!("Failed to import {}", config.module))?
                .getattr(config.class.as_str())?;
            let kwargs = PyDict::new(py);
            kwargs.set_item("config", runtime_params.config_copy(py)?)?;
            kwargs.set_item("env", env_params.env.as_ref(py))?;
            let trainer = class
                .call((), Some(kwargs))
                .with_context(|| format!("Failed to construct {}", config.class))?;
            Ok(trainer.into())
        })?;
        info!("Built {}.{}", config.module, config.class);

        Ok(Self {
            trainer,
            explore: false,
        })
    }
}

impl Policy<RllibEnv> for RllibAgent {
    fn compute_action(&mut self, obs: &PyObs) -> Result<PyAct> {
        Python::with_gil(|py| -> Result<PyAct> {
            let act = self
                .trainer
                .call_method1(py, "compute_action", (obs.obj.clone_ref(py),))?;
            PyAct::new(py, act.as_ref(py))
        })
    }
}

impl Agent<RllibEnv> for RllibAgent {
    fn restore(&mut self, path: &Path) -> Result<()> {
        let path_str = path
            .to_str()
            .with_context(|| format!("Checkpoint path {:?} is not valid UTF-8", path))?;
        Python::with_gil(|py| -> Result<()> {
            self.trainer
                .call_method1(py, "restore", (path_str,))
                .with_context(|| format!("Failed to restore {:?}", path))?;
            Ok(())
        })?;
        info!("Restored checkpoint {:?}", path);
        Ok(())
    }

    /// Sets `explore` in the configuration of the default policy of the trainer.
    fn set_explore(&mut self, explore: bool) -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let policy = self.trainer.call_method0(py, "get_policy")?;
            policy
                .getattr(py, "config")?
                .as_ref(py)
                .set_item("explore", explore)?;
            Ok(())
        })?;
        self.explore = explore;
        info!("Set explore = {}", explore);
        Ok(())
    }

    fn is_explore(&self) -> bool {
        self.explore
    }
}
