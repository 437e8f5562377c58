//! Wrapper of RLlib environments implemented in Python.
use crate::{
    params::EnvParams,
    util::{to_f64_vec, to_info_value},
};
use anyhow::{bail, Context, Result};
use ckpt_eval_core::{Act, Env, InfoValue, Obs, Step};
use log::{info, trace};
use pyo3::{
    types::{PyDict, PyTuple},
    PyAny, PyObject, Python,
};

/// Observation of [`RllibEnv`].
#[derive(Clone, Debug)]
pub struct PyObs {
    /// The observation as returned by the environment.
    pub obj: PyObject,

    values: Vec<f64>,
}

impl PyObs {
    /// Wraps an observation returned by an environment.
    pub fn new(py: Python, obj: &PyAny) -> Result<Self> {
        let values = to_f64_vec(py, obj).context("Unsupported observation")?;
        Ok(Self {
            obj: obj.into(),
            values,
        })
    }
}

impl Obs for PyObs {
    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

/// Action of [`RllibEnv`].
#[derive(Clone, Debug)]
pub struct PyAct {
    /// The action as computed by the trainer.
    pub obj: PyObject,

    values: Vec<f64>,
}

impl PyAct {
    /// Wraps an action computed by a trainer.
    pub fn new(py: Python, obj: &PyAny) -> Result<Self> {
        let values = to_f64_vec(py, obj).context("Unsupported action")?;
        Ok(Self {
            obj: obj.into(),
            values,
        })
    }
}

impl Act for PyAct {
    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

/// An environment class used in RLlib training, instantiated in the embedded interpreter.
///
/// The environment follows the gym interface: `reset()` returns an observation and
/// `step(action)` returns `(obs, reward, done, info)`. The five-element form
/// `(obs, reward, terminated, truncated, info)` is accepted as well, the episode then ends
/// when either flag is set.
#[derive(Debug)]
pub struct RllibEnv {
    env: PyObject,
}

impl RllibEnv {
    /// Builds the environment as `env(config=env_config)` and seeds it.
    pub fn build(params: &EnvParams, seed: Option<i64>) -> Result<Self> {
        let env = Python::with_gil(|py| -> Result<PyObject> {
            let kwargs = PyDict::new(py);
            kwargs.set_item("config", params.env_config.as_ref(py))?;
            let env = params
                .env
                .as_ref(py)
                .call((), Some(kwargs))
                .with_context(|| format!("Failed to build {}", params.env_name()))?;
            Ok(env.into())
        })?;
        info!("Built environment {}", params.env_name());

        let mut env = Self { env };
        env.seed(seed)?;
        Ok(env)
    }
}

impl Env for RllibEnv {
    type Obs = PyObs;
    type Act = PyAct;
    type Info = InfoValue;

    fn reset(&mut self) -> Result<PyObs> {
        trace!("RllibEnv::reset()");
        Python::with_gil(|py| -> Result<PyObs> {
            let obs = self.env.call_method0(py, "reset")?;
            PyObs::new(py, obs.as_ref(py))
        })
    }

    fn step(&mut self, a: &PyAct) -> Result<Step<Self>> {
        trace!("RllibEnv::step()");
        Python::with_gil(|py| -> Result<Step<Self>> {
            let ret = self
                .env
                .call_method1(py, "step", (a.obj.clone_ref(py),))?;
            let ret: &PyTuple = ret.extract(py).context("step() must return a tuple")?;

            let (is_done, info) = match ret.len() {
                4 => (ret.get_item(2).is_true()?, ret.get_item(3)),
                5 => (
                    ret.get_item(2).is_true()? || ret.get_item(3).is_true()?,
                    ret.get_item(4),
                ),
                n => bail!("step() returned {} values, expected 4 or 5", n),
            };
            let obs = PyObs::new(py, ret.get_item(0))?;
            let reward: f64 = ret
                .get_item(1)
                .extract()
                .context("Reward is not a number")?;

            Ok(Step::new(obs, a.clone(), reward, is_done, to_info_value(info)))
        })
    }

    fn seed(&mut self, seed: Option<i64>) -> Result<()> {
        info!("Seed environment with {:?}", seed);
        Python::with_gil(|py| -> Result<()> {
            self.env.call_method1(py, "seed", (seed,))?;
            Ok(())
        })
    }
}
