//! Environment and policies used in tests.
use crate::{Agent, Env, InfoValue, Policy, Step};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Observation made of plain values.
#[derive(Clone, Debug, PartialEq)]
pub struct VecObs(pub Vec<f64>);

impl crate::Obs for VecObs {
    fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }
}

/// Action made of plain values.
#[derive(Clone, Debug, PartialEq)]
pub struct VecAct(pub Vec<f64>);

impl crate::Act for VecAct {
    fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }
}

/// An environment whose episodes end after a fixed number of steps.
///
/// The observation is the number of remaining steps. The reward of the `i`-th step of an
/// episode is `rewards[i % rewards.len()]`. The info carries the remaining steps and a
/// NaN, which has no JSON representation.
pub struct CountdownEnv {
    episode_len: usize,
    rewards: Vec<f64>,
    remaining: usize,
    n_resets: usize,
    seed: Option<i64>,
}

impl CountdownEnv {
    /// Constructs the environment.
    pub fn new(episode_len: usize, rewards: Vec<f64>) -> Self {
        assert!(episode_len > 0 && !rewards.is_empty());
        Self {
            episode_len,
            rewards,
            remaining: 0,
            n_resets: 0,
            seed: None,
        }
    }

    /// Returns how many times the environment has been reset.
    pub fn n_resets(&self) -> usize {
        self.n_resets
    }

    /// Returns the last seed given to the environment.
    pub fn seed_value(&self) -> Option<i64> {
        self.seed
    }
}

impl Env for CountdownEnv {
    type Obs = VecObs;
    type Act = VecAct;
    type Info = InfoValue;

    fn reset(&mut self) -> Result<VecObs> {
        self.remaining = self.episode_len;
        self.n_resets += 1;
        Ok(VecObs(vec![self.remaining as f64]))
    }

    fn step(&mut self, a: &VecAct) -> Result<Step<Self>> {
        if self.remaining == 0 {
            bail!("step() called on a finished episode");
        }
        let ix = self.episode_len - self.remaining;
        self.remaining -= 1;

        let info = InfoValue::Map(vec![
            ("remaining".to_string(), (self.remaining as i64).into()),
            ("ratio".to_string(), f64::NAN.into()),
        ]);
        Ok(Step::new(
            VecObs(vec![self.remaining as f64]),
            a.clone(),
            self.rewards[ix % self.rewards.len()],
            self.remaining == 0,
            info,
        ))
    }

    fn seed(&mut self, seed: Option<i64>) -> Result<()> {
        self.seed = seed;
        Ok(())
    }
}

/// A policy that always takes the same action.
pub struct ConstPolicy {
    act: Vec<f64>,
    explore: bool,
    restored: Option<PathBuf>,
}

impl ConstPolicy {
    /// Constructs the policy.
    pub fn new(act: Vec<f64>) -> Self {
        Self {
            act,
            explore: false,
            restored: None,
        }
    }

    /// Returns the checkpoint the policy was restored from.
    pub fn restored(&self) -> Option<&Path> {
        self.restored.as_deref()
    }
}

impl Policy<CountdownEnv> for ConstPolicy {
    fn compute_action(&mut self, _obs: &VecObs) -> Result<VecAct> {
        Ok(VecAct(self.act.clone()))
    }
}

impl Agent<CountdownEnv> for ConstPolicy {
    fn restore(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            bail!("Checkpoint {:?} does not exist", path);
        }
        self.restored = Some(path.to_path_buf());
        Ok(())
    }

    fn set_explore(&mut self, explore: bool) -> Result<()> {
        self.explore = explore;
        Ok(())
    }

    fn is_explore(&self) -> bool {
        self.explore
    }
}

/// A policy that fails after a given number of actions.
pub struct FailingPolicy {
    n_ok: usize,
}

impl FailingPolicy {
    /// Constructs the policy, which computes `n_ok` actions before failing.
    pub fn new(n_ok: usize) -> Self {
        Self { n_ok }
    }
}

impl Policy<CountdownEnv> for FailingPolicy {
    fn compute_action(&mut self, _obs: &VecObs) -> Result<VecAct> {
        if self.n_ok == 0 {
            bail!("policy failure");
        }
        self.n_ok -= 1;
        Ok(VecAct(vec![0.0]))
    }
}
