//! Training configuration stored in `params.pkl`.
use anyhow::{bail, Context, Result};
use log::info;
use pyo3::{
    types::{PyBytes, PyDict},
    PyAny, PyObject, Python,
};
use std::{fmt, fs, path::Path};

/// The full trainer configuration, passed to the trainer constructor as it was saved.
pub struct RuntimeParams {
    config: PyObject,
}

impl RuntimeParams {
    /// Returns a deep copy of the configuration.
    ///
    /// Trainers are free to modify the dictionary they are given, so each caller gets its own.
    pub fn config_copy(&self, py: Python) -> Result<PyObject> {
        let copy = py
            .import("copy")?
            .getattr("deepcopy")?
            .call1((self.config.as_ref(py),))?;
        Ok(copy.into())
    }
}

/// Parameters for building the evaluation environment.
pub struct EnvParams {
    /// Environment class or constructor, called as `env(config=env_config)`.
    pub env: PyObject,

    /// Keyword argument `config` of the environment constructor.
    pub env_config: PyObject,

    /// Seed used during training, if any.
    pub seed: Option<i64>,
}

impl EnvParams {
    /// Returns the name of the environment class.
    pub fn env_name(&self) -> String {
        Python::with_gil(|py| {
            let env = self.env.as_ref(py);
            match env.getattr("__name__") {
                Ok(name) => name.to_string(),
                Err(_) => env.to_string(),
            }
        })
    }
}

impl fmt::Debug for EnvParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvParams")
            .field("env", &self.env_name())
            .field("seed", &self.seed)
            .finish()
    }
}

/// Contents of `params.pkl`, split by purpose.
pub struct TrainingParams {
    /// Configuration of the trainer.
    pub runtime: RuntimeParams,

    /// Configuration of the environment.
    pub env: EnvParams,
}

/// Loads the pickled training configuration at `path`.
///
/// The pickle must hold a dictionary with the entries `env`, a callable building the
/// environment, and `env_config`. The entry `seed` is optional and may be `None`.
pub fn load_training_params(path: impl AsRef<Path>) -> Result<TrainingParams> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;

    Python::with_gil(|py| -> Result<TrainingParams> {
        let config = py
            .import("pickle")?
            .call_method1("loads", (PyBytes::new(py, &bytes),))
            .with_context(|| format!("Failed to unpickle {:?}", path))?;
        if config.downcast::<PyDict>().is_err() {
            bail!("{:?} does not hold a dictionary", path);
        }

        let env = entry(config, "env", path)?;
        if !env.is_callable() {
            bail!(
                "Entry 'env' of {:?} is not callable: {}",
                path,
                env.to_string()
            );
        }
        let env_config = entry(config, "env_config", path)?;
        let seed: Option<i64> = match config.get_item("seed") {
            Ok(seed) => seed
                .extract()
                .with_context(|| format!("Entry 'seed' of {:?} is not an integer", path))?,
            Err(_) => None,
        };

        let params = TrainingParams {
            runtime: RuntimeParams {
                config: config.into(),
            },
            env: EnvParams {
                env: env.into(),
                env_config: env_config.into(),
                seed,
            },
        };
        info!("Loaded training configuration {:?}", path);
        info!("{:?}", params.env);
        Ok(params)
    })
}

fn entry<'py>(config: &'py PyAny, key: &str, path: &Path) -> Result<&'py PyAny> {
    config
        .get_item(key)
        .with_context(|| format!("Entry '{}' missing in {:?}", key, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempdir::TempDir;

    fn write_params(code: &str) -> Result<(TempDir, PathBuf)> {
        let bytes = Python::with_gil(|py| -> Result<Vec<u8>> {
            let obj = py.eval(code, None, None)?;
            let bytes = py.import("pickle")?.call_method1("dumps", (obj,))?;
            Ok(bytes.downcast::<PyBytes>().unwrap().as_bytes().to_vec())
        })?;
        let dir = TempDir::new("params")?;
        let path = dir.path().join("params.pkl");
        fs::write(&path, bytes)?;
        Ok((dir, path))
    }

    #[test]
    fn test_load() -> Result<()> {
        let (_dir, path) =
            write_params("{'env': dict, 'env_config': {'step_size': 1}, 'seed': 7}")?;
        let params = load_training_params(&path)?;
        assert_eq!(params.env.seed, Some(7));
        assert_eq!(params.env.env_name(), "dict");
        Python::with_gil(|py| -> Result<()> {
            let copy = params.runtime.config_copy(py)?;
            let step_size: i64 = copy
                .as_ref(py)
                .get_item("env_config")?
                .get_item("step_size")?
                .extract()?;
            assert_eq!(step_size, 1);
            Ok(())
        })
    }

    #[test]
    fn test_seed_none_or_missing() -> Result<()> {
        let (_dir, path) = write_params("{'env': dict, 'env_config': {}, 'seed': None}")?;
        assert_eq!(load_training_params(&path)?.env.seed, None);

        let (_dir, path) = write_params("{'env': dict, 'env_config': {}}")?;
        assert_eq!(load_training_params(&path)?.env.seed, None);
        Ok(())
    }

    #[test]
    fn test_env_not_callable() -> Result<()> {
        let (_dir, path) = write_params("{'env': 'DockingEnv', 'env_config': {}}")?;
        assert!(load_training_params(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_env_config_missing() -> Result<()> {
        let (_dir, path) = write_params("{'env': dict}")?;
        assert!(load_training_params(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_not_a_pickle() -> Result<()> {
        let dir = TempDir::new("params")?;
        let path = dir.path().join("params.pkl");
        fs::write(&path, b"not a pickle")?;
        assert!(load_training_params(&path).is_err());
        Ok(())
    }
}
