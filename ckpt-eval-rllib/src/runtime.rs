//! Lifecycle of the Ray runtime.
use anyhow::{Context, Result};
use log::{info, warn};
use pyo3::{types::IntoPyDict, PyObject, Python};

/// An initialized Ray runtime in the embedded interpreter.
///
/// Trainers need Ray to be initialized before they are constructed; [`RllibAgent::build`]
/// takes a reference to this value for that reason. Ray is shut down when the value is
/// dropped.
///
/// [`RllibAgent::build`]: crate::RllibAgent::build
pub struct RayRuntime {
    ray: PyObject,
}

impl RayRuntime {
    /// Calls `ray.init()`.
    pub fn init() -> Result<Self> {
        Python::with_gil(|py| -> Result<Self> {
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            // Some libraries read sys.argv[0], which is missing in an embedded interpreter.
            py.run(
                "if not getattr(sys, 'argv', None) or not sys.argv[0]: sys.argv = ['ckpt-eval']",
                None,
                Some(locals),
            )?;
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Python version = {}", ver);

            let ray = py.import("ray").context("Failed to import ray")?;
            ray.call_method0("init").context("ray.init() failed")?;
            info!("Initialized Ray");
            Ok(Self { ray: ray.into() })
        })
    }
}

impl Drop for RayRuntime {
    fn drop(&mut self) {
        Python::with_gil(|py| {
            match self.ray.call_method0(py, "shutdown") {
                Ok(_) => info!("Shut down Ray"),
                Err(e) => warn!("ray.shutdown() failed: {}", e),
            };
        });
    }
}
