//! Locates the experiment run directory.
//!
//! An experiment run directory is the one directly containing the configuration artifact
//! written by the training framework, [`CONFIG_ARTIFACT`]. Users often point at the parent
//! directory of the run instead, which is accepted as long as it contains exactly one run.
use crate::error::EvalError;
use anyhow::Result;
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name of the serialized training configuration.
pub const CONFIG_ARTIFACT: &str = "params.pkl";

/// Returns the experiment run directory for the given path.
///
/// If `path` contains [`CONFIG_ARTIFACT`], it is returned unchanged and its children are not
/// inspected. Otherwise exactly one immediate subdirectory of `path` must contain the artifact,
/// and that subdirectory is returned.
///
/// # Errors
///
/// [`EvalError::InvalidLayout`] if no subdirectory, or more than one, contains the artifact.
/// A `path` that cannot be listed counts as having no such subdirectory.
pub fn resolve_experiment_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.join(CONFIG_ARTIFACT).is_file() {
        debug!("Found {} in {:?}", CONFIG_ARTIFACT, path);
        return Ok(path.to_path_buf());
    }

    let mut children = runs_in(path);
    match children.len() {
        0 => Err(EvalError::InvalidLayout("no configuration artifact found".to_string()).into()),
        1 => {
            let run_dir = children.remove(0);
            info!("Use experiment run directory {:?}", run_dir);
            Ok(run_dir)
        }
        _ => Err(EvalError::InvalidLayout(
            "ambiguous: multiple configuration artifacts found".to_string(),
        )
        .into()),
    }
}

/// Immediate subdirectories of `path` holding the configuration artifact, sorted by path.
///
/// Hidden directories, such as `.ipynb_checkpoints`, are skipped.
fn runs_in(path: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Failed to read {:?}: {}", path, e);
            return vec![];
        }
    };

    let mut runs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .filter(|p| p.is_dir() && p.join(CONFIG_ARTIFACT).is_file())
        .collect();
    runs.sort();
    runs
}
