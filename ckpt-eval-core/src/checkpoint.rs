//! Selects the checkpoint to evaluate.
//!
//! Checkpoints live in subdirectories of the experiment run directory named
//! `checkpoint_<digits>`, e.g. `checkpoint_000120`. The digits may be zero-padded, so the
//! directory name is kept as found and the numeric identifier is parsed from it.
//! A name only counts as a checkpoint if everything after `checkpoint_` is an ASCII digit.
use crate::error::EvalError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::{fs, path::Path};

const DIR_PREFIX: &str = "checkpoint_";

/// A checkpoint found in an experiment run directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Identifier of the checkpoint, i.e., the training iteration at which it was saved.
    pub id: u64,

    /// The digits of the directory name exactly as they appear, zero padding included.
    pub suffix: String,
}

impl Checkpoint {
    /// Parses a checkpoint directory name such as `checkpoint_000012`.
    ///
    /// Returns `None` for any other name.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        let suffix = name.strip_prefix(DIR_PREFIX)?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match suffix.parse::<u64>() {
            Ok(id) => Some(Self {
                id,
                suffix: suffix.to_string(),
            }),
            Err(e) => {
                warn!("Ignore checkpoint directory {}: {}", name, e);
                None
            }
        }
    }

    /// Name of the checkpoint directory, `checkpoint_<suffix>`.
    pub fn dir_name(&self) -> String {
        format!("{}{}", DIR_PREFIX, self.suffix)
    }

    /// Name of the checkpoint file inside the directory, `checkpoint-<id>`.
    pub fn file_name(&self) -> String {
        format!("checkpoint-{}", self.id)
    }
}

/// Lists the checkpoints in the given directory.
///
/// Entries that are not directories or not named like a checkpoint are skipped.
/// The result is sorted by identifier, then by suffix.
pub fn list_checkpoints(dir: impl AsRef<Path>) -> Result<Vec<Checkpoint>> {
    let dir = dir.as_ref();
    let mut checkpoints = vec![];

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        match name.to_str().and_then(Checkpoint::from_dir_name) {
            Some(checkpoint) => checkpoints.push(checkpoint),
            None => debug!("Skip {:?}", name),
        }
    }

    checkpoints.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.suffix.cmp(&b.suffix)));
    Ok(checkpoints)
}

/// Selects a checkpoint in the experiment run directory `dir`.
///
/// With `requested = Some(id)`, exactly one checkpoint directory must have that identifier.
/// Otherwise the checkpoint with the largest identifier is selected; if two directories
/// share the largest identifier, the one with the lexicographically smaller suffix wins.
///
/// `Ok(None)` means that no `requested` was given and `dir` holds no checkpoint.
///
/// # Errors
///
/// [`EvalError::CheckpointNotFound`] if the requested identifier matches no checkpoint
/// directory or more than one (e.g. `checkpoint_7` and `checkpoint_007`).
pub fn select_checkpoint(
    dir: impl AsRef<Path>,
    requested: Option<u64>,
) -> Result<Option<Checkpoint>> {
    let checkpoints = list_checkpoints(dir)?;

    match requested {
        Some(id) => {
            let mut matches: Vec<Checkpoint> =
                checkpoints.into_iter().filter(|c| c.id == id).collect();
            if matches.len() != 1 {
                debug!("{} directories match checkpoint {}", matches.len(), id);
                return Err(EvalError::CheckpointNotFound(id).into());
            }
            let checkpoint = matches.remove(0);
            info!("Use checkpoint {}", checkpoint.dir_name());
            Ok(Some(checkpoint))
        }
        None => {
            let latest = checkpoints
                .iter()
                .map(|c| c.id)
                .max()
                .and_then(|max| checkpoints.into_iter().find(|c| c.id == max));
            match &latest {
                Some(checkpoint) => info!("Use latest checkpoint {}", checkpoint.dir_name()),
                None => warn!("No checkpoint directory found"),
            }
            Ok(latest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempdir::TempDir;

    fn experiment_dir(names: &[&str]) -> Result<TempDir> {
        let dir = TempDir::new("checkpoints")?;
        for name in names.iter() {
            fs::create_dir(dir.path().join(name))?;
        }
        Ok(dir)
    }

    fn not_found(e: anyhow::Error) -> u64 {
        match e.downcast::<EvalError>() {
            Ok(EvalError::CheckpointNotFound(id)) => id,
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dir_name() {
        assert_eq!(
            Checkpoint::from_dir_name("checkpoint_000012"),
            Some(Checkpoint {
                id: 12,
                suffix: "000012".to_string()
            })
        );
        assert_eq!(Checkpoint::from_dir_name("checkpoint_"), None);
        assert_eq!(Checkpoint::from_dir_name("checkpoint_12a"), None);
        assert_eq!(Checkpoint::from_dir_name("checkpoint_-1"), None);
        assert_eq!(Checkpoint::from_dir_name("my_checkpoint_3"), None);
        assert_eq!(Checkpoint::from_dir_name("checkpoint-3"), None);
        assert_eq!(
            Checkpoint::from_dir_name("checkpoint_99999999999999999999999"),
            None
        );
    }

    #[test]
    fn test_paths() {
        let checkpoint = Checkpoint::from_dir_name("checkpoint_000007").unwrap();
        assert_eq!(checkpoint.dir_name(), "checkpoint_000007");
        assert_eq!(checkpoint.file_name(), "checkpoint-7");
    }

    #[test]
    fn test_latest() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_5", "checkpoint_12", "checkpoint_7"])?;
        let checkpoint = select_checkpoint(dir.path(), None)?.unwrap();
        assert_eq!(checkpoint.id, 12);
        assert_eq!(checkpoint.suffix, "12");
        Ok(())
    }

    #[test]
    fn test_latest_is_numeric_not_lexicographic() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_000090", "checkpoint_000100", "checkpoint_9"])?;
        let checkpoint = select_checkpoint(dir.path(), None)?.unwrap();
        assert_eq!(checkpoint.id, 100);
        assert_eq!(checkpoint.suffix, "000100");
        Ok(())
    }

    #[test]
    fn test_requested() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_5", "checkpoint_12", "checkpoint_7"])?;
        let checkpoint = select_checkpoint(dir.path(), Some(7))?.unwrap();
        assert_eq!(
            checkpoint,
            Checkpoint {
                id: 7,
                suffix: "7".to_string()
            }
        );
        Ok(())
    }

    #[test]
    fn test_requested_keeps_zero_padding() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_000010", "checkpoint_000020"])?;
        let checkpoint = select_checkpoint(dir.path(), Some(10))?.unwrap();
        assert_eq!(checkpoint.suffix, "000010");
        Ok(())
    }

    #[test]
    fn test_requested_missing() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_5", "checkpoint_12", "checkpoint_7"])?;
        let e = select_checkpoint(dir.path(), Some(99)).unwrap_err();
        assert_eq!(not_found(e), 99);
        Ok(())
    }

    #[test]
    fn test_requested_does_not_match_longer_suffix() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_21", "checkpoint_11"])?;
        let e = select_checkpoint(dir.path(), Some(1)).unwrap_err();
        assert_eq!(not_found(e), 1);
        Ok(())
    }

    #[test]
    fn test_requested_ambiguous() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_7", "checkpoint_007"])?;
        let e = select_checkpoint(dir.path(), Some(7)).unwrap_err();
        assert_eq!(not_found(e), 7);
        Ok(())
    }

    #[test]
    fn test_no_checkpoint() -> Result<()> {
        let dir = experiment_dir(&["eval", "logs"])?;
        File::create(dir.path().join("checkpoint_3"))?;
        assert_eq!(select_checkpoint(dir.path(), None)?, None);
        Ok(())
    }

    #[test]
    fn test_tie_on_latest() -> Result<()> {
        let dir = experiment_dir(&["checkpoint_8", "checkpoint_08"])?;
        let checkpoint = select_checkpoint(dir.path(), None)?.unwrap();
        assert_eq!(checkpoint.suffix, "08");
        Ok(())
    }
}
