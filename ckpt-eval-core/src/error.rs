//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The experiment directory does not hold exactly one configuration artifact,
    /// neither directly nor in exactly one child directory.
    #[error("Invalid experiment directory layout: {0}")]
    InvalidLayout(String),

    /// The requested checkpoint matches zero or more than one checkpoint directory.
    #[error("Checkpoint {0} not found")]
    CheckpointNotFound(u64),

    /// The experiment directory has no checkpoint directory at all.
    #[error("No checkpoint found in {0:?}")]
    NoCheckpoint(PathBuf),
}
