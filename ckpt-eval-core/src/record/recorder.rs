use super::RolloutRecord;
use anyhow::Result;

/// Writes records to an output destination.
pub trait Recorder {
    /// Writes a record.
    fn write(&mut self, record: &RolloutRecord) -> Result<()>;
}
