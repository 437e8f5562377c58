use super::{Recorder, RolloutRecord};
use anyhow::Result;

/// Buffered recorder.
///
/// This is used for keeping the sequences of observation and action of evaluation runs
/// in memory.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<RolloutRecord>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<RolloutRecord> {
        self.buf.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: &RolloutRecord) -> Result<()> {
        self.buf.push(record.clone());
        Ok(())
    }
}
