use super::{Recorder, RolloutRecord};
use anyhow::{Context, Result};
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

/// Appends records to a JSON-lines file, one object per line.
///
/// The file is created if it does not exist. Existing lines are never touched.
pub struct JsonlRecorder {
    path: PathBuf,
}

impl JsonlRecorder {
    /// Constructs a recorder writing to `path`.
    ///
    /// Nothing is created until the first record is written.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records in a JSON-lines file.
    pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RolloutRecord>> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let mut records = vec![];
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .with_context(|| format!("Invalid record at line {} of {:?}", i + 1, path))?;
            records.push(record);
        }
        Ok(records)
    }
}

impl Recorder for JsonlRecorder {
    /// Opens the file in append mode, writes `record` as a single line and closes the file.
    fn write(&mut self, record: &RolloutRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
