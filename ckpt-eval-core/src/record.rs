//! Records of evaluation rollouts.
//!
//! One [`RolloutRecord`] is produced per environment step and handed to a [`Recorder`].
//!
//! * [`JsonlRecorder`] appends records to a JSON-lines file. The file is opened and closed
//!   for every record, so a run that fails midway leaves every record written so far intact.
//! * [`BufferedRecorder`] keeps records in memory.
mod base;
mod buffered_recorder;
mod jsonl_recorder;
mod recorder;

pub use base::RolloutRecord;
pub use buffered_recorder::BufferedRecorder;
pub use jsonl_recorder::JsonlRecorder;
pub use recorder::Recorder;
