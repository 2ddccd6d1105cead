//! Round Report Logger
//!
//! Append-only JSONL log with one `RoundReport` per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use rewire_events::RoundReport;

use super::OutputError;

/// File name of the round log inside the output directory
pub const ROUND_LOG_FILE: &str = "rounds.jsonl";

/// Writes round reports to a JSONL file
pub struct ReportLogger {
    writer: Option<BufWriter<File>>,
    report_count: u64,
}

impl ReportLogger {
    /// Create a logger writing to `path`, truncating any previous log
    pub fn new(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            report_count: 0,
        })
    }

    /// Create a logger that discards reports (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            report_count: 0,
        }
    }

    pub fn report_count(&self) -> u64 {
        self.report_count
    }

    pub fn log(&mut self, report: &RoundReport) -> Result<(), OutputError> {
        self.report_count += 1;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{}", report.to_jsonl()?)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for ReportLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("failed to flush round log: {}", e);
        }
    }
}
