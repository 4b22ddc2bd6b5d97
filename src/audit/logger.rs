//! Append-only audit log
//!
//! One JSON object per line, appended and flushed as each ledger change
//! lands and read back in file order by `tally history`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{TallyError, TallyResult};

use super::entry::AuditEntry;

fn io_error(action: &'static str) -> impl FnOnce(io::Error) -> TallyError {
    move |e| TallyError::Io(format!("Failed to {} audit log: {}", action, e))
}

/// Line-delimited JSON (JSONL) audit trail
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a JSON line
    pub fn log(&self, entry: &AuditEntry) -> TallyResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| TallyError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(io_error("create directory for"))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(io_error("open"))?;

        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(io_error("append to"))
    }

    /// Every entry, oldest first; a log that was never written is empty
    pub fn read_all(&self) -> TallyResult<Vec<AuditEntry>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("open")(e)),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(io_error("read"))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                TallyError::Json(format!("Bad audit entry on line {}: {}", index + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> TallyResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
