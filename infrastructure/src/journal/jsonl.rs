//! JSONL file writer for workflow reports.
//!
//! Each [`JournalEntry`] is serialized as a single JSON line with a
//! `timestamp` field, appended to the file via a buffered writer.

use loodle_application::ports::journal::{JournalEntry, WorkflowJournal};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL workflow journal that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlWorkflowJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlWorkflowJournal {
    /// Create a new journal writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create journal directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create journal file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkflowJournal for JsonlWorkflowJournal {
    fn record(&self, entry: JournalEntry) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Build the record: merge the entry's fields with the timestamp
        let record = match serde_json::to_value(&entry) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "timestamp".to_string(),
                    serde_json::Value::String(timestamp),
                );
                serde_json::Value::Object(map)
            }
            Ok(other) => serde_json::json!({
                "timestamp": timestamp,
                "data": other,
            }),
            Err(_) => return,
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush every record so the journal survives a crash mid-run
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlWorkflowJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
