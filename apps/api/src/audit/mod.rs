//! Audit Log Sink — append-only JSONL record of every successful generation.
//!
//! One line per record, append order only; nothing is ever updated or
//! deleted. Each append is a single `write_all` of the full line under a
//! mutex, so concurrent requests never interleave partial lines. Writes are
//! best-effort: `dispatch` runs the append on a spawned task and a failure
//! is logged, never surfaced to the caller.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// One durable audit entry: when, what was asked, what came back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub prompt: String,
    pub output: String,
}

impl AuditRecord {
    pub fn now(prompt: String, output: String) -> Self {
        Self {
            timestamp: Utc::now(),
            prompt,
            output,
        }
    }
}

/// Handle to the durable log. Cloning shares the underlying file; all
/// appends across clones are serialized by the same mutex.
#[derive(Clone)]
pub struct AuditLog {
    file: Arc<Mutex<File>>,
}

impl AuditLog {
    /// Opens (or creates) the log file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }

    /// Appends one record as a single JSON line. Line-atomic under
    /// concurrency: the whole line is written while holding the lock.
    pub async fn append(&self, record: &AuditRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Fire-and-forget append. The write's outcome never gates the caller's
    /// response; a failure is logged and absorbed.
    pub fn dispatch(&self, prompt: String, output: String) {
        let log = self.clone();
        tokio::spawn(async move {
            let record = AuditRecord::now(prompt, output);
            if let Err(e) = log.append(&record).await {
                warn!("Audit log append failed (record dropped): {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_writes_one_parseable_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::open(&path).await.unwrap();

        log.append(&AuditRecord::now("the prompt".into(), "the output".into()))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let record: AuditRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record.prompt, "the prompt");
        assert_eq!(record.output, "the output");
    }

    #[tokio::test]
    async fn appends_accumulate_in_order_of_completion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::open(&path).await.unwrap();

        for i in 0..3 {
            log.append(&AuditRecord::now(format!("p{i}"), format!("o{i}")))
                .await
                .unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let prompts: Vec<String> = contents
            .lines()
            .map(|l| serde_json::from_str::<AuditRecord>(l).unwrap().prompt)
            .collect();
        assert_eq!(prompts, vec!["p0", "p1", "p2"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_appends_never_interleave_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::open(&path).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..50 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                let record = AuditRecord::now(
                    format!("prompt {i} {}", "x".repeat(200)),
                    format!("output {i} {}", "y".repeat(200)),
                );
                log.append(&record).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 50);
        for line in lines {
            let record: AuditRecord = serde_json::from_str(line).unwrap();
            assert!(record.prompt.starts_with("prompt "));
            assert!(record.output.starts_with("output "));
        }
    }

    #[tokio::test]
    async fn reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let log = AuditLog::open(&path).await.unwrap();
            log.append(&AuditRecord::now("first".into(), "a".into()))
                .await
                .unwrap();
        }
        {
            let log = AuditLog::open(&path).await.unwrap();
            log.append(&AuditRecord::now("second".into(), "b".into()))
                .await
                .unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
