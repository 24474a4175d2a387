//! JSON-lines file store backing `tally import`.
//!
//! One line per record, tagged with its owner. Re-importing the same
//! statement does not duplicate rows: each identical (owner, record) line
//! already in the file absorbs one incoming copy. Repeated rows within one
//! batch are all kept.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tally_core::{ParsedTransaction, Store, StoreError};
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredRow {
    owner_id: String,
    #[serde(flatten)]
    record: ParsedTransaction,
}

#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable {
        message: format!("{}: {e}", path.display()),
    }
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Occurrence count of every line already in the file
    async fn existing_lines(&self) -> Result<HashMap<String, usize>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => {
                let mut counts = HashMap::new();
                for line in s.lines().filter(|l| !l.trim().is_empty()) {
                    *counts.entry(line.to_string()).or_insert(0) += 1;
                }
                Ok(counts)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(unavailable(&self.path, e)),
        }
    }

    /// Records stored for `owner_id`, in insertion order.
    pub async fn transactions_for(&self, owner_id: &str) -> Result<Vec<ParsedTransaction>, StoreError> {
        let s = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unavailable(&self.path, e)),
        };
        let mut out = Vec::new();
        for (i, line) in s.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            let row: StoredRow = serde_json::from_str(line).map_err(|e| StoreError::Rejected {
                message: format!("{} line {}: {e}", self.path.display(), i + 1),
            })?;
            if row.owner_id == owner_id {
                out.push(row.record);
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl Store for JsonlStore {
    async fn bulk_insert_transactions(
        &self,
        owner_id: &str,
        records: &[ParsedTransaction],
    ) -> Result<usize, StoreError> {
        if owner_id.trim().is_empty() {
            return Err(StoreError::Rejected {
                message: "owner id is empty".to_string(),
            });
        }
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| unavailable(dir, e))?;
        }

        let mut existing = self.existing_lines().await?;
        let mut buf = String::new();
        let mut inserted = 0;
        for record in records {
            let row = StoredRow {
                owner_id: owner_id.to_string(),
                record: record.clone(),
            };
            let line = serde_json::to_string(&row).map_err(|e| StoreError::Rejected {
                message: e.to_string(),
            })?;
            if let Some(n) = existing.get_mut(&line).filter(|n| **n > 0) {
                *n -= 1;
                debug!(owner_id, description = %record.description, "already stored, skipped");
                continue;
            }
            buf.push_str(&line);
            buf.push('\n');
            inserted += 1;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| unavailable(&self.path, e))?;
        file.write_all(buf.as_bytes())
            .await
            .map_err(|e| unavailable(&self.path, e))?;
        file.flush().await.map_err(|e| unavailable(&self.path, e))?;
        Ok(inserted)
    }
}
