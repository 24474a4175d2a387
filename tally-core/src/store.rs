//! Persistence boundary for imported statements.
//!
//! The ingestion pipeline never writes anywhere itself; import mode hands
//! its records to a `Store`, which owns uniqueness and ownership tagging.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::transaction::ParsedTransaction;

#[async_trait]
pub trait Store: Send + Sync {
    /// Persist `records` for `owner_id`, returning how many were inserted.
    async fn bulk_insert_transactions(
        &self,
        owner_id: &str,
        records: &[ParsedTransaction],
    ) -> Result<usize, StoreError>;
}

/// In-process store keyed by owner id
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, Vec<ParsedTransaction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn transactions_for(&self, owner_id: &str) -> Vec<ParsedTransaction> {
        self.rows
            .read()
            .await
            .get(owner_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn total_count(&self) -> usize {
        self.rows.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl Store for MemoryStore {
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
        let mut rows = self.rows.write().await;
        rows.entry(owner_id.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(records.len())
    }
}
