//! Import mode: parse a statement and hand the records to a `Store`.

use tally_core::{IngestError, IngestResult, Store};
use tracing::info;

use crate::parser::StatementParser;

/// What an import run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Records were parsed and handed to the store
    Imported { parsed: usize, inserted: usize },
    /// Nothing parseable; the store was not called
    NoTransactions,
}

/// Parse `text` and persist the records for `owner_id`.
///
/// A statement with no usable rows is not an error. Store failures
/// propagate as [`IngestError::Store`].
pub async fn import_statement<S>(
    parser: &StatementParser,
    store: &S,
    owner_id: &str,
    text: &str,
) -> IngestResult<ImportOutcome>
where
    S: Store + ?Sized,
{
    if owner_id.trim().is_empty() {
        return Err(IngestError::InvalidInput {
            message: "import requires an owner id".to_string(),
        });
    }

    let records = parser.parse(text);
    if records.is_empty() {
        info!(owner_id, "no transactions detected; nothing to import");
        return Ok(ImportOutcome::NoTransactions);
    }

    let inserted = store.bulk_insert_transactions(owner_id, &records).await?;
    info!(owner_id, parsed = records.len(), inserted, "imported statement");
    Ok(ImportOutcome::Imported {
        parsed: records.len(),
        inserted,
    })
}
