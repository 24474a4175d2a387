//! tally-core: shared record types, the persistence boundary and the ingestion clock

pub mod error;
pub mod store;
pub mod time;
pub mod transaction;

pub use error::{IngestError, IngestResult, StoreError};
pub use store::{MemoryStore, Store};
pub use time::{today_in, DEFAULT_TIMEZONE};
pub use transaction::{ParsedTransaction, TransactionType};
