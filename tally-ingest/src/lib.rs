//! tally-ingest: bank-statement CSV ingestion (column detection, date
//! normalization, direction inference, categorization).

pub mod columns;
pub mod dates;
pub mod import;
pub mod parser;
pub mod rows;
pub mod types;

pub use columns::detect_columns;
pub use dates::normalize_date;
pub use import::{import_statement, ImportOutcome};
pub use parser::{decode_statement, Preview, StatementParser, DEFAULT_DESCRIPTION};
pub use types::{AmountLayout, ColumnMap};
