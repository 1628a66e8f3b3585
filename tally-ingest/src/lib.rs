//! tally-ingest: statement CSV ingestion (line splitting, tokenizing, header
//! detection and row normalization) for unknown bank export formats.

pub mod columns;
pub mod normalize;
pub mod tokenizer;
pub mod types;

pub use columns::{resolve_columns, ColumnMap, Role};
pub use normalize::{normalize_row, DiscardReason, RowOutcome};
pub use tokenizer::{split_lines, tokenize_line};
pub use types::{MissingDate, ParseOptions, RawRow};
