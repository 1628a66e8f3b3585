//! tally-core: shared data model and calendar helpers for statement summaries

pub mod model;
pub mod time;

pub use model::{ParseResult, SpendingBucket, Transaction};
